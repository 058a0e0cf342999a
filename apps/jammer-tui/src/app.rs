//! Application state and main render loop

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::runtime::Handle;

use jammer_node::{Node, NodeError, NodeId, NodeService};
use jammer_team::{fetch_friends, FriendsError, LinkRequest, TeamBuilding, TeamConfig, TeamProps};

use crate::host;
use crate::keybindings::{action_for_key, Action};
use crate::views::{row_actions, RowAction, TeamPanel};

/// Results of background work, delivered to the UI thread.
#[derive(Debug)]
pub enum AppEvent {
    FriendsLoaded(Result<Vec<Node>, FriendsError>),
    Mutated(LinkRequest, Result<(), NodeError>),
}

/// Main application state
pub struct App {
    /// The hosted component
    pub team: TeamBuilding,
    service: Arc<dyn NodeService>,
    runtime: Handle,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,
    changes_rx: Receiver<(NodeId, i32)>,
    /// Index into the interactive rows
    pub selected: usize,
    /// Whether the add-to-team dropdown is open
    pub adder_open: bool,
    /// Whether the friend list request is outstanding
    pub loading_friends: bool,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
    panel: TeamPanel,
}

impl App {
    /// Create a new application instance
    pub fn new(
        props: TeamProps,
        config: TeamConfig,
        service: Arc<dyn NodeService>,
        runtime: Handle,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        let (changes_tx, changes_rx) = mpsc::channel();

        let team = TeamBuilding::new(props, move |user, delta| {
            // The receiver lives as long as the app.
            let _ = changes_tx.send((user, delta));
        })
        .with_config(config);

        Self {
            team,
            service,
            runtime,
            events_tx,
            events_rx,
            changes_rx,
            selected: 0,
            adder_open: false,
            loading_friends: false,
            show_help: false,
            status_message: None,
            panel: TeamPanel::new(),
        }
    }

    /// Kick off the initial friend list load.
    pub fn start(&mut self) {
        self.load_friends();
    }

    fn load_friends(&mut self) {
        self.loading_friends = true;
        let service = self.service.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = fetch_friends(service.as_ref()).await;
            let _ = tx.send(AppEvent::FriendsLoaded(result));
        });
    }

    fn send(&mut self, request: LinkRequest) {
        let service = self.service.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = request.send(service.as_ref()).await;
            let _ = tx.send(AppEvent::Mutated(request, result));
        });
    }

    /// Apply finished background work. Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        while let Ok(event) = self.events_rx.try_recv() {
            changed = true;
            match event {
                AppEvent::FriendsLoaded(result) => {
                    self.loading_friends = false;
                    self.team.apply_friends(result);
                }
                AppEvent::Mutated(request, result) => {
                    self.status_message = Some(match &result {
                        Ok(()) => format!("{} of user {} done", request.kind, request.user),
                        Err(_) => format!("{} of user {} failed", request.kind, request.user),
                    });
                    self.team.finish_mutation(&request, result);
                }
            }
        }

        while let Ok((user, delta)) = self.changes_rx.try_recv() {
            changed = true;
            let mut authors = self.team.props().authors.clone();
            host::apply_change(&mut authors, &self.team.state().friends, user, delta);
            self.team.set_authors(authors);
        }

        if changed {
            self.clamp_selection();
        }
        changed
    }

    fn actions(&self) -> Vec<RowAction> {
        row_actions(self.team.view().as_ref(), self.adder_open)
    }

    /// The row under the cursor, if any
    pub fn selected_action(&self) -> Option<RowAction> {
        self.actions().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.actions().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        // Main layout: title bar, panel, status line
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(0),    // Team panel
                Constraint::Length(1), // Status line
            ])
            .split(size);

        self.render_title_bar(frame, chunks[0]);

        let view = self.team.view();
        self.panel.render(
            frame,
            chunks[1],
            view.as_ref(),
            self.selected_action(),
            self.adder_open,
        );

        self.render_status_line(frame, chunks[2]);

        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let props = self.team.props();
        let mut spans = vec![
            Span::styled(
                format!(" {} ", props.node.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("| {} #{} ", props.node.subtype, props.node.id)),
            Span::raw(format!("| signed in as {} ", props.user.name)),
        ];
        if self.loading_friends {
            spans.push(Span::styled(
                "| loading friends ",
                Style::default().fg(Color::Yellow),
            ));
        }

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(bar, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let content = self
            .status_message
            .clone()
            .unwrap_or_else(|| "j/k move | Enter select | a add | ? help | q quit".to_string());
        frame.render_widget(Paragraph::new(content), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_text = r#"
Team Building - Help

Navigation:
  j/k     - Move between actionable rows
  Enter   - Remove member / open adder / add friend
  a       - Open or close the add-to-team dropdown
  Esc     - Close help or dropdown

Members can leave a team; the main author can remove anyone else.
Only mutual friends (you follow each other) can be added.

Other:
  ?       - Toggle this help
  q       - Quit
"#;

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black));

        let help_area = centered_rect(70, 70, area);
        frame.render_widget(ratatui::widgets::Clear, help_area);
        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, help_area);
    }

    /// Handle a key press, returns true if app should quit
    pub fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> bool {
        let Some(action) = action_for_key(code) else {
            return false;
        };

        match action {
            Action::Quit => return true,
            Action::MoveDown => self.navigate(1),
            Action::MoveUp => self.navigate(-1),
            Action::Select => self.activate(),
            Action::ToggleAdder => self.toggle_adder(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Cancel => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.adder_open = false;
                    self.clamp_selection();
                }
            }
        }
        false
    }

    fn navigate(&mut self, step: isize) {
        let len = self.actions().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected as isize + step).rem_euclid(len as isize) as usize;
    }

    fn toggle_adder(&mut self) {
        let actions = self.actions();
        if !actions.contains(&RowAction::ToggleAdder) {
            self.status_message = Some("Nothing to add right now".to_string());
            return;
        }
        self.adder_open = !self.adder_open;
        if let Some(index) = self
            .actions()
            .iter()
            .position(|a| *a == RowAction::ToggleAdder)
        {
            self.selected = index;
        }
    }

    fn activate(&mut self) {
        let Some(action) = self.selected_action() else {
            return;
        };

        let request = match action {
            RowAction::ToggleAdder => {
                self.toggle_adder();
                return;
            }
            RowAction::Remove(user) => self.team.begin_remove(user),
            RowAction::Add(user) => {
                self.adder_open = false;
                self.team.begin_add(user)
            }
        };

        match request {
            Some(request) => {
                self.status_message = Some(format!("{} of user {} ...", request.kind, request.user));
                self.send(request);
            }
            None => self.status_message = Some("Another change is still in progress".to_string()),
        }
        self.clamp_selection();
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::demo;

    fn demo_app(runtime: &tokio::runtime::Runtime) -> App {
        let service: Arc<dyn NodeService> = Arc::new(demo::service());
        let props = runtime
            .block_on(host::load_props(service.as_ref(), NodeId(demo::ITEM)))
            .unwrap();
        App::new(props, TeamConfig::default(), service, runtime.handle().clone())
    }

    /// Tick until `done` holds or a second passes.
    fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(1);
        while !done(app) && Instant::now() < deadline {
            app.tick();
            std::thread::sleep(Duration::from_millis(5));
        }
        app.tick();
    }

    fn key(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_start_loads_friends() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = demo_app(&runtime);
        app.start();
        settle(&mut app, |a| !a.loading_friends);

        assert_eq!(app.team.state().friends.len(), 3);
        // bo is removable, then the adder for cy and dee
        assert_eq!(
            app.actions(),
            vec![RowAction::Remove(NodeId(2)), RowAction::ToggleAdder]
        );
    }

    #[test]
    fn test_add_friend_through_adder() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = demo_app(&runtime);
        app.start();
        settle(&mut app, |a| !a.loading_friends);

        key(&mut app, KeyCode::Char('a'));
        assert!(app.adder_open);
        key(&mut app, KeyCode::Down);
        assert_eq!(app.selected_action(), Some(RowAction::Add(NodeId(3))));

        key(&mut app, KeyCode::Enter);
        assert_eq!(app.team.state().processing, Some(NodeId(3)));
        settle(&mut app, |a| a.team.state().processing.is_none());
        settle(&mut app, |a| a.team.props().authors.len() == 3);

        let names: Vec<_> = app
            .team
            .props()
            .authors
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["ada", "bo", "cy"]);
        assert!(app.team.state().error.is_none());
    }

    #[test]
    fn test_remove_member() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = demo_app(&runtime);

        assert_eq!(app.selected_action(), Some(RowAction::Remove(NodeId(2))));
        key(&mut app, KeyCode::Enter);
        settle(&mut app, |a| a.team.props().authors.len() == 1);

        assert_eq!(app.team.props().authors[0].name, "ada");
        assert!(app.team.state().processing.is_none());
    }

    #[test]
    fn test_navigation_wraps() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = demo_app(&runtime);
        app.start();
        settle(&mut app, |a| !a.loading_friends);

        key(&mut app, KeyCode::Up);
        assert_eq!(app.selected_action(), Some(RowAction::ToggleAdder));
        key(&mut app, KeyCode::Down);
        assert_eq!(app.selected_action(), Some(RowAction::Remove(NodeId(2))));
    }

    #[test]
    fn test_compo_item_has_nothing_to_act_on() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let service: Arc<dyn NodeService> = Arc::new(demo::service());
        let props = runtime
            .block_on(host::load_props(service.as_ref(), NodeId(demo::COMPO_ITEM)))
            .unwrap();
        let mut app = App::new(props, TeamConfig::default(), service, runtime.handle().clone());
        app.start();
        settle(&mut app, |a| !a.loading_friends);

        let view = app.team.view().unwrap();
        assert_eq!(view.notices().len(), 1);
        assert!(app.actions().is_empty());
        key(&mut app, KeyCode::Enter);
        assert!(app.team.state().processing.is_none());
    }

    #[test]
    fn test_failed_friend_load_is_not_retried() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut item = Node::item(demo::ITEM, "game", 1, "Tiny Tower");
        item.meta.author = vec![NodeId(1)];
        let memory = Arc::new(
            jammer_node::MemoryNodeService::new()
                .with_node(Node::user(1, "ada"))
                .with_node(item.clone()),
        );
        let service: Arc<dyn NodeService> = memory.clone();
        let props = TeamProps {
            node: item,
            user: Node::user(1, "ada"),
            authors: vec![Node::user(1, "ada")],
        };
        let mut app = App::new(props, TeamConfig::default(), service, runtime.handle().clone());
        app.start();
        settle(&mut app, |a| !a.loading_friends);
        let error = app.team.state().error.clone();
        assert!(error.as_deref().unwrap_or_default().starts_with("Error getting friends-list"));

        memory.sign_in(NodeId(1));
        assert!(!key(&mut app, KeyCode::Char('r')));
        assert!(!app.loading_friends);
        settle(&mut app, |_| false);
        assert!(app.team.state().friends.is_empty());
        assert_eq!(app.team.state().error, error);
    }

    #[test]
    fn test_quit_and_help() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = demo_app(&runtime);

        assert!(!key(&mut app, KeyCode::Char('?')));
        assert!(app.show_help);
        key(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(key(&mut app, KeyCode::Char('q')));
    }
}
