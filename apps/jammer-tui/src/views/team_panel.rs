//! Team building panel
//!
//! Draws a [`TeamView`] as a bordered paragraph:
//! - Compo notices and warnings
//! - The author list with remove markers
//! - The add-to-team dropdown (collapsed or open)
//! - Friend guidance and the last error

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use jammer_node::NodeId;
use jammer_team::{Section, TeamView};

/// Something the selection cursor can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Remove(NodeId),
    ToggleAdder,
    Add(NodeId),
}

/// Interactive rows of `view`, in display order.
pub fn row_actions(view: Option<&TeamView>, adder_open: bool) -> Vec<RowAction> {
    let Some(list) = view.and_then(|v| v.team()) else {
        return Vec::new();
    };

    let mut actions: Vec<RowAction> = list
        .members
        .iter()
        .filter(|m| m.removable)
        .map(|m| RowAction::Remove(m.id))
        .collect();
    if let Some(adder) = &list.adder {
        actions.push(RowAction::ToggleAdder);
        if adder_open {
            actions.extend(adder.candidates.iter().map(|c| RowAction::Add(c.id)));
        }
    }
    actions
}

/// Team panel view state
#[derive(Debug, Default)]
pub struct TeamPanel;

impl TeamPanel {
    pub fn new() -> Self {
        Self
    }

    /// Render the panel
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        view: Option<&TeamView>,
        selected: Option<RowAction>,
        adder_open: bool,
    ) {
        let Some(view) = view else {
            let block = Block::default().title("Team Building").borders(Borders::ALL);
            let paragraph = Paragraph::new("This node is not an item, there is no team to manage.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        let lines = Self::lines(view, selected, adder_open);
        let block = Block::default()
            .title(Span::styled(
                view.label,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn lines(view: &TeamView, selected: Option<RowAction>, adder_open: bool) -> Vec<Line<'static>> {
        let highlight = |action: RowAction| {
            if selected == Some(action) {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            }
        };

        let mut lines = Vec::new();
        for section in &view.sections {
            match section {
                Section::Notice(text) => {
                    lines.push(Line::from(Span::raw(text.clone())));
                    lines.push(Line::default());
                }
                Section::Warning(text) => {
                    lines.push(Line::from(Span::styled(
                        text.clone(),
                        Style::default().fg(Color::Yellow),
                    )));
                    lines.push(Line::default());
                }
                Section::Team(list) => {
                    for member in &list.members {
                        let mut spans = vec![
                            Span::raw("  @ "),
                            Span::styled(
                                member.name.clone(),
                                Style::default().add_modifier(Modifier::BOLD),
                            ),
                        ];
                        if member.is_me {
                            spans.push(Span::raw(" (you)"));
                        }
                        if member.is_main {
                            spans.push(Span::styled(
                                " (main author)",
                                Style::default().fg(Color::Cyan),
                            ));
                        }
                        if member.removable {
                            spans.push(Span::styled(
                                " [x] Remove from team",
                                highlight(RowAction::Remove(member.id)),
                            ));
                        }
                        lines.push(Line::from(spans));
                    }

                    if let Some(adder) = &list.adder {
                        let arrow = if adder_open { "^" } else { "v" };
                        lines.push(Line::from(Span::styled(
                            format!("  + {} {}", adder.header, arrow),
                            highlight(RowAction::ToggleAdder).fg(Color::Green),
                        )));
                        if adder_open {
                            for candidate in &adder.candidates {
                                lines.push(Line::from(vec![
                                    Span::raw("      "),
                                    Span::styled(
                                        candidate.name.clone(),
                                        highlight(RowAction::Add(candidate.id)),
                                    ),
                                    Span::styled(
                                        format!("  {}", candidate.title()),
                                        Style::default().fg(Color::DarkGray),
                                    ),
                                ]));
                            }
                        }
                    }

                    if list.loading {
                        lines.push(Line::from(Span::styled(
                            "  ... working",
                            Style::default()
                                .fg(Color::Magenta)
                                .add_modifier(Modifier::ITALIC),
                        )));
                    }
                    lines.push(Line::default());
                }
                Section::Guidance(text) => {
                    lines.push(Line::from(Span::styled(
                        *text,
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }

        if let Some(error) = &view.error {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("! {}", error),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jammer_team::{Adder, Candidate, MemberRow, TeamList};
    use ratatui::{backend::TestBackend, Terminal};

    fn sample(adder: bool) -> TeamView {
        let candidates = vec![
            Candidate {
                id: NodeId(3),
                name: "cy".to_string(),
            },
            Candidate {
                id: NodeId(4),
                name: "dee".to_string(),
            },
        ];
        TeamView {
            label: "Team Building",
            sections: vec![Section::Team(TeamList {
                members: vec![
                    MemberRow {
                        id: NodeId(1),
                        name: "ada".to_string(),
                        is_me: true,
                        is_main: true,
                        removable: false,
                    },
                    MemberRow {
                        id: NodeId(2),
                        name: "bo".to_string(),
                        is_me: false,
                        is_main: false,
                        removable: true,
                    },
                ],
                adder: adder.then(|| Adder {
                    header: "Add to team",
                    candidates,
                }),
                loading: false,
            })],
            error: Some("Requesting removing user 2 caused Timeout".to_string()),
        }
    }

    fn draw(view: Option<&TeamView>, adder_open: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 16)).unwrap();
        terminal
            .draw(|f| TeamPanel::new().render(f, f.area(), view, None, adder_open))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_row_actions_follow_adder_state() {
        let view = sample(true);
        assert_eq!(
            row_actions(Some(&view), false),
            vec![RowAction::Remove(NodeId(2)), RowAction::ToggleAdder]
        );
        assert_eq!(
            row_actions(Some(&view), true),
            vec![
                RowAction::Remove(NodeId(2)),
                RowAction::ToggleAdder,
                RowAction::Add(NodeId(3)),
                RowAction::Add(NodeId(4)),
            ]
        );
        assert!(row_actions(None, true).is_empty());
    }

    #[test]
    fn test_render_members_and_error() {
        let screen = draw(Some(&sample(false)), false);
        assert!(screen.contains("Team Building"));
        assert!(screen.contains("ada (you) (main author)"));
        assert!(screen.contains("bo [x] Remove from team"));
        assert!(screen.contains("! Requesting removing user 2"));
        assert!(!screen.contains("Add to team"));
    }

    #[test]
    fn test_render_open_adder() {
        let screen = draw(Some(&sample(true)), true);
        assert!(screen.contains("+ Add to team ^"));
        assert!(screen.contains("Click to add cy"));
        assert!(screen.contains("dee"));
    }

    #[test]
    fn test_render_non_item() {
        let screen = draw(None, false);
        assert!(screen.contains("not an item"));
    }
}
