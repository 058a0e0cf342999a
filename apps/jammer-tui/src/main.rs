//! Jammer TUI - team building console
//!
//! Terminal UI for managing the co-authors of a jammer item.

mod app;
mod config;
mod demo;
mod host;
mod keybindings;
mod views;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use jammer_node::{HttpNodeService, NodeId, NodeService};

use app::App;
use config::AppConfig;

/// How long to wait for input before checking on background work
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(name = "jammer-tui", version, about = "Manage the team of a jammer item")]
struct Cli {
    /// Id of the item whose team to manage
    #[arg(required_unless_present = "demo")]
    node: Option<u64>,

    /// Config file (default: <config dir>/jammer/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use built-in sample data instead of the node API
    #[arg(long)]
    demo: bool,

    /// Log file (default: <data dir>/jammer/jammer-tui.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    init_logging(cli.log_file.as_deref())?;

    let config = AppConfig::load(cli.config.as_deref())?;
    let runtime = tokio::runtime::Runtime::new()?;

    let (service, node_id): (Arc<dyn NodeService>, NodeId) = if cli.demo {
        tracing::info!(
            "Running with demo data (items {} and {})",
            demo::ITEM,
            demo::COMPO_ITEM
        );
        let service: Arc<dyn NodeService> = Arc::new(demo::service());
        (service, NodeId(cli.node.unwrap_or(demo::ITEM)))
    } else {
        let node = cli.node.ok_or("a node id is required")?;
        let service: Arc<dyn NodeService> = Arc::new(HttpNodeService::new(&config.client)?);
        (service, NodeId(node))
    };

    let props = runtime.block_on(host::load_props(service.as_ref(), node_id))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(props, config.team, service, runtime.handle().clone());
    app.start();
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_log_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| app.render(f))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_node_required_without_demo() {
        assert!(Cli::try_parse_from(["jammer-tui"]).is_err());

        let cli = Cli::try_parse_from(["jammer-tui", "--demo"]).unwrap();
        assert!(cli.demo);
        assert!(cli.node.is_none());

        let cli = Cli::try_parse_from(["jammer-tui", "1234", "--log-file", "/tmp/x.log"]).unwrap();
        assert_eq!(cli.node, Some(1234));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/x.log")));
    }
}
