//! TUI views

mod team_panel;

pub use team_panel::{row_actions, RowAction, TeamPanel};
