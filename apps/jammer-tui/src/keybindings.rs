//! Keybinding definitions

use crossterm::event::KeyCode;

/// Keybinding action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Move up in the row list
    MoveUp,
    /// Move down in the row list
    MoveDown,
    /// Activate the selected row (remove member, add friend, open adder)
    Select,
    /// Open or close the add-to-team dropdown
    ToggleAdder,
    /// Toggle help
    ToggleHelp,
    /// Close overlays
    Cancel,
}

/// Get the action for a key
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Char('a') => Some(Action::ToggleAdder),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vim_and_arrow_keys_agree() {
        assert_eq!(action_for_key(KeyCode::Char('j')), action_for_key(KeyCode::Down));
        assert_eq!(action_for_key(KeyCode::Char('k')), action_for_key(KeyCode::Up));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(action_for_key(KeyCode::Char('z')), None);
        assert_eq!(action_for_key(KeyCode::Tab), None);
        assert_eq!(action_for_key(KeyCode::Char('r')), None);
    }

    #[test]
    fn test_select_keys() {
        assert_eq!(action_for_key(KeyCode::Enter), Some(Action::Select));
        assert_eq!(action_for_key(KeyCode::Char(' ')), Some(Action::Select));
    }
}
