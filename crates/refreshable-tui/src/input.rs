use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    JumpToTop,
    ToggleRefresh,
    ReloadNow,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('e'), _) => Action::ToggleRefresh,
        (KeyCode::Char('r'), _) => Action::ReloadNow,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('j'))), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Up)), Action::ScrollUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('g'))), Action::JumpToTop);
    }

    #[test]
    fn test_refresh_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('e'))), Action::ToggleRefresh);
        assert_eq!(handle_key_event(key(KeyCode::Char('r'))), Action::ReloadNow);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), Action::None);
    }
}
