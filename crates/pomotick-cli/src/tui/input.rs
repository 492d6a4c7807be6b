//! Keyboard input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events delivered to the main loop by the keyboard task.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Start when stopped, stop when running.
    Toggle,
    Reset,
    /// Open the reset-statistics confirmation.
    AskResetStats,
    /// Answer to the open confirmation.
    AnswerResetStats(bool),
    ShowClock,
    ShowTimer,
    ToggleFullscreen,
    ToggleMonochrome,
}

/// Map a key event to an action.
///
/// While a confirmation is open only its answers (and Ctrl-C) are accepted.
pub fn handle_key_event(key: KeyEvent, confirming: bool) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if confirming {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::AnswerResetStats(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => {
                Action::AnswerResetStats(false)
            }
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('s') => Action::Toggle,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('R') => Action::AskResetStats,
        KeyCode::Char('c') => Action::ShowClock,
        KeyCode::Char('b') | KeyCode::Esc => Action::ShowTimer,
        KeyCode::Char('f') => Action::ToggleFullscreen,
        KeyCode::Char('m') => Action::ToggleMonochrome,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn main_bindings() {
        assert_eq!(handle_key_event(press(KeyCode::Char(' ')), false), Action::Toggle);
        assert_eq!(handle_key_event(press(KeyCode::Char('r')), false), Action::Reset);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT), false),
            Action::AskResetStats
        );
        assert_eq!(handle_key_event(press(KeyCode::Char('c')), false), Action::ShowClock);
        assert_eq!(handle_key_event(press(KeyCode::Esc), false), Action::ShowTimer);
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), false), Action::Quit);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, false), Action::Quit);
        assert_eq!(handle_key_event(key, true), Action::Quit);
    }

    #[test]
    fn confirmation_captures_keys() {
        assert_eq!(
            handle_key_event(press(KeyCode::Char('y')), true),
            Action::AnswerResetStats(true)
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Esc), true),
            Action::AnswerResetStats(false)
        );
        assert_eq!(handle_key_event(press(KeyCode::Char(' ')), true), Action::None);
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), true), Action::None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(key, false), Action::None);
    }
}
