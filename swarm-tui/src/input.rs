//! Keyboard input dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

/// Handle a key event. Clears `app.running` on quit keys.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false
        }
        KeyCode::Char('j') | KeyCode::Down => app.scroll_by(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_by(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::reveal::ObservationSupport;
    use swarm_core::PageConfig;

    fn app() -> AppState {
        AppState::new(&PageConfig::default(), 100, 20, ObservationSupport::Available).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_keys_scroll() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.offset, 2);
        handle_key(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.offset, 1);

        handle_key(&mut app, press(KeyCode::Char('G')));
        assert_eq!(app.offset, app.max_offset());
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.offset, 0);
    }

    #[test]
    fn page_keys_move_by_a_screen() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::PageDown));
        assert_eq!(app.offset, 18);
        handle_key(&mut app, press(KeyCode::PageUp));
        assert_eq!(app.offset, 0);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('x')));
        assert!(app.running);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);

        let mut app = self::app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let mut key = press(KeyCode::Char('j'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert_eq!(app.offset, 0);
    }
}
