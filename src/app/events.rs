use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::app::actions::Action;
use crate::modules::get_panel;
use crate::state::{State, View};

/// Map a terminal event to an action. None means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return Some(Action::None);
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            // Global Ctrl shortcuts (always handled first)
            if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
                return None;
            }

            // An open alert takes every key
            if state.alert.is_some() {
                return Some(match key.code {
                    KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Action::DismissAlert,
                    _ => Action::None,
                });
            }

            // Let the current panel handle the key first
            if let Some(action) = get_panel(state.view).handle_key(key, state) {
                return Some(action);
            }

            // Global fallback handling
            let action = match (key.code, state.view) {
                (KeyCode::Char('q'), View::Library) => return None,
                (KeyCode::Tab | KeyCode::BackTab, View::Library) => Action::ShowInvoke,
                (KeyCode::Tab | KeyCode::BackTab, View::Invoke) => Action::ShowLibrary,
                _ => Action::None,
            };
            Some(action)
        }
        // Bracketed paste goes into the focused field
        Event::Paste(text) => Some(Action::Paste(text.clone())),
        Event::Resize(..) => Some(Action::Redraw),
        _ => Some(Action::None),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::state::Alert;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn ctrl_q_quits_everywhere() {
        let mut state = State::new("http://localhost:8000");
        state.invoke.open("greet");
        state.view = View::Invoke;
        assert_eq!(handle_event(&press(KeyCode::Char('q'), KeyModifiers::CONTROL), &state), None);
    }

    #[test]
    fn plain_q_quits_only_from_prompt_list() {
        let mut state = State::new("http://localhost:8000");
        assert_eq!(handle_event(&press(KeyCode::Char('q'), KeyModifiers::NONE), &state), None);

        state.library.open_create();
        assert!(handle_event(&press(KeyCode::Char('q'), KeyModifiers::NONE), &state).is_some());
    }

    #[test]
    fn alert_swallows_keys_until_dismissed() {
        let mut state = State::new("http://localhost:8000");
        state.alert = Some(Alert::new("Invalid prompt", "x"));
        assert_eq!(handle_event(&press(KeyCode::Char('n'), KeyModifiers::NONE), &state), Some(Action::None));
        assert_eq!(handle_event(&press(KeyCode::Enter, KeyModifiers::NONE), &state), Some(Action::DismissAlert));
    }

    #[test]
    fn tab_switches_views() {
        let mut state = State::new("http://localhost:8000");
        assert_eq!(handle_event(&press(KeyCode::Tab, KeyModifiers::NONE), &state), Some(Action::ShowInvoke));
        state.invoke.open("greet");
        state.view = View::Invoke;
        assert_eq!(handle_event(&press(KeyCode::Tab, KeyModifiers::NONE), &state), Some(Action::ShowLibrary));
    }

    #[test]
    fn paste_is_forwarded() {
        let state = State::new("http://localhost:8000");
        assert_eq!(handle_event(&Event::Paste("{}".into()), &state), Some(Action::Paste("{}".into())));
    }
}
