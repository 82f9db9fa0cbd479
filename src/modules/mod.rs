pub mod invoke;
pub mod library;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::app::actions::{Action, TextEdit};
use crate::state::{State, View};

pub use invoke::InvokePanel;
pub use library::LibraryPanel;

/// A view that fills the body area
pub trait Panel {
    /// Title shown in the header tab and the body border
    fn title(&self, state: &State) -> String;

    /// Handle keyboard input for this panel.
    /// Returns None to fall through to global key handling.
    fn handle_key(&self, key: &KeyEvent, state: &State) -> Option<Action>;

    /// Key hints for the status bar, as (key, description) pairs
    fn hints(&self, state: &State) -> Vec<(&'static str, &'static str)>;

    fn render(&self, frame: &mut Frame, state: &State, area: Rect);
}

pub fn get_panel(view: View) -> Box<dyn Panel> {
    match view {
        View::Library => Box::new(LibraryPanel),
        View::Invoke => Box::new(InvokePanel),
    }
}

/// Map a key to a text-field edit. Enter is left to the caller.
pub fn key_to_edit(key: &KeyEvent) -> Option<TextEdit> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let edit = match key.code {
        KeyCode::Char(c) => TextEdit::Insert(c),
        KeyCode::Backspace => TextEdit::Backspace,
        KeyCode::Delete => TextEdit::Delete,
        KeyCode::Left => TextEdit::Left,
        KeyCode::Right => TextEdit::Right,
        KeyCode::Home => TextEdit::Home,
        KeyCode::End => TextEdit::End,
        KeyCode::Up => TextEdit::Up,
        KeyCode::Down => TextEdit::Down,
        _ => return None,
    };
    Some(edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_chars_become_inserts() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::SHIFT);
        assert_eq!(key_to_edit(&key), Some(TextEdit::Insert('x')));
    }

    #[test]
    fn ctrl_chords_are_not_text() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(key_to_edit(&key), None);
        assert_eq!(key_to_edit(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), None);
    }
}
