mod render;
mod state;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use pc_base::constants::SCROLL_PAGE_AMOUNT;

use crate::app::actions::{Action, TextEdit};
use crate::modules::{Panel, key_to_edit};
use crate::state::State;

pub use state::{InvokeState, TemplatePreview};

pub struct InvokePanel;

impl Panel for InvokePanel {
    fn title(&self, state: &State) -> String {
        if state.invoke.path.is_empty() { "Invoke".to_string() } else { format!("/{}", state.invoke.path) }
    }

    fn handle_key(&self, key: &KeyEvent, state: &State) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Esc => Action::ShowLibrary,
            KeyCode::Char('s') if ctrl => Action::InvokeSubmit,
            KeyCode::Enter if ctrl || key.modifiers.contains(KeyModifiers::ALT) => Action::InvokeSubmit,
            KeyCode::Char('r') if ctrl => Action::InvokeReloadTemplate,
            KeyCode::PageUp => Action::ScrollUp(SCROLL_PAGE_AMOUNT),
            KeyCode::PageDown => Action::ScrollDown(SCROLL_PAGE_AMOUNT),
            _ if state.invoke.path.is_empty() => return None,
            KeyCode::Enter => Action::Edit(TextEdit::Newline),
            _ => Action::Edit(key_to_edit(key)?),
        };
        Some(action)
    }

    fn hints(&self, _state: &State) -> Vec<(&'static str, &'static str)> {
        vec![("^S", "submit"), ("^R", "reload"), ("PgUp/PgDn", "scroll"), ("Esc", "prompts")]
    }

    fn render(&self, frame: &mut Frame, state: &State, area: Rect) {
        render::render_invoke(frame, &state.invoke, &self.title(state), area);
    }
}
