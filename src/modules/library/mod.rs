mod render;
mod state;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::app::actions::{Action, TextEdit};
use crate::modules::{Panel, key_to_edit};
use crate::state::State;

pub use state::{Editor, EditorField, EditorMode, LibraryState, ListOutcome};

pub struct LibraryPanel;

impl Panel for LibraryPanel {
    fn title(&self, state: &State) -> String {
        format!("Prompts ({})", state.library.prompts.len())
    }

    fn handle_key(&self, key: &KeyEvent, state: &State) -> Option<Action> {
        let library = &state.library;

        if library.confirm_delete.is_some() {
            let action = match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::ConfirmDelete,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::CancelDelete,
                _ => Action::None,
            };
            return Some(action);
        }

        if let Some(editor) = &library.editor {
            return Some(handle_editor_key(key, editor));
        }

        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Action::SelectPrev,
            KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
            KeyCode::Char('n') | KeyCode::Char('a') => Action::NewPrompt,
            KeyCode::Char('e') => Action::EditSelected,
            KeyCode::Char('d') | KeyCode::Delete => Action::RequestDelete,
            KeyCode::Char('r') | KeyCode::F(5) => Action::RefreshList,
            KeyCode::Enter => Action::OpenInvoke(library.selected_prompt()?.path.clone()),
            KeyCode::Esc if library.banner.is_some() => Action::DismissBanner,
            _ => return None,
        };
        Some(action)
    }

    fn hints(&self, state: &State) -> Vec<(&'static str, &'static str)> {
        if state.library.confirm_delete.is_some() {
            vec![("y", "delete"), ("n", "cancel")]
        } else if state.library.editor.is_some() {
            vec![("^S", "save"), ("Tab", "next field"), ("Esc", "cancel")]
        } else {
            vec![("n", "new"), ("e", "edit"), ("d", "delete"), ("⏎", "invoke"), ("r", "refresh"), ("q", "quit")]
        }
    }

    fn render(&self, frame: &mut Frame, state: &State, area: Rect) {
        render::render_library(frame, state, &self.title(state), area);
    }
}

fn handle_editor_key(key: &KeyEvent, editor: &Editor) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Action::EditorCancel,
        KeyCode::Char('s') if ctrl => Action::EditorSave,
        KeyCode::Tab => Action::EditorNextField,
        KeyCode::BackTab => Action::EditorPrevField,
        KeyCode::Enter if editor.focus == EditorField::Path => Action::EditorNextField,
        KeyCode::Enter => Action::Edit(TextEdit::Newline),
        _ => key_to_edit(key).map(Action::Edit).unwrap_or(Action::None),
    }
}
