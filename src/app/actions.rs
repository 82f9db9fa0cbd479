use chrono::Local;
use pc_base::form::TextField;

use crate::infra::worker::{ApiRequest, ApiResponse};
use crate::modules::library::ListOutcome;
use crate::state::{Alert, State, View};

/// Cursor movement and editing inside the focused text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Redraw,
    DismissAlert,
    ShowLibrary,
    ShowInvoke,
    OpenInvoke(String),
    // Library
    RefreshList,
    SelectPrev,
    SelectNext,
    NewPrompt,
    EditSelected,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    DismissBanner,
    // Editor
    EditorNextField,
    EditorPrevField,
    EditorSave,
    EditorCancel,
    // Text input
    Edit(TextEdit),
    Paste(String),
    // Invoke
    InvokeSubmit,
    InvokeReloadTemplate,
    ScrollUp(u16),
    ScrollDown(u16),
}

/// What the event loop has to do after an action
#[derive(Debug, PartialEq, Eq)]
pub enum ActionResult {
    Nothing,
    Request(ApiRequest),
}

impl From<Option<ApiRequest>> for ActionResult {
    fn from(request: Option<ApiRequest>) -> Self {
        request.map(ActionResult::Request).unwrap_or(ActionResult::Nothing)
    }
}

pub fn apply_action(state: &mut State, action: Action) -> ActionResult {
    state.dirty = true;
    match action {
        Action::None | Action::Redraw => ActionResult::Nothing,
        Action::DismissAlert => {
            state.alert = None;
            ActionResult::Nothing
        }
        Action::ShowLibrary => {
            state.view = View::Library;
            ActionResult::Nothing
        }
        Action::ShowInvoke => {
            if !state.invoke.path.is_empty() {
                state.view = View::Invoke;
            }
            ActionResult::Nothing
        }
        Action::OpenInvoke(path) => {
            state.view = View::Invoke;
            ActionResult::Request(state.invoke.open(&path))
        }
        Action::RefreshList => ActionResult::Request(state.library.begin_refresh()),
        Action::SelectPrev => {
            state.library.select_prev();
            ActionResult::Nothing
        }
        Action::SelectNext => {
            state.library.select_next();
            ActionResult::Nothing
        }
        Action::NewPrompt => {
            state.library.open_create();
            ActionResult::Nothing
        }
        Action::EditSelected => {
            state.library.open_edit();
            ActionResult::Nothing
        }
        Action::RequestDelete => {
            state.library.request_delete();
            ActionResult::Nothing
        }
        Action::ConfirmDelete => state.library.confirm_delete().into(),
        Action::CancelDelete => {
            state.library.cancel_delete();
            ActionResult::Nothing
        }
        Action::DismissBanner => {
            state.library.banner = None;
            ActionResult::Nothing
        }
        Action::EditorNextField => {
            if let Some(editor) = state.library.editor.as_mut() {
                editor.next_field();
            }
            ActionResult::Nothing
        }
        Action::EditorPrevField => {
            if let Some(editor) = state.library.editor.as_mut() {
                editor.prev_field();
            }
            ActionResult::Nothing
        }
        Action::EditorSave => match state.library.submit_editor() {
            Ok(request) => request.into(),
            Err(e) => {
                state.alert = Some(Alert::new("Invalid prompt", e.to_string()));
                ActionResult::Nothing
            }
        },
        Action::EditorCancel => {
            state.library.cancel_editor();
            ActionResult::Nothing
        }
        Action::Edit(edit) => {
            if let Some(field) = focused_field(state) {
                apply_text_edit(field, edit);
            }
            ActionResult::Nothing
        }
        Action::Paste(text) => {
            if let Some(field) = focused_field(state) {
                field.insert_str(&text);
            }
            ActionResult::Nothing
        }
        Action::InvokeSubmit => state.invoke.submit().into(),
        Action::InvokeReloadTemplate => {
            if state.invoke.path.is_empty() {
                return ActionResult::Nothing;
            }
            let path = state.invoke.path.clone();
            ActionResult::Request(state.invoke.open(&path))
        }
        Action::ScrollUp(amount) => {
            state.invoke.scroll_up(amount);
            ActionResult::Nothing
        }
        Action::ScrollDown(amount) => {
            state.invoke.scroll_down(amount);
            ActionResult::Nothing
        }
    }
}

/// Fold a worker response back into the state. A list that predates a local
/// change comes back as a fresh list request.
pub fn apply_response(state: &mut State, response: ApiResponse) -> ActionResult {
    state.in_flight = state.in_flight.saturating_sub(1);
    state.dirty = true;
    match response {
        ApiResponse::Listed { generation, result } => match state.library.apply_listed(generation, result) {
            ListOutcome::Replaced => state.last_sync = Some(Local::now()),
            ListOutcome::Outdated => return ActionResult::Request(state.library.begin_refresh()),
            ListOutcome::Failed | ListOutcome::Ignored => {}
        },
        ApiResponse::Fetched { path, result } => state.invoke.apply_fetched(&path, result),
        ApiResponse::Saved { prompt, mode, result } => state.library.apply_saved(prompt, mode, result),
        ApiResponse::Deleted { path, result } => state.library.apply_deleted(&path, result),
        ApiResponse::Invoked { path, result } => state.invoke.apply_invoked(&path, result),
    }
    ActionResult::Nothing
}

/// The field keystrokes go to, if any. The editor is frozen while its save is in flight.
fn focused_field(state: &mut State) -> Option<&mut TextField> {
    if state.alert.is_some() {
        return None;
    }
    match state.view {
        View::Library => state.library.editor.as_mut().filter(|e| !e.is_saving()).map(|e| e.focused_mut()),
        View::Invoke => Some(&mut state.invoke.input),
    }
}

fn apply_text_edit(field: &mut TextField, edit: TextEdit) {
    match edit {
        TextEdit::Insert(c) => field.insert_char(c),
        TextEdit::Newline => field.insert_char('\n'),
        TextEdit::Backspace => field.backspace(),
        TextEdit::Delete => field.delete(),
        TextEdit::Left => field.move_left(),
        TextEdit::Right => field.move_right(),
        TextEdit::Home => field.move_home(),
        TextEdit::End => field.move_end(),
        TextEdit::Up => field.move_up(),
        TextEdit::Down => field.move_down(),
    }
}
