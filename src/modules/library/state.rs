use pc_base::ApiError;
use pc_base::form::TextField;
use pc_base::prompt::{self, Prompt, PromptError};
use tracing::{debug, info, warn};

use crate::infra::worker::ApiRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Path,
    SystemMessage,
    UserMessage,
}

/// Draft form for a new prompt or for changes to an existing one
#[derive(Debug, Clone)]
pub struct Editor {
    pub mode: EditorMode,
    pub path: TextField,
    pub system_message: TextField,
    pub user_message: TextField,
    pub focus: EditorField,
    /// Path of the PUT in flight. Further saves and edits are ignored until it answers.
    pub saving: Option<String>,
}

impl Editor {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            path: TextField::input(),
            system_message: TextField::text_area(),
            user_message: TextField::text_area(),
            focus: EditorField::Path,
            saving: None,
        }
    }

    /// Pre-filled from `prompt`; the path is the key and stays read-only
    pub fn edit(prompt: &Prompt) -> Self {
        Self {
            mode: EditorMode::Edit,
            path: TextField::input().with_text(&prompt.path).read_only(),
            system_message: TextField::text_area().with_text(prompt.system_message.clone().unwrap_or_default()),
            user_message: TextField::text_area().with_text(&prompt.user_message),
            focus: EditorField::SystemMessage,
            saving: None,
        }
    }

    /// The record the form currently describes
    pub fn draft(&self) -> Prompt {
        let system = self.system_message.as_str();
        Prompt::new(
            self.path.as_str(),
            (!system.is_empty()).then(|| system.to_string()),
            self.user_message.as_str(),
        )
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            EditorField::Path => &mut self.path,
            EditorField::SystemMessage => &mut self.system_message,
            EditorField::UserMessage => &mut self.user_message,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match (self.focus, self.mode) {
            (EditorField::Path, _) => EditorField::SystemMessage,
            (EditorField::SystemMessage, _) => EditorField::UserMessage,
            (EditorField::UserMessage, EditorMode::Create) => EditorField::Path,
            (EditorField::UserMessage, EditorMode::Edit) => EditorField::SystemMessage,
        };
    }

    pub fn prev_field(&mut self) {
        self.focus = match (self.focus, self.mode) {
            (EditorField::UserMessage, _) => EditorField::SystemMessage,
            (EditorField::SystemMessage, EditorMode::Create) => EditorField::Path,
            (EditorField::SystemMessage, EditorMode::Edit) => EditorField::UserMessage,
            (EditorField::Path, _) => EditorField::UserMessage,
        };
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    fn validate(&self) -> Result<Prompt, PromptError> {
        let draft = self.draft();
        match self.mode {
            EditorMode::Create => draft.validate()?,
            // Stored paths are accepted as the service has them
            EditorMode::Edit if draft.user_message.is_empty() => return Err(PromptError::EmptyUserMessage),
            EditorMode::Edit => {}
        }
        Ok(draft)
    }
}

/// What became of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    Replaced,
    Failed,
    /// A newer list was already applied
    Ignored,
    /// Sent before a save or delete that is already folded in; fetch again
    Outdated,
}

/// Prompt manager view state
#[derive(Debug, Default)]
pub struct LibraryState {
    pub prompts: Vec<Prompt>,
    pub selected: usize,
    pub editor: Option<Editor>,
    /// Path awaiting delete confirmation
    pub confirm_delete: Option<String>,
    /// Paths with a DELETE in flight
    pub deleting: Vec<String>,
    /// Inline error from the last failed request
    pub banner: Option<String>,
    pub loading: bool,
    /// Bumped by every list request and every applied save or delete
    generation: u64,
    /// Generation of the last applied save or delete
    last_mutation: u64,
    /// Generation of the newest list applied
    last_listed: u64,
}

impl LibraryState {
    pub fn selected_prompt(&self) -> Option<&Prompt> {
        self.prompts.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.prompts.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.prompts.len().saturating_sub(1));
    }

    // ── list ────────────────────────────────────────────────────────

    pub fn begin_refresh(&mut self) -> ApiRequest {
        self.loading = true;
        self.generation += 1;
        ApiRequest::List { generation: self.generation }
    }

    fn mark_mutation(&mut self) {
        self.generation += 1;
        self.last_mutation = self.generation;
    }

    /// Fold in the list sent at `generation`. Responses older than the newest
    /// applied list are ignored, and a list sent before a local save or delete
    /// is reported `Outdated` rather than undoing that change.
    pub fn apply_listed(&mut self, generation: u64, result: Result<Vec<Prompt>, ApiError>) -> ListOutcome {
        if generation <= self.last_listed {
            debug!(generation, "dropping superseded prompt list");
            return ListOutcome::Ignored;
        }
        self.loading = false;
        match result {
            Ok(_) if generation < self.last_mutation => {
                debug!(generation, last_mutation = self.last_mutation, "prompt list predates a local change");
                ListOutcome::Outdated
            }
            Ok(prompts) => {
                let keep = self.selected_prompt().map(|p| p.path.clone());
                info!(count = prompts.len(), "prompt list loaded");
                self.prompts = prompts;
                self.selected = keep.and_then(|path| self.prompts.iter().position(|p| p.path == path)).unwrap_or(0);
                self.clamp_selection();
                self.banner = None;
                self.last_listed = generation;
                ListOutcome::Replaced
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch prompts");
                self.banner = Some(format!("Failed to fetch prompts: {}", e));
                ListOutcome::Failed
            }
        }
    }

    // ── create / edit ───────────────────────────────────────────────

    pub fn open_create(&mut self) {
        self.editor = Some(Editor::create());
    }

    pub fn open_edit(&mut self) {
        if let Some(prompt) = self.selected_prompt() {
            self.editor = Some(Editor::edit(prompt));
        }
    }

    /// Close the form and drop the draft
    pub fn cancel_editor(&mut self) {
        self.editor = None;
    }

    /// Validate the draft and build the PUT. Validation errors leave the
    /// form untouched; `Ok(None)` means there is nothing to save.
    pub fn submit_editor(&mut self) -> Result<Option<ApiRequest>, PromptError> {
        let Some(editor) = self.editor.as_mut() else { return Ok(None) };
        if editor.is_saving() {
            return Ok(None);
        }
        let prompt = editor.validate()?;
        editor.saving = Some(prompt.path.clone());
        Ok(Some(ApiRequest::Save { prompt, mode: editor.mode }))
    }

    pub fn apply_saved(&mut self, prompt: Prompt, mode: EditorMode, result: Result<(), ApiError>) {
        let for_open_editor = self.editor.as_ref().is_some_and(|e| e.saving.as_deref() == Some(prompt.path.as_str()));
        match result {
            Ok(()) => {
                info!(path = %prompt.path, ?mode, "prompt saved");
                self.mark_mutation();
                let path = prompt.path.clone();
                prompt::upsert(&mut self.prompts, prompt);
                if let Some(idx) = self.prompts.iter().position(|p| p.path == path) {
                    self.selected = idx;
                }
                if for_open_editor {
                    self.editor = None;
                }
                self.banner = None;
            }
            Err(e) => {
                warn!(path = %prompt.path, error = %e, "failed to save prompt");
                if for_open_editor && let Some(editor) = self.editor.as_mut() {
                    editor.saving = None;
                }
                let verb = if mode == EditorMode::Create { "create" } else { "update" };
                self.banner = Some(format!("Failed to {} prompt \"{}\": {}", verb, prompt.path, e));
            }
        }
    }

    // ── delete ──────────────────────────────────────────────────────

    pub fn request_delete(&mut self) {
        self.confirm_delete = self.selected_prompt().map(|p| p.path.clone());
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<ApiRequest> {
        let path = self.confirm_delete.take()?;
        if self.deleting.contains(&path) {
            return None;
        }
        self.deleting.push(path.clone());
        Some(ApiRequest::Delete { path })
    }

    pub fn apply_deleted(&mut self, path: &str, result: Result<(), ApiError>) {
        self.deleting.retain(|p| p != path);
        match result {
            Ok(()) => {
                info!(path, "prompt deleted");
                self.mark_mutation();
                prompt::remove_by_path(&mut self.prompts, path);
                self.clamp_selection();
                if self.editor.as_ref().is_some_and(|e| e.path.as_str() == path) {
                    self.editor = None;
                }
                self.banner = None;
            }
            Err(e) => {
                warn!(path, error = %e, "failed to delete prompt");
                self.banner = Some(format!("Failed to delete prompt \"{}\": {}", path, e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(path: &str) -> Prompt {
        Prompt::new(path, None, format!("user message for {}", path))
    }

    fn library(paths: &[&str]) -> LibraryState {
        LibraryState { prompts: paths.iter().map(|s| p(s)).collect(), ..LibraryState::default() }
    }

    fn api_500() -> ApiError {
        ApiError::Api { status: 500, body: "boom".into() }
    }

    fn type_into(field: &mut TextField, text: &str) {
        text.chars().for_each(|c| field.insert_char(c));
    }

    // ── validation happens before any request ─────────────────────

    #[test]
    fn leading_slash_is_rejected_without_request() {
        let mut lib = library(&[]);
        lib.open_create();
        let editor = lib.editor.as_mut().unwrap();
        type_into(&mut editor.path, "/greet");
        type_into(&mut editor.user_message, "hi");
        assert_eq!(lib.submit_editor(), Err(PromptError::LeadingSlash));
        assert!(!lib.editor.as_ref().unwrap().is_saving());
    }

    #[test]
    fn invalid_characters_are_rejected() {
        let mut lib = library(&[]);
        lib.open_create();
        let editor = lib.editor.as_mut().unwrap();
        type_into(&mut editor.path, "greet me");
        type_into(&mut editor.user_message, "hi");
        assert_eq!(lib.submit_editor(), Err(PromptError::InvalidPath));
    }

    #[test]
    fn empty_user_message_is_rejected_on_edit() {
        let mut lib = library(&["greet"]);
        lib.open_edit();
        lib.editor.as_mut().unwrap().user_message.clear();
        assert_eq!(lib.submit_editor(), Err(PromptError::EmptyUserMessage));
    }

    #[test]
    fn valid_create_builds_put_once() {
        let mut lib = library(&[]);
        lib.open_create();
        let editor = lib.editor.as_mut().unwrap();
        type_into(&mut editor.path, "greet");
        type_into(&mut editor.user_message, "Hello {{ name }}");
        let req = lib.submit_editor().unwrap();
        assert_eq!(
            req,
            Some(ApiRequest::Save { prompt: Prompt::new("greet", None, "Hello {{ name }}"), mode: EditorMode::Create })
        );
        // Second save while the first is in flight is ignored
        assert_eq!(lib.submit_editor(), Ok(None));
    }

    // ── successful PUT ────────────────────────────────────────────

    #[test]
    fn successful_create_appends_once_and_closes_form() {
        let mut lib = library(&["a"]);
        lib.open_create();
        let editor = lib.editor.as_mut().unwrap();
        type_into(&mut editor.path, "b");
        type_into(&mut editor.user_message, "hi");
        let Ok(Some(ApiRequest::Save { prompt, mode })) = lib.submit_editor() else { panic!("expected save") };

        lib.apply_saved(prompt.clone(), mode, Ok(()));
        assert_eq!(lib.prompts, vec![p("a"), prompt]);
        assert!(lib.editor.is_none());
        assert_eq!(lib.selected, 1);
    }

    #[test]
    fn successful_update_replaces_in_place() {
        let mut lib = library(&["a", "b", "c"]);
        lib.selected = 1;
        lib.open_edit();
        let editor = lib.editor.as_mut().unwrap();
        type_into(&mut editor.system_message, "be brief");
        let Ok(Some(ApiRequest::Save { prompt, mode })) = lib.submit_editor() else { panic!("expected save") };
        assert_eq!(mode, EditorMode::Edit);

        lib.apply_saved(prompt, mode, Ok(()));
        assert_eq!(lib.prompts.len(), 3);
        assert_eq!(lib.prompts[1].system_message.as_deref(), Some("be brief"));
        assert!(lib.editor.is_none());
    }

    #[test]
    fn create_with_existing_path_does_not_duplicate() {
        let mut lib = library(&["a"]);
        lib.apply_saved(Prompt::new("a", None, "new"), EditorMode::Create, Ok(()));
        assert_eq!(lib.prompts.len(), 1);
        assert_eq!(lib.prompts[0].user_message, "new");
    }

    // ── failed requests leave the list alone ──────────────────────

    #[test]
    fn failed_save_keeps_list_and_form() {
        let mut lib = library(&["a"]);
        lib.open_create();
        let editor = lib.editor.as_mut().unwrap();
        type_into(&mut editor.path, "b");
        type_into(&mut editor.user_message, "hi");
        let Ok(Some(ApiRequest::Save { prompt, mode })) = lib.submit_editor() else { panic!("expected save") };

        lib.apply_saved(prompt, mode, Err(api_500()));
        assert_eq!(lib.prompts, vec![p("a")]);
        let editor = lib.editor.as_ref().unwrap();
        assert!(!editor.is_saving());
        assert_eq!(editor.path.as_str(), "b");
        assert!(lib.banner.as_deref().unwrap().contains("Failed to create prompt \"b\""));
    }

    #[test]
    fn failed_save_unlocks_form_even_if_path_changed_meanwhile() {
        let mut lib = library(&[]);
        lib.open_create();
        let editor = lib.editor.as_mut().unwrap();
        type_into(&mut editor.path, "greet");
        type_into(&mut editor.user_message, "hi");
        let Ok(Some(ApiRequest::Save { prompt, mode })) = lib.submit_editor() else { panic!("expected save") };
        type_into(&mut lib.editor.as_mut().unwrap().path, "2");

        lib.apply_saved(prompt, mode, Err(api_500()));
        assert!(!lib.editor.as_ref().unwrap().is_saving());
        let Ok(Some(ApiRequest::Save { prompt, .. })) = lib.submit_editor() else { panic!("expected retry") };
        assert_eq!(prompt.path, "greet2");
    }

    #[test]
    fn successful_save_closes_form_even_if_path_changed_meanwhile() {
        let mut lib = library(&[]);
        lib.open_create();
        let editor = lib.editor.as_mut().unwrap();
        type_into(&mut editor.path, "greet");
        type_into(&mut editor.user_message, "hi");
        let Ok(Some(ApiRequest::Save { prompt, mode })) = lib.submit_editor() else { panic!("expected save") };
        type_into(&mut lib.editor.as_mut().unwrap().path, "2");

        lib.apply_saved(prompt, mode, Ok(()));
        assert!(lib.editor.is_none());
        assert_eq!(lib.prompts, vec![Prompt::new("greet", None, "hi")]);
    }

    #[test]
    fn failed_delete_keeps_list() {
        let mut lib = library(&["a", "b"]);
        lib.request_delete();
        let req = lib.confirm_delete().unwrap();
        assert_eq!(req, ApiRequest::Delete { path: "a".into() });
        lib.apply_deleted("a", Err(ApiError::Network("refused".into())));
        assert_eq!(lib.prompts, vec![p("a"), p("b")]);
        assert!(lib.banner.is_some());
        assert!(lib.deleting.is_empty());
    }

    #[test]
    fn failed_list_keeps_previous_prompts() {
        let mut lib = library(&["a"]);
        let ApiRequest::List { generation } = lib.begin_refresh() else { panic!("expected list") };
        assert_eq!(lib.apply_listed(generation, Err(api_500())), ListOutcome::Failed);
        assert_eq!(lib.prompts, vec![p("a")]);
        assert!(!lib.loading);
        assert!(lib.banner.as_deref().unwrap().starts_with("Failed to fetch prompts"));
    }

    // ── delete ────────────────────────────────────────────────────

    #[test]
    fn successful_delete_removes_exact_path() {
        let mut lib = library(&["a", "a/b", "ab"]);
        lib.selected = 2;
        lib.apply_deleted("a/b", Ok(()));
        let left: Vec<_> = lib.prompts.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(left, vec!["a", "ab"]);
        assert_eq!(lib.selected, 1);
    }

    #[test]
    fn cancelled_delete_sends_nothing() {
        let mut lib = library(&["a"]);
        lib.request_delete();
        assert_eq!(lib.confirm_delete.as_deref(), Some("a"));
        lib.cancel_delete();
        assert!(lib.confirm_delete().is_none());
    }

    #[test]
    fn delete_on_empty_list_asks_nothing() {
        let mut lib = library(&[]);
        lib.request_delete();
        assert!(lib.confirm_delete.is_none());
    }

    // ── list refresh ──────────────────────────────────────────────

    #[test]
    fn refresh_keeps_selected_path() {
        let mut lib = library(&["b", "c"]);
        lib.selected = 1;
        let ApiRequest::List { generation } = lib.begin_refresh() else { panic!("expected list") };
        assert_eq!(lib.apply_listed(generation, Ok(vec![p("a"), p("b"), p("c")])), ListOutcome::Replaced);
        assert_eq!(lib.selected_prompt().map(|p| p.path.as_str()), Some("c"));
    }

    #[test]
    fn list_sent_before_a_save_does_not_undo_it() {
        let mut lib = library(&["a"]);
        let ApiRequest::List { generation } = lib.begin_refresh() else { panic!("expected list") };
        lib.apply_saved(p("b"), EditorMode::Create, Ok(()));

        assert_eq!(lib.apply_listed(generation, Ok(vec![p("a")])), ListOutcome::Outdated);
        assert_eq!(lib.prompts, vec![p("a"), p("b")]);

        let ApiRequest::List { generation } = lib.begin_refresh() else { panic!("expected list") };
        assert_eq!(lib.apply_listed(generation, Ok(vec![p("a"), p("b")])), ListOutcome::Replaced);
    }

    #[test]
    fn list_sent_before_a_delete_does_not_restore_it() {
        let mut lib = library(&["a", "b"]);
        let ApiRequest::List { generation } = lib.begin_refresh() else { panic!("expected list") };
        lib.apply_deleted("b", Ok(()));
        assert_eq!(lib.apply_listed(generation, Ok(vec![p("a"), p("b")])), ListOutcome::Outdated);
        assert_eq!(lib.prompts, vec![p("a")]);
    }

    #[test]
    fn older_list_after_newer_one_is_ignored() {
        let mut lib = library(&[]);
        let ApiRequest::List { generation: first } = lib.begin_refresh() else { panic!("expected list") };
        let ApiRequest::List { generation: second } = lib.begin_refresh() else { panic!("expected list") };
        assert_eq!(lib.apply_listed(second, Ok(vec![p("a"), p("b")])), ListOutcome::Replaced);
        assert_eq!(lib.apply_listed(first, Ok(vec![p("a")])), ListOutcome::Ignored);
        assert_eq!(lib.prompts.len(), 2);
    }

    // ── editor focus ──────────────────────────────────────────────

    #[test]
    fn edit_mode_skips_read_only_path() {
        let mut editor = Editor::edit(&p("a"));
        assert_eq!(editor.focus, EditorField::SystemMessage);
        editor.next_field();
        editor.next_field();
        assert_eq!(editor.focus, EditorField::SystemMessage);
        editor.prev_field();
        assert_eq!(editor.focus, EditorField::UserMessage);
    }

    #[test]
    fn create_mode_cycles_all_fields() {
        let mut editor = Editor::create();
        editor.next_field();
        editor.next_field();
        editor.next_field();
        assert_eq!(editor.focus, EditorField::Path);
        editor.prev_field();
        assert_eq!(editor.focus, EditorField::UserMessage);
    }

    #[test]
    fn empty_system_message_is_sent_as_none() {
        let mut editor = Editor::create();
        type_into(&mut editor.path, "a");
        assert_eq!(editor.draft().system_message, None);
    }
}
