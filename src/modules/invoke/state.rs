use pc_base::form::TextField;
use pc_base::{ApiError, Prompt};
use tracing::{info, warn};

use crate::infra::worker::ApiRequest;

/// Shown when the service answers with an empty body
pub const NO_RESULT: &str = "No result returned";

/// What we know about the templates behind the current path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplatePreview {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Prompt),
    Unavailable(String),
}

/// Prompt caller view state
#[derive(Debug)]
pub struct InvokeState {
    pub path: String,
    pub input: TextField,
    pub response: Option<String>,
    /// Pretty-printed response when it parses as JSON
    pub formatted: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
    pub template: TemplatePreview,
    /// First visible line of the response pane
    pub scroll: u16,
}

impl Default for InvokeState {
    fn default() -> Self {
        Self {
            path: String::new(),
            input: TextField::text_area(),
            response: None,
            formatted: None,
            error: None,
            loading: false,
            template: TemplatePreview::NotLoaded,
            scroll: 0,
        }
    }
}

impl InvokeState {
    /// Point the view at `path` and ask for its templates. Reopening the same
    /// path keeps the typed input and the last response.
    pub fn open(&mut self, path: &str) -> ApiRequest {
        if self.path != path {
            *self = Self { path: path.to_string(), ..Self::default() };
        }
        self.template = TemplatePreview::Loading;
        ApiRequest::Fetch { path: path.to_string() }
    }

    pub fn can_submit(&self) -> bool {
        !self.path.is_empty() && !self.input.is_empty() && !self.loading
    }

    /// Clear the last outcome and build the POST, or None while disabled
    pub fn submit(&mut self) -> Option<ApiRequest> {
        if !self.can_submit() {
            return None;
        }
        self.response = None;
        self.formatted = None;
        self.error = None;
        self.scroll = 0;
        self.loading = true;
        Some(ApiRequest::Invoke { path: self.path.clone(), input: self.input.as_str().to_string() })
    }

    pub fn apply_invoked(&mut self, path: &str, result: Result<String, ApiError>) {
        if path != self.path {
            return;
        }
        self.loading = false;
        match result {
            Ok(body) => {
                info!(path, bytes = body.len(), "prompt invoked");
                self.formatted = pretty_json(&body);
                self.response = Some(if body.is_empty() { NO_RESULT.to_string() } else { body });
            }
            Err(e) => {
                warn!(path, error = %e, "prompt invocation failed");
                self.error = Some(format!("Error: {}", e));
            }
        }
    }

    pub fn apply_fetched(&mut self, path: &str, result: Result<Prompt, ApiError>) {
        if path != self.path {
            return;
        }
        self.template = match result {
            Ok(prompt) => TemplatePreview::Loaded(prompt),
            Err(e) => TemplatePreview::Unavailable(e.to_string()),
        };
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    /// Text for the response pane
    pub fn display_text(&self) -> Option<&str> {
        self.formatted.as_deref().or(self.response.as_deref())
    }

    pub fn scroll_down(&mut self, amount: u16) {
        let lines = self.display_text().map(|r| r.lines().count()).unwrap_or(0) as u16;
        self.scroll = self.scroll.saturating_add(amount).min(lines.saturating_sub(1));
    }
}

/// Pretty-print `body` if it is a JSON object or array
fn pretty_json(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    if !(value.is_object() || value.is_array()) {
        return None;
    }
    serde_json::to_string_pretty(&value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(path: &str, input: &str) -> InvokeState {
        let mut s = InvokeState::default();
        s.open(path);
        s.input.insert_str(input);
        s
    }

    #[test]
    fn open_requests_templates() {
        let mut s = InvokeState::default();
        assert_eq!(s.open("greet"), ApiRequest::Fetch { path: "greet".into() });
        assert_eq!(s.template, TemplatePreview::Loading);
    }

    #[test]
    fn submit_disabled_for_empty_input() {
        let mut s = opened("greet", "");
        assert!(!s.can_submit());
        assert!(s.submit().is_none());
    }

    #[test]
    fn submit_disabled_while_loading() {
        let mut s = opened("greet", "{}");
        assert!(s.submit().is_some());
        assert!(s.loading);
        assert!(s.submit().is_none());
    }

    #[test]
    fn submit_forwards_input_verbatim_and_clears_previous_outcome() {
        let mut s = opened("summaries/daily", "{\"text\": \"hi\"}");
        s.response = Some("old".into());
        s.error = Some("Error: old".into());
        let req = s.submit().unwrap();
        assert_eq!(req, ApiRequest::Invoke { path: "summaries/daily".into(), input: "{\"text\": \"hi\"}".into() });
        assert!(s.response.is_none());
        assert!(s.error.is_none());
    }

    #[test]
    fn empty_body_shows_placeholder() {
        let mut s = opened("greet", "{}");
        s.submit();
        s.apply_invoked("greet", Ok(String::new()));
        assert_eq!(s.response.as_deref(), Some(NO_RESULT));
        assert!(!s.loading);
    }

    #[test]
    fn api_failure_sets_error_banner() {
        let mut s = opened("greet", "{}");
        s.submit();
        s.apply_invoked("greet", Err(ApiError::Api { status: 400, body: "don't curse pls".into() }));
        assert_eq!(s.error.as_deref(), Some("Error: API request failed (400): don't curse pls"));
        assert!(s.response.is_none());
    }

    #[test]
    fn response_for_other_path_is_dropped() {
        let mut s = opened("greet", "{}");
        s.submit();
        s.apply_invoked("other", Ok("x".into()));
        assert!(s.loading);
        assert!(s.response.is_none());
    }

    #[test]
    fn reopening_same_path_keeps_input() {
        let mut s = opened("greet", "{\"a\":1}");
        s.open("greet");
        assert_eq!(s.input.as_str(), "{\"a\":1}");
        s.open("other");
        assert!(s.input.is_empty());
    }

    #[test]
    fn fetch_failure_marks_preview_unavailable() {
        let mut s = opened("greet", "");
        s.apply_fetched("greet", Err(ApiError::Api { status: 404, body: String::new() }));
        assert_eq!(s.template, TemplatePreview::Unavailable("API request failed (404)".into()));
    }

    #[test]
    fn json_response_is_pretty_printed_raw_kept() {
        let mut s = opened("greet", "{}");
        s.submit();
        s.apply_invoked("greet", Ok(r#"{"user_message":"Hello"}"#.into()));
        assert_eq!(s.response.as_deref(), Some(r#"{"user_message":"Hello"}"#));
        assert_eq!(s.display_text(), Some("{\n  \"user_message\": \"Hello\"\n}"));
    }

    #[test]
    fn plain_text_response_is_shown_raw() {
        let mut s = opened("greet", "{}");
        s.submit();
        s.apply_invoked("greet", Ok("42".into()));
        assert_eq!(s.display_text(), Some("42"));
    }

    #[test]
    fn scroll_is_clamped_to_response() {
        let mut s = opened("greet", "{}");
        s.response = Some("1\n2\n3".into());
        s.scroll_down(10);
        assert_eq!(s.scroll, 2);
        s.scroll_up(5);
        assert_eq!(s.scroll, 0);
    }
}
