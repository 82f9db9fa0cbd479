use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters allowed in a prompt path. Slashes are allowed inside the path
/// so prompts can be grouped (`summaries/daily`), just not as the first char.
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._/-]+$").expect("valid path regex"));

/// A prompt template record as stored by the prompt service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Unique key, also the URL segment the prompt is served under
    pub path: String,
    #[serde(default)]
    pub system_message: Option<String>,
    pub user_message: String,
}

impl Prompt {
    pub fn new(path: impl Into<String>, system_message: Option<String>, user_message: impl Into<String>) -> Self {
        Self { path: path.into(), system_message, user_message: user_message.into() }
    }

    /// Check every field before the record is sent to the service.
    pub fn validate(&self) -> Result<(), PromptError> {
        validate_path(&self.path)?;
        if self.user_message.is_empty() {
            return Err(PromptError::EmptyUserMessage);
        }
        Ok(())
    }

    /// System message with an empty template treated as absent
    pub fn system_message(&self) -> Option<&str> {
        self.system_message.as_deref().filter(|s| !s.is_empty())
    }
}

/// Reasons a draft prompt is refused before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    EmptyPath,
    LeadingSlash,
    InvalidPath,
    EmptyUserMessage,
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::EmptyPath => write!(f, "Please provide an endpoint for the prompt!"),
            PromptError::LeadingSlash => write!(f, "Don't start with the leading / when registering a prompt!"),
            PromptError::InvalidPath => write!(f, "Invalid endpoint path!"),
            PromptError::EmptyUserMessage => write!(f, "Please provide a user message for the prompt!"),
        }
    }
}

impl std::error::Error for PromptError {}

/// Validate a prompt path: non-empty, no leading `/`, restricted charset.
pub fn validate_path(path: &str) -> Result<(), PromptError> {
    if path.is_empty() {
        return Err(PromptError::EmptyPath);
    }
    if path.starts_with('/') {
        return Err(PromptError::LeadingSlash);
    }
    if !PATH_RE.is_match(path) {
        return Err(PromptError::InvalidPath);
    }
    Ok(())
}

/// Replace the prompt with the same path, or append it.
/// Returns true when the prompt was appended.
pub fn upsert(prompts: &mut Vec<Prompt>, prompt: Prompt) -> bool {
    match prompts.iter_mut().find(|p| p.path == prompt.path) {
        Some(existing) => {
            *existing = prompt;
            false
        }
        None => {
            prompts.push(prompt);
            true
        }
    }
}

/// Remove the prompt whose path matches exactly.
pub fn remove_by_path(prompts: &mut Vec<Prompt>, path: &str) -> Option<Prompt> {
    let idx = prompts.iter().position(|p| p.path == path)?;
    Some(prompts.remove(idx))
}
