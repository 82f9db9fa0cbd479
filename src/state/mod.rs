use chrono::{DateTime, Local};

use crate::modules::invoke::InvokeState;
use crate::modules::library::LibraryState;

/// Which view fills the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Library,
    Invoke,
}

/// Blocking message dialog, dismissed with Enter or Esc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }
}

/// Whole console state. Only the UI thread touches it.
pub struct State {
    pub view: View,
    pub library: LibraryState,
    pub invoke: InvokeState,
    pub alert: Option<Alert>,
    /// Shown in the status bar
    pub base_url: String,
    /// Requests sent to the worker and not yet answered
    pub in_flight: usize,
    pub spinner_frame: usize,
    /// Last successful list refresh
    pub last_sync: Option<DateTime<Local>>,
    /// Needs a redraw
    pub dirty: bool,
}

impl State {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            view: View::Library,
            library: LibraryState::default(),
            invoke: InvokeState::default(),
            alert: None,
            base_url: base_url.into(),
            in_flight: 0,
            spinner_frame: 0,
            last_sync: None,
            dirty: true,
        }
    }
}
