pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod prompt;
pub mod theme;
pub mod ui;

pub use client::PromptClient;
pub use error::ApiError;
pub use prompt::{Prompt, PromptError};
