use std::fmt;

/// Typed error for calls to the prompt service.
///
/// Keeps transport failures apart from HTTP status failures so the views can
/// word their banners, while every variant still renders as one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection refused, DNS, timeout, unreadable body
    Network(String),
    /// Service answered with a non-success HTTP status
    Api { status: u16, body: String },
    /// Response body was not the JSON we expected
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Api { status, body } if body.is_empty() => write!(f, "API request failed ({})", status),
            ApiError::Api { status, body } => write!(f, "API request failed ({}): {}", status, body),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}
