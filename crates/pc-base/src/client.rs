use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::constants::{ERROR_BODY_MAX_BYTES, JSON_CONTENT_TYPE};
use crate::error::ApiError;
use crate::prompt::Prompt;

/// Blocking client for the prompt service.
///
/// Every call is a single request: no retries, no caching. Cheap to share
/// behind an `Arc` between request threads.
pub struct PromptClient {
    client: Client,
    base_url: String,
}

impl PromptClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let mut builder = Client::builder().timeout(timeout);
        // A system proxy would swallow requests meant for a service on this machine
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a prompt path (the service root for an empty path).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET /`: every registered prompt.
    pub fn list(&self) -> Result<Vec<Prompt>, ApiError> {
        let body = self.send("GET", "", self.client.get(self.endpoint("")))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /{path}`: a single prompt record.
    pub fn get(&self, path: &str) -> Result<Prompt, ApiError> {
        let body = self.send("GET", path, self.client.get(self.endpoint(path)))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `PUT /{path}`: create or replace the prompt keyed by its path.
    pub fn put(&self, prompt: &Prompt) -> Result<(), ApiError> {
        let body = serde_json::to_string(prompt)?;
        self.send("PUT", &prompt.path, self.client.put(self.endpoint(&prompt.path)).body(body))?;
        Ok(())
    }

    /// `DELETE /{path}`
    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send("DELETE", path, self.client.delete(self.endpoint(path)))?;
        Ok(())
    }

    /// `POST /{path}`: forward `input` verbatim and return the raw response text.
    pub fn invoke(&self, path: &str, input: &str) -> Result<String, ApiError> {
        self.send("POST", path, self.client.post(self.endpoint(path)).body(input.to_string()))
    }

    /// Send with the JSON content type and map non-2xx statuses to `ApiError::Api`.
    fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<String, ApiError> {
        debug!(method, path, "prompt service request");
        let response = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).send().inspect_err(|e| {
            warn!(method, path, error = %e, "prompt service unreachable");
        })?;

        let status = response.status();
        let body = response.text()?;
        if status.is_success() {
            debug!(method, path, status = status.as_u16(), bytes = body.len(), "prompt service response");
            return Ok(body);
        }

        warn!(method, path, status = status.as_u16(), "prompt service returned an error");
        Err(ApiError::Api { status: status.as_u16(), body: truncate(&body, ERROR_BODY_MAX_BYTES).to_string() })
    }
}

fn is_loopback(base_url: &str) -> bool {
    Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]")))
        .unwrap_or(false)
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
