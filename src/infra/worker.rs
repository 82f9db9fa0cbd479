//! Background execution of prompt service calls.
//!
//! Each request runs on its own thread and reports back over an mpsc channel
//! that the event loop drains between frames.
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use pc_base::{ApiError, Prompt, PromptClient};
use tracing::debug;

use crate::modules::library::EditorMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// `generation` orders list responses against local saves and deletes
    List { generation: u64 },
    Fetch { path: String },
    Save { prompt: Prompt, mode: EditorMode },
    Delete { path: String },
    Invoke { path: String, input: String },
}

impl ApiRequest {
    pub fn label(&self) -> &'static str {
        match self {
            ApiRequest::List { .. } => "list",
            ApiRequest::Fetch { .. } => "fetch",
            ApiRequest::Save { .. } => "save",
            ApiRequest::Delete { .. } => "delete",
            ApiRequest::Invoke { .. } => "invoke",
        }
    }
}

#[derive(Debug)]
pub enum ApiResponse {
    Listed { generation: u64, result: Result<Vec<Prompt>, ApiError> },
    Fetched { path: String, result: Result<Prompt, ApiError> },
    Saved { prompt: Prompt, mode: EditorMode, result: Result<(), ApiError> },
    Deleted { path: String, result: Result<(), ApiError> },
    Invoked { path: String, result: Result<String, ApiError> },
}

/// Run one request to completion on the calling thread.
pub fn execute(client: &PromptClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::List { generation } => ApiResponse::Listed { generation, result: client.list() },
        ApiRequest::Fetch { path } => {
            let result = client.get(&path);
            ApiResponse::Fetched { path, result }
        }
        ApiRequest::Save { prompt, mode } => {
            let result = client.put(&prompt);
            ApiResponse::Saved { prompt, mode, result }
        }
        ApiRequest::Delete { path } => {
            let result = client.delete(&path);
            ApiResponse::Deleted { path, result }
        }
        ApiRequest::Invoke { path, input } => {
            let result = client.invoke(&path, &input);
            ApiResponse::Invoked { path, result }
        }
    }
}

pub fn spawn_request(client: Arc<PromptClient>, request: ApiRequest, tx: Sender<ApiResponse>) {
    let label = request.label();
    thread::spawn(move || {
        let response = execute(&client, request);
        if tx.send(response).is_err() {
            // Receiver is gone: the console is shutting down
            debug!(request = label, "dropping response after shutdown");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    fn unreachable_client() -> Arc<PromptClient> {
        // Nothing listens on the discard port
        Arc::new(PromptClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap())
    }

    #[test]
    fn transport_failure_comes_back_as_network_error() {
        let (tx, rx) = mpsc::channel();
        spawn_request(unreachable_client(), ApiRequest::Delete { path: "greet".into() }, tx);
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            ApiResponse::Deleted { path, result } => {
                assert_eq!(path, "greet");
                assert!(matches!(result, Err(ApiError::Network(_))));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn labels_name_the_operation() {
        assert_eq!(ApiRequest::List { generation: 1 }.label(), "list");
        assert_eq!(ApiRequest::Invoke { path: "a".into(), input: "{}".into() }.label(), "invoke");
    }
}
