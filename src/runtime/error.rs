//! Error types for the agent runtime

use thiserror::Error;

/// Errors that can occur while running an agent turn
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// HTTP request failures
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// SSE stream parsing failures
    #[error("Stream error: {0}")]
    StreamError(String),

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Errors reported by the model provider itself
    #[error("Provider error ({code}): {message}")]
    ProviderError { code: String, message: String },

    /// Session store failures
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),
}

/// Errors from the session store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A session with this id is already registered
    #[error("session '{0}' already exists")]
    AlreadyExists(String),

    /// No session registered under this id
    #[error("session '{0}' not found")]
    NotFound(String),
}

// Implement conversion from common error types
impl From<serde_json::Error> for RuntimeError {
    fn from(err: serde_json::Error) -> Self {
        RuntimeError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for RuntimeError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RuntimeError::HttpError {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            RuntimeError::HttpError {
                status: 0,
                body: err.to_string(),
            }
        }
    }
}
