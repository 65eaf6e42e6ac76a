// Request/response envelopes for the chat API

use serde::{Deserialize, Serialize};

// Success reply for POST /new_chat
pub const NEW_SESSION_REPLY: &str = "New chat session started successfully.";

// Success reply for POST /change_ai_model
pub const MODEL_CHANGED_REPLY: &str = "AI model changed successfully.";

// Request Types
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeModelRequest {
    #[serde(default)]
    pub model: String,
}

// Response Types
//
// Every 200 from the API wraps its text in {"response": ...}; every error
// status wraps its text in {"detail": ...}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
