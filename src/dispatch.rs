// Drives one chat turn against the bound agent and extracts the reply text

use futures::StreamExt;
use thiserror::Error;

use crate::runtime::{Content, Runner, RuntimeError};

// Reply for an empty user message; the model is not consulted.
pub const EMPTY_MESSAGE_REPLY: &str = "Please enter a message.";

// Reply when the final response carries no text.
pub const MISSING_CONTENT_REPLY: &str = "I didn't get a clear response.";

// Reply when the turn ends without a final response.
pub const MISSING_FINAL_REPLY: &str = "The chatbot did not provide a final response.";

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Chatbot internal error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Run one chat turn and return the reply text.
///
/// Partial events are discarded; the reply is read from the turn's final
/// response event. Each fallback reply above covers one way a turn can end
/// without usable text.
pub async fn dispatch(
    runner: &Runner,
    user_id: &str,
    session_id: &str,
    message: &str,
) -> Result<String, DispatchError> {
    if message.is_empty() {
        return Ok(EMPTY_MESSAGE_REPLY.to_string());
    }

    tracing::info!(model = %runner.agent().model(), %session_id, "dispatching chat turn");

    let mut events = runner
        .run(user_id, session_id, Content::user(message))
        .await?;

    while let Some(event) = events.next().await {
        let event = event?;
        if event.is_final_response() {
            let reply = event
                .first_text()
                .map(str::to_string)
                .unwrap_or_else(|| MISSING_CONTENT_REPLY.to_string());
            return Ok(reply);
        }
        tracing::debug!(author = %event.author, "discarding partial event");
    }

    Ok(MISSING_FINAL_REPLY.to_string())
}
