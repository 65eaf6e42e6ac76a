//! Events yielded while running an agent turn

use uuid::Uuid;

use super::types::{Content, FinishReason, UsageMetadata};

/// A single event in an agent turn
///
/// A turn yields zero or more partial events (one per streamed text delta)
/// followed by at most one final response event carrying the complete reply.
#[derive(Debug, Clone)]
pub struct RunEvent {
    /// Unique event id
    pub id: String,
    /// Name of the agent that produced the event
    pub author: String,
    /// Content carried by the event
    pub content: Option<Content>,
    /// Whether this is an incremental fragment of the reply
    pub partial: bool,
    /// Why generation stopped (final events only)
    pub finish_reason: Option<FinishReason>,
    /// Token usage (final events only)
    pub usage: Option<UsageMetadata>,
}

impl RunEvent {
    /// Create a partial event carrying one streamed text fragment
    pub fn delta(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author: author.into(),
            content: Some(Content::model(text)),
            partial: true,
            finish_reason: None,
            usage: None,
        }
    }

    /// Create the final response event for a turn
    pub fn completed(
        id: impl Into<String>,
        author: impl Into<String>,
        content: Content,
        finish_reason: FinishReason,
        usage: UsageMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            content: Some(content),
            partial: false,
            finish_reason: Some(finish_reason),
            usage: Some(usage),
        }
    }

    /// Whether this event carries the turn's complete reply
    pub fn is_final_response(&self) -> bool {
        !self.partial
    }

    /// Text of the first text part of the content, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content.as_ref().and_then(Content::first_text)
    }
}
