//! Provider trait for model implementations

use async_trait::async_trait;
use futures::stream::Stream;
use secrecy::SecretString;
use std::pin::Pin;

use super::{
    error::RuntimeError,
    gemini::GeminiClient,
    model::GeminiModel,
    types::{GenerateRequest, StreamEvent},
};

/// Stream of incremental generation events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, RuntimeError>> + Send>>;

/// Main interface that all model provider implementations must satisfy
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Stream generate content from the model
    ///
    /// This method sends a request to the model and returns a stream of events
    /// representing the incremental response.
    ///
    /// # Arguments
    /// * `request` - The generation request with contents, instructions, and config
    ///
    /// # Returns
    /// A pinned boxed stream of `StreamEvent` results, or an error if the request fails
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, RuntimeError>;
}

/// Create a model provider for a registered Gemini model
///
/// # Arguments
///
/// * `model` - The Gemini model to use
/// * `api_key` - API key for the Gemini API
///
/// # Returns
///
/// A boxed trait object implementing `ModelProvider`, or an error if client creation fails
pub fn create_provider(
    model: GeminiModel,
    api_key: SecretString,
) -> Result<Box<dyn ModelProvider>, RuntimeError> {
    let client = GeminiClient::new(api_key, model)?;
    Ok(Box::new(client))
}
