//! Gemini client implementation

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::runtime::{
    error::RuntimeError,
    model::GeminiModel,
    provider::{EventStream, ModelProvider},
    types::GenerateRequest,
};

use super::mapper::{create_message_start, from_gemini_response, to_gemini_request};
use super::sse::parse_sse_stream;
use super::types as wire;

/// Default endpoint for the Gemini API
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for interacting with Gemini models over the Gemini API
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// building the request headers; it never appears in logs or error output.
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key for the Gemini API
    api_key: SecretString,
    /// Model to use
    model: GeminiModel,
    /// Endpoint base, overridable for tests and proxies
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for the Gemini API
    /// * `model` - Gemini model to use
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: SecretString, model: GeminiModel) -> Result<Self, RuntimeError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| RuntimeError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            model,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Override the endpoint base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The model this client talks to
    pub fn model(&self) -> GeminiModel {
        self.model
    }

    /// Build the endpoint URL for streaming
    fn endpoint_url(&self) -> String {
        format!(
            "{}/{}:streamGenerateContent?alt=sse",
            self.base_url,
            self.model.as_str()
        )
    }

    /// Make a streaming request to Gemini
    async fn make_streaming_request(
        &self,
        request: GenerateRequest,
    ) -> Result<EventStream, RuntimeError> {
        // Convert to Gemini request format
        let gemini_request = to_gemini_request(request);

        // Build request
        let url = self.endpoint_url();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        // Check status
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(error_from_response(status.as_u16(), body));
        }

        // Parse SSE stream
        let byte_stream = response.bytes_stream();
        let sse_stream = parse_sse_stream(Box::pin(byte_stream));

        // Convert to StreamEvent stream
        let message_id = Uuid::new_v4().to_string();
        let mut emitted_start = false;

        let event_stream = sse_stream.map(move |result| match result {
            Ok(gemini_response) => {
                let mut events = Vec::new();

                // Emit message start on first chunk
                if !emitted_start {
                    events.push(create_message_start(message_id.clone()));
                    emitted_start = true;
                }

                // Convert Gemini response to our events
                events.extend(from_gemini_response(gemini_response));

                Ok(events)
            }
            Err(e) => Err(e),
        });

        // Flatten the stream of event vectors into individual events
        let flattened = event_stream.flat_map(|result| {
            futures::stream::iter(match result {
                Ok(events) => events.into_iter().map(Ok).collect::<Vec<_>>(),
                Err(e) => vec![Err(e)],
            })
        });

        Ok(Box::pin(flattened))
    }
}

/// Turn a non-2xx response into a runtime error
///
/// The Gemini API wraps failures in a JSON envelope; fall back to the raw
/// body when the envelope does not parse.
fn error_from_response(status: u16, body: String) -> RuntimeError {
    match serde_json::from_str::<wire::ErrorResponse>(&body) {
        Ok(envelope) => RuntimeError::ProviderError {
            code: envelope
                .error
                .status
                .unwrap_or_else(|| status.to_string()),
            message: envelope
                .error
                .message
                .unwrap_or_else(|| "unknown provider error".to_string()),
        },
        Err(_) => RuntimeError::HttpError { status, body },
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, RuntimeError> {
        self.make_streaming_request(request).await
    }
}
