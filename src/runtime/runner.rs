//! Runner binding an agent to a provider and a session store
//!
//! The runner owns one agent turn end to end:
//! - Appends the user's message to the session history
//! - Streams the provider response, yielding a partial event per text delta
//! - Records the aggregated reply in the session
//! - Yields a single final response event carrying the complete reply

use async_stream::stream;
use futures::stream::Stream;
use futures::StreamExt;
use pin_utils::pin_mut;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use super::agent::Agent;
use super::config::GenerationConfig;
use super::error::RuntimeError;
use super::event::RunEvent;
use super::provider::ModelProvider;
use super::session::InMemorySessionService;
use super::types::{Content, GenerateRequest, Role, StreamEvent};

/// Runs turns for a single agent against a session store
pub struct Runner {
    /// Agent being run
    agent: Agent,
    /// Application sessions are scoped to
    app_name: String,
    /// Session store holding conversation histories
    sessions: Arc<InMemorySessionService>,
    /// Model provider the agent speaks through
    provider: Box<dyn ModelProvider>,
    /// Generation parameters for every turn
    config: GenerationConfig,
}

impl Runner {
    /// Create a new runner with default generation parameters
    pub fn new(
        agent: Agent,
        app_name: impl Into<String>,
        sessions: Arc<InMemorySessionService>,
        provider: Box<dyn ModelProvider>,
    ) -> Self {
        Self {
            agent,
            app_name: app_name.into(),
            sessions,
            provider,
            config: GenerationConfig::default(),
        }
    }

    /// Set the generation parameters
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// The agent this runner runs
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Run one agent turn
    ///
    /// Appends `new_message` to the session history, then returns a stream of
    /// events: zero or more partial events followed by at most one final
    /// response event. A stream that ends without a final response means the
    /// provider closed the connection before finishing.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not registered.
    pub async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        new_message: Content,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<RunEvent, RuntimeError>> + Send + '_>>, RuntimeError>
    {
        self.sessions
            .append_content(&self.app_name, user_id, session_id, new_message)
            .await?;

        let stream = self.create_run_stream(user_id.to_string(), session_id.to_string());

        Ok(Box::pin(stream))
    }

    /// Create the event stream for one turn
    fn create_run_stream(
        &self,
        user_id: String,
        session_id: String,
    ) -> impl Stream<Item = Result<RunEvent, RuntimeError>> + Send + '_ {
        stream! {
            tracing::debug!(agent = %self.agent.name(), %session_id, "running agent turn");

            let history = match self
                .sessions
                .history(&self.app_name, &user_id, &session_id)
                .await
            {
                Ok(history) => history,
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            };

            let request = GenerateRequest {
                contents: history,
                system_instruction: Some(self.agent.instruction().to_string()),
                config: self.config.clone(),
            };

            let llm_stream = match self.provider.stream_generate(request).await {
                Ok(s) => s,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let mut reply_text = String::new();
            let mut message_id = Uuid::new_v4().to_string();

            pin_mut!(llm_stream);

            while let Some(event_result) = llm_stream.next().await {
                match event_result {
                    Ok(StreamEvent::MessageStart { id }) => {
                        message_id = id;
                    }
                    Ok(StreamEvent::TextDelta { text }) => {
                        reply_text.push_str(&text);
                        yield Ok(RunEvent::delta(self.agent.name(), text));
                    }
                    Ok(StreamEvent::MessageEnd {
                        finish_reason,
                        usage,
                    }) => {
                        // An empty reply still produces a final event, but is kept
                        // out of the history: the API rejects turns with no parts.
                        let content = if reply_text.is_empty() {
                            Content {
                                role: Role::Model,
                                parts: vec![],
                            }
                        } else {
                            let content = Content::model(reply_text.clone());
                            if let Err(e) = self
                                .sessions
                                .append_content(
                                    &self.app_name,
                                    &user_id,
                                    &session_id,
                                    content.clone(),
                                )
                                .await
                            {
                                yield Err(e.into());
                                return;
                            }
                            content
                        };

                        yield Ok(RunEvent::completed(
                            message_id,
                            self.agent.name(),
                            content,
                            finish_reason,
                            usage,
                        ));
                        return;
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }

            // Upstream closed without a MessageEnd; the turn has no final response.
        }
    }
}
