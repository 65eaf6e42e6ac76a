//! Agent runtime
//!
//! This module provides the pieces for running a conversational agent against
//! Google's Gemini models: a provider abstraction over the streaming API, an
//! in-memory session store, and a runner that executes one turn at a time.

pub mod agent;
pub mod config;
pub mod error;
pub mod event;
pub mod gemini;
pub mod model;
pub mod provider;
pub mod runner;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use agent::Agent;
pub use config::GenerationConfig;
pub use error::{RuntimeError, SessionError};
pub use event::RunEvent;
pub use model::{GeminiModel, ModelError};
pub use provider::{create_provider, EventStream, ModelProvider};
pub use runner::Runner;
pub use session::{InMemorySessionService, Session};
pub use types::{Content, FinishReason, GenerateRequest, Part, Role, StreamEvent, UsageMetadata};
