//! Shared application state
//!
//! Holds the current runner and session binding. Chat turns run against an
//! immutable snapshot taken at dispatch time, so swapping either binding
//! never blocks or tears an in-flight turn; a turn that raced a swap simply
//! completes against the binding it started with.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::runtime::{
    create_provider, Agent, GeminiModel, InMemorySessionService, ModelProvider, Runner,
    RuntimeError, SessionError,
};
use crate::settings::Settings;

/// Application name sessions are scoped to
pub const APP_NAME: &str = "host_app";

/// The single web user all sessions belong to
pub const USER_ID: &str = "web_user";

/// Prefix for generated session ids
const SESSION_ID_PREFIX: &str = "web_session_";

const AGENT_NAME: &str = "host_agent";
const AGENT_DESCRIPTION: &str = "A friendly chatbot host.";
const AGENT_INSTRUCTION: &str = "You are the host agent responsible for chatting with the user. \
     Keep your responses concise, friendly, and helpful.";

/// Factory producing a provider for a model
///
/// Injected so tests can substitute a scripted provider for the real client.
pub type ProviderFactory =
    Box<dyn Fn(GeminiModel) -> Result<Box<dyn ModelProvider>, RuntimeError> + Send + Sync>;

/// The runner and session a chat turn runs against
#[derive(Clone)]
pub struct Bindings {
    /// Runner for the currently selected model
    pub runner: Arc<Runner>,
    /// Id of the current session
    pub session_id: String,
}

/// Process-wide state shared across requests
pub struct AppState {
    sessions: Arc<InMemorySessionService>,
    provider_factory: ProviderFactory,
    bindings: RwLock<Bindings>,
}

impl AppState {
    /// Create state backed by the real Gemini client
    pub fn new(settings: &Settings) -> Result<Arc<Self>, RuntimeError> {
        let api_key = SecretString::from(settings.api_key.expose_secret().to_string());
        Self::with_provider_factory(Box::new(move |model| {
            let key = SecretString::from(api_key.expose_secret().to_string());
            create_provider(model, key)
        }))
    }

    /// Create state with an injected provider factory
    ///
    /// The initial session id is not registered in the store; callers are
    /// expected to invoke [`reset_session`](Self::reset_session) before the
    /// first chat turn. A turn run against an unregistered id fails with a
    /// session error.
    pub fn with_provider_factory(provider_factory: ProviderFactory) -> Result<Arc<Self>, RuntimeError> {
        let sessions = Arc::new(InMemorySessionService::new());
        let runner = build_runner(GeminiModel::default(), &provider_factory, &sessions)?;
        let bindings = Bindings {
            runner: Arc::new(runner),
            session_id: generate_session_id(),
        };

        Ok(Arc::new(Self {
            sessions,
            provider_factory,
            bindings: RwLock::new(bindings),
        }))
    }

    /// The session store
    pub fn sessions(&self) -> &InMemorySessionService {
        &self.sessions
    }

    /// Copy of the current bindings
    pub async fn snapshot(&self) -> Bindings {
        self.bindings.read().await.clone()
    }

    /// Register a fresh session and make it current
    ///
    /// The previous session stays in the store with its history; it is just
    /// no longer addressed. On failure the previous session remains current.
    pub async fn reset_session(&self) -> Result<String, SessionError> {
        let session_id = generate_session_id();
        self.sessions
            .create_session(APP_NAME, USER_ID, &session_id)
            .await?;

        let mut bindings = self.bindings.write().await;
        bindings.session_id = session_id.clone();
        drop(bindings);

        tracing::info!(%session_id, user_id = USER_ID, "new chat session created");
        Ok(session_id)
    }

    /// Rebuild the runner for a different model and make it current
    ///
    /// The current session id is untouched, so the conversation continues on
    /// the new model. On failure the previous runner remains current.
    pub async fn rebind_model(&self, model: GeminiModel) -> Result<(), RuntimeError> {
        let runner = build_runner(model, &self.provider_factory, &self.sessions)?;

        let mut bindings = self.bindings.write().await;
        bindings.runner = Arc::new(runner);
        drop(bindings);

        tracing::info!(%model, "agent model updated");
        Ok(())
    }
}

fn build_runner(
    model: GeminiModel,
    provider_factory: &ProviderFactory,
    sessions: &Arc<InMemorySessionService>,
) -> Result<Runner, RuntimeError> {
    let agent = Agent::new(AGENT_NAME, model, AGENT_DESCRIPTION, AGENT_INSTRUCTION);
    let provider = provider_factory(agent.model())?;
    Ok(Runner::new(agent, APP_NAME, Arc::clone(sessions), provider))
}

fn generate_session_id() -> String {
    format!("{}{}", SESSION_ID_PREFIX, Uuid::new_v4())
}
