//! In-memory session store
//!
//! Sessions hold the conversation history an agent turn runs against. The
//! store keeps every session it has ever created for the lifetime of the
//! process; starting a new chat registers a fresh session and simply stops
//! addressing the old one.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::error::SessionError;
use super::types::Content;

/// A single conversation session
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier
    pub id: String,
    /// Application the session belongs to
    pub app_name: String,
    /// User the session belongs to
    pub user_id: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Conversation turns, oldest first
    contents: Vec<Content>,
}

impl Session {
    fn new(app_name: &str, user_id: &str, session_id: &str) -> Self {
        Self {
            id: session_id.to_string(),
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            contents: Vec::new(),
        }
    }

    /// Conversation turns recorded so far
    pub fn contents(&self) -> &[Content] {
        &self.contents
    }
}

/// Process-local session store keyed by session id
#[derive(Debug, Default)]
pub struct InMemorySessionService {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionService {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, empty session
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyExists`] if the id is taken.
    pub async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session_id) {
            return Err(SessionError::AlreadyExists(session_id.to_string()));
        }
        sessions.insert(
            session_id.to_string(),
            Session::new(app_name, user_id, session_id),
        );
        Ok(())
    }

    /// Fetch a copy of a session
    ///
    /// Returns `None` if no session is registered under this
    /// (app, user, id) triple.
    pub async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Option<Session> {
        let sessions = self.sessions.read().await;
        lookup(&sessions, app_name, user_id, session_id).ok().cloned()
    }

    /// Append a conversation turn to a session's history
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if no session is registered under
    /// this (app, user, id) triple.
    pub async fn append_content(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
        content: Content,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = lookup_mut(&mut sessions, app_name, user_id, session_id)?;
        session.contents.push(content);
        Ok(())
    }

    /// Snapshot of a session's history, oldest turn first
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if no session is registered under
    /// this (app, user, id) triple.
    pub async fn history(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Vec<Content>, SessionError> {
        let sessions = self.sessions.read().await;
        let session = lookup(&sessions, app_name, user_id, session_id)?;
        Ok(session.contents.clone())
    }

    /// Number of sessions ever registered
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

// A session registered under a different app or user is reported as not
// found rather than revealing that the id exists.
fn lookup<'a>(
    sessions: &'a HashMap<String, Session>,
    app_name: &str,
    user_id: &str,
    session_id: &str,
) -> Result<&'a Session, SessionError> {
    sessions
        .get(session_id)
        .filter(|s| s.app_name == app_name && s.user_id == user_id)
        .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
}

fn lookup_mut<'a>(
    sessions: &'a mut HashMap<String, Session>,
    app_name: &str,
    user_id: &str,
    session_id: &str,
) -> Result<&'a mut Session, SessionError> {
    sessions
        .get_mut(session_id)
        .filter(|s| s.app_name == app_name && s.user_id == user_id)
        .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
}
