//! In-memory session store: the set of chat sessions and the active pointer.
//! Sessions are owned exclusively by the store; history is append-only.

use tracing::warn;

use crate::messages::{ChatSession, Message};

/// Error returned when switching to a session id the store does not know.
#[derive(Debug)]
pub struct UnknownSessionError(pub String);

impl std::fmt::Display for UnknownSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown session: {}", self.0)
    }
}

impl std::error::Error for UnknownSessionError {}

/// All chat sessions plus the active-session pointer. Starts empty; the
/// application creates the first session at startup.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    active: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh empty session, make it active, and return its id.
    pub fn create_session(&mut self) -> String {
        let session = ChatSession::new("New Chat");
        let id = session.id.clone();
        self.sessions.push(session);
        self.active = Some(id.clone());
        id
    }

    /// Append to the named session's history. Unknown ids are tolerated as a
    /// warned no-op; they indicate a caller bug, not a user-visible failure.
    pub fn append_message(&mut self, session_id: &str, message: Message) {
        match self.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => session.messages.push(message),
            None => warn!(session_id, "dropping message for unknown session"),
        }
    }

    /// Switch the active pointer to an existing session.
    pub fn set_active(&mut self, session_id: &str) -> Result<(), UnknownSessionError> {
        if self.sessions.iter().any(|s| s.id == session_id) {
            self.active = Some(session_id.to_string());
            Ok(())
        } else {
            Err(UnknownSessionError(session_id.to_string()))
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The session new input targets, if any session exists yet.
    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn session(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// All sessions in creation order.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }
}
