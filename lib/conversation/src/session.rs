//! Conversation session management.
//!
//! A session is one user's ongoing conversation: an append-only message log
//! plus lifecycle state. The core holds no expiry logic; a session lives
//! until the caller discards it. Turns of the same session never interleave,
//! since running a turn takes `&mut Session`.

use crate::error::SessionError;
use crate::message::Message;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use party_line_core::ConversationSessionId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// The state of a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Session is active and accepting messages.
    Active,
    /// Session has ended.
    Ended,
}

impl SessionState {
    /// Returns true if the session can accept messages.
    #[must_use]
    pub fn can_accept_messages(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: ConversationSessionId,
    /// Session state.
    pub state: SessionState,
    /// Messages in this session, in order. Append-only.
    pub messages: Vec<Message>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session was last active.
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationSessionId::new(),
            state: SessionState::Active,
            messages: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    /// Appends a message to the session.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.last_active_at = Utc::now();
    }

    /// Ends the session.
    pub fn end(&mut self) {
        self.state = SessionState::Ended;
    }

    /// Returns the number of messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the last message, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for session storage.
///
/// Persistence is a collaborator concern; the core only defines the seam.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a new session.
    async fn create_session(&self) -> Result<Session, SessionError>;

    /// Gets a session by ID.
    async fn get_session(&self, id: ConversationSessionId) -> Result<Session, SessionError>;

    /// Updates a session.
    async fn update_session(&self, session: Session) -> Result<(), SessionError>;

    /// Deletes a session.
    async fn delete_session(&self, id: ConversationSessionId) -> Result<(), SessionError>;
}

/// In-memory session store for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<ConversationSessionId, Session>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self) -> Result<Session, SessionError> {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: ConversationSessionId) -> Result<Session, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound { id })
    }

    async fn update_session(&self, session: Session) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&session.id) {
            return Err(SessionError::NotFound { id: session.id });
        }
        sessions.insert(session.id, session);
        Ok(())
    }

    async fn delete_session(&self, id: ConversationSessionId) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionError::NotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRole;

    #[test]
    fn session_creation() {
        let session = Session::new();
        assert_eq!(session.state, SessionState::Active);
        assert!(session.messages.is_empty());
    }

    #[test]
    fn session_push_is_append_only() {
        let mut session = Session::new();
        session.push(Message::user("Hi!"));
        session.push(Message::assistant("Welcome to Altitude!"));

        assert_eq!(session.message_count(), 2);
        assert_eq!(session.messages[0].role, MessageRole::User);
        assert_eq!(
            session.last_message().expect("has messages").role,
            MessageRole::Assistant
        );
    }

    #[test]
    fn session_end() {
        let mut session = Session::new();
        session.end();
        assert_eq!(session.state, SessionState::Ended);
        assert!(!session.state.can_accept_messages());
    }

    #[test]
    fn session_serde_roundtrip() {
        let mut session = Session::new();
        session.push(Message::user("Test"));

        let json = serde_json::to_string(&session).expect("serialize");
        let parsed: Session = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(session.id, parsed.id);
        assert_eq!(session.message_count(), parsed.message_count());
    }

    #[tokio::test]
    async fn in_memory_store_roundtrip() {
        let store = InMemorySessionStore::new();
        let session = store.create_session().await.expect("create");

        let mut fetched = store.get_session(session.id).await.expect("get");
        fetched.push(Message::user("booking question"));
        store.update_session(fetched).await.expect("update");

        let updated = store.get_session(session.id).await.expect("get again");
        assert_eq!(updated.message_count(), 1);

        store.delete_session(session.id).await.expect("delete");
        assert!(store.get_session(session.id).await.is_err());
    }

    #[tokio::test]
    async fn in_memory_store_rejects_unknown_updates() {
        let store = InMemorySessionStore::new();
        let err = store
            .update_session(Session::new())
            .await
            .expect_err("should reject");
        assert!(matches!(err, SessionError::NotFound { .. }));
    }
}
