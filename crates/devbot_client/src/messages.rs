//! Chat data model (roles, messages, sessions) and the structured reply
//! envelope the assistant may wrap a response in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat message. Immutable once created; owned by exactly one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            role,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: &str) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// One chat session: append-only, chronological message history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Short label for session listings: the first message truncated to 30
    /// characters, or the title while the session is empty.
    pub fn preview(&self) -> String {
        match self.messages.first() {
            Some(first) if first.content.chars().count() > 30 => {
                let excerpt: String = first.content.chars().take(30).collect();
                format!("{}...", excerpt)
            }
            Some(first) => first.content.clone(),
            None => self.title.clone(),
        }
    }
}

/// Structured reply shape: display text plus suggested follow-up questions.
/// Payloads that do not match this shape are treated as plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    pub response: String,
    #[serde(default)]
    pub questions: Vec<String>,
}
