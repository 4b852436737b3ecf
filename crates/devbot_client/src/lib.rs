//! Chat client library for the devbot assistant: session state, reply
//! decoding (envelope, fenced code, token highlighting), and the WebSocket
//! connection manager. Used by the `devbot` terminal binary; rendering
//! layers consume [`content::DecodedMessage`] and the session list.

pub mod client;
pub mod config;
pub mod content;
pub mod highlight;
pub mod messages;
pub mod session;

pub use client::{open, ChatConnection, ClientError, ConnectionState, IncomingReply};
pub use config::{default_config_path, ChatSection, Config, ConfigError, ServerSection};
pub use content::{decode, ContentBlock, DecodedMessage};
pub use highlight::{classify, Token, TokenClass};
pub use messages::{ChatSession, Message, ReplyEnvelope, Role};
pub use session::{SessionStore, UnknownSessionError};
