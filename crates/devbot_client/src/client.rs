//! WebSocket connection manager: open the transport, send user messages,
//! receive and decode assistant replies.
//!
//! One connection, one outstanding request at a time. The connection is
//! owned by the application context and survives active-session switches;
//! a reply is routed to the session that was active when its request was
//! sent. A closed connection stays closed until a new one is opened.

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message as Frame;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::content::{self, DecodedMessage};
use crate::messages::Message;
use crate::session::SessionStore;

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Connectivity of the single transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Connection/transport error.
#[derive(Debug)]
pub enum ClientError {
    /// The connection is closed; the message was neither recorded nor sent.
    NotConnected,
    /// The transport failed; the connection is now closed.
    Transport(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::NotConnected => write!(f, "not connected"),
            ClientError::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

/// An assistant reply received over the connection, already decoded.
#[derive(Debug, Clone)]
pub struct IncomingReply {
    /// Session the reply was appended to (`None` when no session existed).
    pub session_id: Option<String>,
    pub message: Message,
    pub decoded: DecodedMessage,
}

/// The single chat connection and its reply-routing state.
pub struct ChatConnection {
    stream: Option<WsStream>,
    /// Session active when the connection opened; fallback target for
    /// frames that arrive without an outstanding request.
    opened_for: Option<String>,
    /// Session active at the most recent send; target for its reply.
    reply_to: Option<String>,
    awaiting_reply: bool,
}

/// Open the transport with a single attempt; no retry, no backoff.
pub async fn open(url: &str, store: &SessionStore) -> Result<ChatConnection, ClientError> {
    let (stream, _) = tokio_tungstenite::connect_async(url).await?;
    debug!(url, "connected");
    Ok(ChatConnection {
        stream: Some(stream),
        opened_for: store.active_id().map(str::to_string),
        reply_to: None,
        awaiting_reply: false,
    })
}

impl ChatConnection {
    pub fn state(&self) -> ConnectionState {
        if self.stream.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// True between a successful `send` and its reply. The input surface is
    /// expected to hold further sends while this is set.
    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Record `text` as a user message in the active session, then transmit
    /// it. History is appended before transmission is attempted; a closed
    /// connection rejects the send without recording anything.
    pub async fn send(&mut self, store: &mut SessionStore, text: &str) -> Result<(), ClientError> {
        if self.stream.is_none() {
            warn!("send while disconnected; message dropped");
            return Err(ClientError::NotConnected);
        }

        let target = store.active_id().map(str::to_string);
        if let Some(session_id) = &target {
            store.append_message(session_id, Message::user(text));
        }
        self.reply_to = target;

        let outcome = match self.stream.as_mut() {
            Some(stream) => stream.send(Frame::Text(text.to_string())).await,
            None => return Err(ClientError::NotConnected),
        };
        match outcome {
            Ok(()) => {
                self.awaiting_reply = true;
                Ok(())
            }
            Err(e) => {
                self.stream = None;
                Err(e.into())
            }
        }
    }

    /// Wait for the next assistant reply. The payload is appended to the
    /// send-time session (or the open-time session for unsolicited frames),
    /// decoded, and returned. `Ok(None)` means the server closed the
    /// connection; no reconnect is attempted.
    pub async fn recv(
        &mut self,
        store: &mut SessionStore,
    ) -> Result<Option<IncomingReply>, ClientError> {
        loop {
            let item = match self.stream.as_mut() {
                Some(stream) => stream.next().await,
                None => return Err(ClientError::NotConnected),
            };
            match item {
                Some(Ok(Frame::Text(payload))) => {
                    let message = Message::assistant(&payload);
                    let session_id = self.reply_to.take().or_else(|| self.opened_for.clone());
                    if let Some(id) = &session_id {
                        store.append_message(id, message.clone());
                    }
                    let decoded = content::decode(&payload);
                    self.awaiting_reply = false;
                    return Ok(Some(IncomingReply {
                        session_id,
                        message,
                        decoded,
                    }));
                }
                Some(Ok(Frame::Close(_))) | None => {
                    debug!("connection closed");
                    self.stream = None;
                    self.awaiting_reply = false;
                    return Ok(None);
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    self.stream = None;
                    self.awaiting_reply = false;
                    return Err(ClientError::Transport(e.to_string()));
                }
            }
        }
    }

    /// Close the connection. Safe to call when already closed.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.close(None).await;
        }
        self.awaiting_reply = false;
        self.reply_to = None;
    }
}
