//! Transport-agnostic message types and the [`Handler`] trait the chain is built from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sender of a message. `id` keys the user's session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat the message arrived in; replies go back here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// An inbound message with a known sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Text of the message; empty for stickers, photos and other non-text content.
    pub content: String,
    /// "text" or "other".
    pub message_type: String,
}

impl Message {
    /// True when the message carries no usable text.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// What a handler decided. `Reply(text)` carries the text that was sent so `after()` hooks can see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    Continue,
    Stop,
    /// Not for this handler; the next one gets a turn.
    Ignore,
    Reply(String),
}

/// Converts a transport user into a core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport message into a core [`Message`]. Fails with
/// [`HandlerError::MissingSender`](crate::HandlerError::MissingSender) when there is no sender to
/// attach a session to.
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Result<Message>;
}

/// One link of the chain. The chain runs every `before`, then `handle` until one returns Stop or
/// Reply, then every `after` in reverse.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Return false to stop the chain before any `handle` runs.
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
