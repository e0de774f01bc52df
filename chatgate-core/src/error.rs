//! Errors at the transport and handler seams.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatgateError {
    /// The transport failed to deliver a message or chat action.
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HandlerError {
    /// The update has no sender (channel posts, anonymous admins); there is no session to use.
    #[error("Missing sender")]
    MissingSender,
}

pub type Result<T> = std::result::Result<T, ChatgateError>;
