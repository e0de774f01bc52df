use llm_client::LlmError;
use thiserror::Error;

use crate::texts;

/// Everything that can go wrong while handling one message. All of these are
/// turned into a reply at the gate; none escapes to the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("credential attempt rejected")]
    AuthRejected,

    #[error("master password accepted but no default API key is configured")]
    MissingDefaultKey,

    #[error("session expired")]
    SessionExpired,

    #[error("provider rejected the API key")]
    LlmInvalidKey,

    #[error("provider quota exceeded")]
    LlmQuotaExceeded,

    #[error("provider transport error: {0}")]
    LlmTransport(String),

    #[error("provider call timed out")]
    LlmTimeout,
}

impl From<LlmError> for SessionError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::InvalidKey => SessionError::LlmInvalidKey,
            LlmError::QuotaExceeded => SessionError::LlmQuotaExceeded,
            LlmError::Transport(detail) => SessionError::LlmTransport(detail),
            LlmError::Timeout => SessionError::LlmTimeout,
        }
    }
}

impl SessionError {
    /// Reply text for the user. `key_prefix` is the provider's key prefix used in auth prompts.
    /// Transport details stay in the logs.
    pub fn user_message(&self, key_prefix: &str) -> String {
        match self {
            SessionError::AuthRejected => texts::auth_rejected(key_prefix),
            SessionError::MissingDefaultKey => texts::missing_default_key(key_prefix),
            SessionError::SessionExpired => texts::session_expired(key_prefix),
            SessionError::LlmInvalidKey => texts::invalid_key(key_prefix),
            SessionError::LlmQuotaExceeded => texts::QUOTA_EXCEEDED.to_string(),
            SessionError::LlmTransport(_) => texts::TRANSPORT_ERROR.to_string(),
            SessionError::LlmTimeout => texts::TIMEOUT.to_string(),
        }
    }
}
