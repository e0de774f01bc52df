use thiserror::Error;

/// Failure kinds of a completion call. Callers decide session consequences from the kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The provider rejected the API key.
    #[error("invalid API key")]
    InvalidKey,

    /// Rate limit, exhausted quota or insufficient credit.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// Network failure, unexpected status or malformed response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call did not finish within the configured time.
    #[error("request timed out")]
    Timeout,
}

impl LlmError {
    /// True for failures the user may simply retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Transport(_) | LlmError::Timeout)
    }
}
