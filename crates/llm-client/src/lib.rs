//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait, the conversation [`Turn`] type, the [`LlmError`] kinds
//! callers branch on, and two provider implementations: Anthropic Messages API ([`AnthropicLlmClient`])
//! and OpenAI-compatible chat completions ([`OpenAILlmClient`]).
//!
//! The API key is passed per call: every user session may carry its own key.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod anthropic;
mod config;
mod error;
mod mask;
mod openai_llm;

pub use anthropic::{AnthropicLlmClient, ANTHROPIC_VERSION, DEFAULT_ANTHROPIC_MODEL};
pub use config::{build_llm_client, EnvLlmConfig, LlmConfig, LlmProvider};
pub use error::LlmError;
pub use mask::mask_token;
pub use openai_llm::{OpenAILlmClient, DEFAULT_OPENAI_MODEL};

/// System prompt used when none is configured: plain, chat-sized answers.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant chatting with a user through Telegram. \
Be conversational, helpful, and engaging. Keep responses concise but informative, suitable for a chat interface.";

/// Minimum number of characters after the provider prefix for a string to look like an API key.
pub const MIN_KEY_BODY_LEN: usize = 8;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One (role, text) entry of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Text-completion provider: ordered turns in, assistant text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Short provider name for logs (e.g. "anthropic").
    fn provider_name(&self) -> &str;

    /// Prefix every key issued by this provider starts with (e.g. `sk-ant-`).
    fn key_prefix(&self) -> &str;

    /// True if `candidate` has the shape of a key for this provider. Says nothing about validity.
    fn looks_like_api_key(&self, candidate: &str) -> bool {
        looks_like_key(candidate, self.key_prefix())
    }

    /// Returns the assistant reply for `turns`, authenticating with `api_key`.
    async fn complete(&self, api_key: &str, turns: &[Turn]) -> Result<String, LlmError>;
}

/// Shape check shared by providers: prefix, no whitespace, enough characters after the prefix.
pub fn looks_like_key(candidate: &str, prefix: &str) -> bool {
    !candidate.is_empty()
        && !candidate.chars().any(char::is_whitespace)
        && candidate.starts_with(prefix)
        && candidate.len() >= prefix.len() + MIN_KEY_BODY_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_key_accepts_prefixed_keys() {
        assert!(looks_like_key("sk-ant-api03-abcdefgh", "sk-ant-"));
        assert!(looks_like_key("sk-proj-12345678", "sk-"));
    }

    #[test]
    fn test_looks_like_key_rejects_bad_shapes() {
        assert!(!looks_like_key("", "sk-ant-"));
        assert!(!looks_like_key("sk-ant-", "sk-ant-"));
        assert!(!looks_like_key("sk-ant-short", "sk-ant-"));
        assert!(!looks_like_key("sk-ant-abc defgh", "sk-ant-"));
        assert!(!looks_like_key("hello there friend", "sk-"));
        assert!(!looks_like_key("sk-proj-12345678", "sk-ant-"));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
