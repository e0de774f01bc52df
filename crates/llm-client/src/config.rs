//! LLM configuration: trait and env-based implementation, plus client construction.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::{AnthropicLlmClient, LlmClient, OpenAILlmClient};

/// Which provider API the bot talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic,
    OpenAI,
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            "openai" => Ok(LlmProvider::OpenAI),
            other => anyhow::bail!("Unknown LLM_PROVIDER: {} (expected anthropic or openai)", other),
        }
    }
}

/// LLM configuration interface.
pub trait LlmConfig: Send + Sync {
    fn provider(&self) -> LlmProvider;
    fn model(&self) -> Option<&str>;
    fn base_url(&self) -> Option<&str>;
    fn max_tokens(&self) -> u32;
    fn timeout(&self) -> Duration;
    fn system_prompt(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub llm_provider: LlmProvider,
    pub llm_model: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_max_tokens: u32,
    pub llm_timeout_secs: u64,
    pub llm_system_prompt: Option<String>,
}

impl Default for EnvLlmConfig {
    fn default() -> Self {
        Self {
            llm_provider: LlmProvider::Anthropic,
            llm_model: None,
            llm_base_url: None,
            llm_max_tokens: 4096,
            llm_timeout_secs: 120,
            llm_system_prompt: None,
        }
    }
}

impl LlmConfig for EnvLlmConfig {
    fn provider(&self) -> LlmProvider {
        self.llm_provider
    }
    fn model(&self) -> Option<&str> {
        self.llm_model.as_deref()
    }
    fn base_url(&self) -> Option<&str> {
        self.llm_base_url.as_deref()
    }
    fn max_tokens(&self) -> u32 {
        self.llm_max_tokens
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
    fn system_prompt(&self) -> Option<&str> {
        self.llm_system_prompt.as_deref()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {}", name, raw)),
        None => Ok(default),
    }
}

impl EnvLlmConfig {
    /// Load from LLM_PROVIDER, LLM_MODEL, LLM_BASE_URL, LLM_MAX_TOKENS, LLM_TIMEOUT_SECS, LLM_SYSTEM_PROMPT.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let llm_provider = match non_empty_var("LLM_PROVIDER") {
            Some(p) => p.parse()?,
            None => defaults.llm_provider,
        };
        let llm_timeout_secs = parse_var("LLM_TIMEOUT_SECS", defaults.llm_timeout_secs)?;
        if llm_timeout_secs == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECS must be at least 1");
        }
        Ok(Self {
            llm_provider,
            llm_model: non_empty_var("LLM_MODEL"),
            llm_base_url: non_empty_var("LLM_BASE_URL"),
            llm_max_tokens: parse_var("LLM_MAX_TOKENS", defaults.llm_max_tokens)?,
            llm_timeout_secs,
            llm_system_prompt: non_empty_var("LLM_SYSTEM_PROMPT")
                .or_else(|| non_empty_var("SYSTEM_PROMPT")),
        })
    }
}

/// Builds the provider client described by `config`.
pub fn build_llm_client(config: &dyn LlmConfig) -> Arc<dyn LlmClient> {
    let system_prompt = config.system_prompt().map(String::from);
    match config.provider() {
        LlmProvider::Anthropic => {
            let mut client = AnthropicLlmClient::new()
                .with_max_tokens(config.max_tokens())
                .with_system_prompt_opt(system_prompt);
            if let Some(model) = config.model() {
                client = client.with_model(model);
            }
            if let Some(url) = config.base_url() {
                client = client.with_base_url(url);
            }
            Arc::new(client)
        }
        LlmProvider::OpenAI => {
            let mut client = OpenAILlmClient::new()
                .with_max_tokens(config.max_tokens())
                .with_system_prompt_opt(system_prompt);
            if let Some(model) = config.model() {
                client = client.with_model(model);
            }
            if let Some(url) = config.base_url() {
                client = client.with_base_url(url);
            }
            Arc::new(client)
        }
    }
}
