//! BotConfig: BaseConfig + session limits + credentials + LLM provider. Use load() for env-based loading.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};
use session::{Credentials, SessionConfig};

use super::BaseConfig;

/// Full bot config. Load with [`BotConfig::load`], then call [`BotConfig::validate`] before init.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub session: SessionConfig,
    pub credentials: Credentials,
    pub llm: EnvLlmConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            session: SessionConfig::from_env()?,
            credentials: Credentials::from_env(),
            llm: EnvLlmConfig::from_env()?,
        })
    }

    /// Validate config. Call after load() to fail fast before connecting.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.session.validate()?;
        if !self.credentials.has_master_password() {
            tracing::warn!("MASTER_PASSWORD not set; users can only authenticate with their own API key");
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
    pub fn llm(&self) -> &dyn LlmConfig {
        &self.llm
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn health_port(&self) -> u16 {
        self.base.health_port
    }
}
