//! Base config: Telegram connection, logging, health endpoint port. Loaded from env.

use anyhow::{Context, Result};
use std::env;

/// Base config: Telegram-related, logging and health endpoint only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// PORT for the health endpoint; 0 disables it
    pub health_port: u16,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token.filter(|t| !t.trim().is_empty()) {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .context("BOT_TOKEN not set (pass --token or set it in the environment)")?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/chatgate.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let health_port = match env::var("PORT").ok().filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", raw))?,
            None => 8080,
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            health_port,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
