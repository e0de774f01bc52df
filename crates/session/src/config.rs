//! Session limits: window size, idle timeout, sweep interval. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Conversation window and expiry settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// MAX_CONVERSATION_LENGTH: turns kept per user (user and assistant turns each count).
    pub max_conversation_length: usize,
    /// SESSION_TIMEOUT_HOURS: idle time after which a session must re-authenticate.
    pub session_timeout_hours: u32,
    /// SESSION_SWEEP_INTERVAL_SECS: how often expired entries are dropped from memory.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_conversation_length: 20,
            session_timeout_hours: 24,
            sweep_interval_secs: 3600,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name).ok().filter(|s| !s.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {}", name, raw)),
        None => Ok(default),
    }
}

impl SessionConfig {
    /// Load from MAX_CONVERSATION_LENGTH, SESSION_TIMEOUT_HOURS, SESSION_SWEEP_INTERVAL_SECS.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            max_conversation_length: parse_var(
                "MAX_CONVERSATION_LENGTH",
                defaults.max_conversation_length,
            )?,
            session_timeout_hours: parse_var("SESSION_TIMEOUT_HOURS", defaults.session_timeout_hours)?,
            sweep_interval_secs: parse_var(
                "SESSION_SWEEP_INTERVAL_SECS",
                defaults.sweep_interval_secs,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_conversation_length == 0 {
            anyhow::bail!("MAX_CONVERSATION_LENGTH must be at least 1");
        }
        if self.session_timeout_hours == 0 {
            anyhow::bail!("SESSION_TIMEOUT_HOURS must be at least 1");
        }
        if self.sweep_interval_secs == 0 {
            anyhow::bail!("SESSION_SWEEP_INTERVAL_SECS must be at least 1");
        }
        Ok(())
    }

    pub fn session_timeout(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.session_timeout_hours))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
