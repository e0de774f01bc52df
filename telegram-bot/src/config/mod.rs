//! Bot configuration: BaseConfig (Telegram, logging, health port) plus the session,
//! credential and LLM sections owned by their crates.

mod base;
mod bot_config;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
