//! Config tests.

use crate::config::BotConfig;
use llm_client::LlmProvider;
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "PORT",
    "MASTER_PASSWORD",
    "DEFAULT_API_KEY",
    "DEFAULT_CLAUDE_API_KEY",
    "MAX_CONVERSATION_LENGTH",
    "SESSION_TIMEOUT_HOURS",
    "SESSION_SWEEP_INTERVAL_SECS",
    "LLM_PROVIDER",
    "LLM_MODEL",
    "LLM_BASE_URL",
    "LLM_MAX_TOKENS",
    "LLM_TIMEOUT_SECS",
    "LLM_SYSTEM_PROMPT",
    "SYSTEM_PROMPT",
];

fn clear_env() {
    for name in VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None).unwrap();
    config.validate().unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/chatgate.log");
    assert_eq!(config.health_port(), 8080);
    assert_eq!(config.session().max_conversation_length, 20);
    assert_eq!(config.session().session_timeout_hours, 24);
    assert_eq!(config.session().sweep_interval_secs, 3600);
    assert!(!config.credentials().has_master_password());
    assert!(config.credentials().default_api_key().is_none());
    assert_eq!(config.llm().provider(), LlmProvider::Anthropic);
    assert_eq!(config.llm().timeout(), Duration::from_secs(120));
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");
    env::set_var("LOG_FILE", "/tmp/chatgate-test.log");
    env::set_var("PORT", "0");
    env::set_var("MASTER_PASSWORD", "secret123");
    env::set_var("DEFAULT_API_KEY", "sk-default");
    env::set_var("MAX_CONVERSATION_LENGTH", "6");
    env::set_var("SESSION_TIMEOUT_HOURS", "2");
    env::set_var("LLM_PROVIDER", "openai");

    let config = BotConfig::load(None).unwrap();
    config.validate().unwrap();

    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));
    assert_eq!(config.log_file(), "/tmp/chatgate-test.log");
    assert_eq!(config.health_port(), 0);
    assert!(config.credentials().matches_master_password("secret123"));
    assert_eq!(config.credentials().default_api_key(), Some("sk-default"));
    assert_eq!(config.session().max_conversation_length, 6);
    assert_eq!(config.session().session_timeout_hours, 2);
    assert_eq!(config.llm().provider(), LlmProvider::OpenAI);

    clear_env();
}

#[test]
#[serial]
fn test_token_argument_overrides_env() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");
    let config = BotConfig::load(Some("cli_token".to_string())).unwrap();
    assert_eq!(config.bot_token(), "cli_token");
    clear_env();
}

#[test]
#[serial]
fn test_missing_token_is_an_error() {
    clear_env();
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");

    env::set_var("MAX_CONVERSATION_LENGTH", "0");
    assert!(BotConfig::load(None).is_err());
    env::remove_var("MAX_CONVERSATION_LENGTH");

    env::set_var("PORT", "eighty");
    assert!(BotConfig::load(None).is_err());
    env::remove_var("PORT");

    env::set_var("TELEGRAM_API_URL", "not a url");
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_blank_port_falls_back_to_default() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");

    env::set_var("PORT", "");
    assert_eq!(BotConfig::load(None).unwrap().health_port(), 8080);

    env::set_var("PORT", "  ");
    assert_eq!(BotConfig::load(None).unwrap().health_port(), 8080);

    clear_env();
}
