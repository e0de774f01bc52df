//! Component factory: builds BotComponents from config. Isolates assembly logic from the runner.

use anyhow::{Context, Result};
use chatgate_core::Bot;
use handler_chain::HandlerChain;
use llm_client::{build_llm_client, LlmClient};
use session::{AuthGate, SessionManager};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::handlers::{LoggingHandler, SessionHandler};
use crate::telegram::TelegramBotAdapter;

/// Everything the runner needs: the teloxide client for polling, the reply Bot,
/// the session manager (for the sweep task) and the gate.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot: Arc<dyn Bot>,
    pub manager: Arc<SessionManager>,
    pub gate: Arc<AuthGate>,
}

/// teloxide client for BOT_TOKEN, pointed at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            info!(url = %url_str, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Session manager and auth gate over the given provider client.
pub fn build_gate(config: &BotConfig, llm: Arc<dyn LlmClient>) -> Arc<AuthGate> {
    let manager = Arc::new(SessionManager::new(config.session().clone()));
    Arc::new(AuthGate::new(
        manager,
        config.credentials().clone(),
        llm,
        config.llm().timeout(),
    ))
}

/// Builds BotComponents. `bot_override` replaces the Telegram reply Bot (tests inject a mock).
#[instrument(skip(config, bot_override))]
pub fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn Bot>>,
) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config)?;
    let bot: Arc<dyn Bot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let llm = build_llm_client(config.llm());
    info!(
        provider = llm.provider_name(),
        max_conversation_length = config.session().max_conversation_length,
        session_timeout_hours = config.session().session_timeout_hours,
        "Building bot components"
    );
    let gate = build_gate(config, llm);
    let manager = Arc::clone(gate.manager());

    Ok(BotComponents {
        teloxide_bot,
        bot,
        manager,
        gate,
    })
}

/// LoggingHandler first, SessionHandler as the terminal handler.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(SessionHandler::new(
            components.gate.clone(),
            components.bot.clone(),
        )))
}
