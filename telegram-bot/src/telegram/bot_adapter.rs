//! Wraps teloxide::Bot and implements [`chatgate_core::Bot`]. Tests substitute another Bot impl.

use async_trait::async_trait;
use chatgate_core::{split_message, Bot as CoreBot, Chat, ChatgateError, Result, TELEGRAM_MESSAGE_LIMIT};
use teloxide::{prelude::*, types::ChatAction, types::ChatId};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    /// Sends `text`, split into several messages when it exceeds Telegram's length limit.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let chunks = split_message(text, TELEGRAM_MESSAGE_LIMIT);
        if chunks.len() > 1 {
            debug!(chat_id = chat.id, chunks = chunks.len(), "Splitting long reply");
        }
        for chunk in chunks {
            self.bot
                .send_message(ChatId(chat.id), chunk)
                .await
                .map_err(|e| ChatgateError::Bot(e.to_string()))?;
        }
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| ChatgateError::Bot(e.to_string()))?;
        Ok(())
    }
}
