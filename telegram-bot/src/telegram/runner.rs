//! REPL runner: converts teloxide messages to core::Message and queues them per user.

use anyhow::Result;
use chatgate_core::ToCoreMessage;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, instrument, warn};

use super::adapters::TelegramMessageWrapper;
use crate::queue::UserQueues;

/// Starts long polling with the given teloxide Bot. Each message is converted to core::Message
/// and put on its sender's queue before the next update is taken, so one user's messages are
/// handled in arrival order while the REPL keeps receiving. Messages without a sender are dropped.
/// Returns when the dispatcher stops (Ctrl-C).
#[instrument(skip(bot, queues))]
pub async fn run_repl(bot: teloxide::Bot, queues: Arc<UserQueues>) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("unknown"),
            "Connected to Telegram"
        ),
        Err(e) => anyhow::bail!("Telegram get_me failed, check BOT_TOKEN: {}", e),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let queues = queues.clone();

        async move {
            match TelegramMessageWrapper(&msg).to_core() {
                Ok(core_msg) => {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        message_type = %core_msg.message_type,
                        "Received message"
                    );
                    queues.dispatch(core_msg);
                }
                Err(e) => warn!(error = %e, chat_id = msg.chat.id.0, "Skipping message"),
            }

            Ok(())
        }
    })
    .await;

    Ok(())
}
