//! Terminal handler: passes text through the auth gate and sends the reply.

use async_trait::async_trait;
use chatgate_core::{Bot, Handler, HandlerResponse, Message, Result};
use session::AuthGate;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Runs every non-blank message through [`AuthGate::process`] and replies in the same chat.
pub struct SessionHandler {
    gate: Arc<AuthGate>,
    bot: Arc<dyn Bot>,
}

impl SessionHandler {
    pub fn new(gate: Arc<AuthGate>, bot: Arc<dyn Bot>) -> Self {
        Self { gate, bot }
    }
}

#[async_trait]
impl Handler for SessionHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.is_blank() {
            info!("step: SessionHandler ignoring message without text");
            return Ok(HandlerResponse::Ignore);
        }

        if let Err(e) = self.bot.send_typing(&message.chat).await {
            warn!(error = %e, "Failed to send typing indicator");
        }

        let reply = match self.gate.process(message.user.id, &message.content).await {
            Some(reply) => reply,
            None => return Ok(HandlerResponse::Ignore),
        };

        self.bot.reply_to(message, &reply).await?;
        info!("step: SessionHandler reply sent");
        Ok(HandlerResponse::Reply(reply))
    }
}
