use async_trait::async_trait;
use chatgate_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the outcome in after(); always continues.
/// Message text is not logged, only its size.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            content_len = message.content.chars().count(),
            "step: LoggingHandler before"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        match response {
            HandlerResponse::Reply(text) => info!(
                user_id = message.user.id,
                reply_len = text.chars().count(),
                "step: LoggingHandler after, reply sent"
            ),
            other => debug!(
                user_id = message.user.id,
                response = ?other,
                "step: LoggingHandler after, no reply"
            ),
        }
        Ok(())
    }
}
