//! Adapters from Telegram (teloxide) types to chatgate_core types.

use chatgate_core::{Chat, HandlerError, Message, Result, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`]. Non-text messages get empty
/// content; messages without a sender are refused, since sessions are keyed by sender.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Result<Message> {
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .ok_or(HandlerError::MissingSender)?;
        let text = self.0.text();

        Ok(Message {
            id: self.0.id.to_string(),
            user,
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: if self.0.chat.is_private() {
                    "private".to_string()
                } else {
                    "group".to_string()
                },
            },
            content: text.unwrap_or_default().to_string(),
            message_type: if text.is_some() { "text" } else { "other" }.to_string(),
        })
    }
}
