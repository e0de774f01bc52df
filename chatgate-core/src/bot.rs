//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in the telegram-bot crate.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Maximum length (in characters) of a single Telegram text message.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    /// Shows a "typing" indicator in the chat while a reply is being produced.
    /// Transports without such a notion can keep the default no-op.
    async fn send_typing(&self, _chat: &Chat) -> Result<()> {
        Ok(())
    }
}

/// Splits `text` into chunks of at most `max_chars` characters, never cutting a UTF-8 sequence.
/// Returns a single empty chunk for empty input so callers always have something to send.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_message_short_text_is_single_chunk() {
        assert_eq!(split_message("hello", 10), vec!["hello".to_string()]);
        assert_eq!(split_message("", 10), vec![String::new()]);
    }

    #[test]
    fn test_split_message_exact_multiple() {
        let chunks = split_message("abcdef", 3);
        assert_eq!(chunks, vec!["abc".to_string(), "def".to_string()]);
    }

    #[test]
    fn test_split_message_respects_char_boundaries() {
        let text = "ééééé";
        let chunks = split_message(text, 2);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_split_message_telegram_limit() {
        let text = "x".repeat(TELEGRAM_MESSAGE_LIMIT * 2 + 1);
        let chunks = split_message(&text, TELEGRAM_MESSAGE_LIMIT);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= TELEGRAM_MESSAGE_LIMIT));
        assert_eq!(chunks[2], "x");
    }
}
