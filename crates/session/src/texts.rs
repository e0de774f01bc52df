//! User-facing reply texts. Plain text: replies are sent without a parse mode.

/// Shown on `/start`.
pub fn welcome(key_prefix: &str) -> String {
    format!(
        "🤖 Welcome!\n\n\
To start chatting you need to authenticate:\n\n\
Option 1: send the access password\n\
Option 2: send your API key (starts with '{}')\n\n\
Commands:\n\
• /start - Start or restart the bot\n\
• /reset - Clear conversation history and sign out\n\
• /help - Show help\n\n\
After authentication, just send any message to chat!",
        key_prefix
    )
}

/// Shown on `/help`.
pub fn help(session_timeout_hours: u32, max_conversation_length: usize) -> String {
    format!(
        "📚 Help\n\n\
Commands:\n\
• /start - Start or restart authentication\n\
• /reset - Clear conversation history and sign out\n\
• /help - Show this help message\n\n\
How to use:\n\
1. Start with /start\n\
2. Authenticate with the password or your API key\n\
3. Send any message to chat\n\
4. Use /reset to start over\n\n\
Tips:\n\
• The last {} messages are kept as context; older ones are dropped\n\
• Sessions expire after {} hours of inactivity\n\n\
Privacy:\n\
• Your API key is kept only in memory\n\
• Conversations are not logged or saved",
        max_conversation_length, session_timeout_hours
    )
}

pub fn auth_prompt(key_prefix: &str) -> String {
    format!(
        "Send the access password or your API key (starts with '{}') to authenticate.",
        key_prefix
    )
}

pub const AUTH_SUCCESS: &str =
    "✅ Authentication successful!\n\nYou can now start chatting. Just send any message!";

pub const AUTH_KEY_ACCEPTED: &str = "✅ API key accepted!\n\nYou can now start chatting. \
If the key turns out to be invalid you will be asked for a new one.";

pub fn reset_done(key_prefix: &str) -> String {
    format!(
        "✅ Conversation history cleared and signed out.\n\n{}",
        auth_prompt(key_prefix)
    )
}

pub fn auth_rejected(key_prefix: &str) -> String {
    format!(
        "❌ Invalid password or API key. Please try again or use /start to see options.\n\n{}",
        auth_prompt(key_prefix)
    )
}

pub fn missing_default_key(key_prefix: &str) -> String {
    format!(
        "⚠️ The password is correct, but no shared API key is configured on this bot.\n\n\
Please send your own API key (starts with '{}').",
        key_prefix
    )
}

pub fn session_expired(key_prefix: &str) -> String {
    format!(
        "⌛ Your session expired due to inactivity. Please authenticate again.\n\n{}",
        auth_prompt(key_prefix)
    )
}

pub fn invalid_key(key_prefix: &str) -> String {
    format!(
        "❌ The API key was rejected by the provider. You have been signed out.\n\n{}",
        auth_prompt(key_prefix)
    )
}

pub const QUOTA_EXCEEDED: &str =
    "❌ The API key has hit its rate limit or quota. Please wait a moment and try again.";

pub const TRANSPORT_ERROR: &str =
    "❌ Could not reach the AI service. Please try again or use /reset to clear the conversation.";

pub const TIMEOUT: &str = "❌ The AI service took too long to answer. Please try again.";

pub fn unknown_command(name: &str) -> String {
    format!("❓ Unknown command /{}. Use /help to see available commands.", name)
}
