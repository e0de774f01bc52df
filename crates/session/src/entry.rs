use chrono::{DateTime, Duration, Utc};
use llm_client::{mask_token, Turn};
use std::fmt;

use crate::window::ConversationWindow;

/// Authentication state. The key lives inside the authenticated variant, so a session
/// has a key exactly when it is authenticated.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated { api_key: String },
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Unauthenticated => f.write_str("Unauthenticated"),
            AuthState::Authenticated { api_key } => f
                .debug_struct("Authenticated")
                .field("api_key", &mask_token(api_key))
                .finish(),
        }
    }
}

/// One user's session.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    user_id: i64,
    auth: AuthState,
    history: ConversationWindow,
    last_activity: DateTime<Utc>,
}

impl SessionEntry {
    /// Fresh unauthenticated entry with empty history.
    pub fn new(user_id: i64, max_conversation_length: usize, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            auth: AuthState::Unauthenticated,
            history: ConversationWindow::new(max_conversation_length),
            last_activity: now,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn auth_state(&self) -> &AuthState {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::Authenticated { .. })
    }

    pub fn api_key(&self) -> Option<&str> {
        match &self.auth {
            AuthState::Authenticated { api_key } => Some(api_key),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn history(&self) -> &ConversationWindow {
        &self.history
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// True when idle for strictly longer than `timeout` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now.signed_duration_since(self.last_activity) > timeout
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    /// Clears history and drops authentication. Idempotent.
    pub fn reset(&mut self) {
        self.history.clear();
        self.auth = AuthState::Unauthenticated;
    }

    /// Marks the session authenticated with `api_key`. Blank keys are refused and leave the state unchanged.
    pub fn authenticate(&mut self, api_key: impl Into<String>) -> bool {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return false;
        }
        self.auth = AuthState::Authenticated { api_key };
        true
    }

    /// Drops authentication but keeps history (used when the provider rejects the key).
    pub fn deauthenticate(&mut self) {
        self.auth = AuthState::Unauthenticated;
    }

    /// Commits a completed exchange: the user turn, then the assistant reply, each subject to eviction.
    pub fn record_exchange(&mut self, user_text: &str, reply: &str) {
        self.history.push(Turn::user(user_text));
        self.history.push(Turn::assistant(reply));
    }

    /// Seeds history directly; for building fixtures.
    pub fn push_turn(&mut self, turn: Turn) {
        self.history.push(turn);
    }
}
