//! Per-message state machine: commands, credential attempts and LLM turns.

use llm_client::{mask_token, LlmClient, LlmError, Turn};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::command::Command;
use crate::credentials::Credentials;
use crate::entry::SessionEntry;
use crate::error::SessionError;
use crate::manager::{SessionGuard, SessionManager};
use crate::texts;

/// Routes each inbound text to the command set, the auth flow or the LLM, and turns
/// every outcome into reply text. Holds the user's session lock for the whole message.
pub struct AuthGate {
    manager: Arc<SessionManager>,
    credentials: Credentials,
    llm: Arc<dyn LlmClient>,
    llm_timeout: Duration,
}

impl AuthGate {
    pub fn new(
        manager: Arc<SessionManager>,
        credentials: Credentials,
        llm: Arc<dyn LlmClient>,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            manager,
            credentials,
            llm,
            llm_timeout,
        }
    }

    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    /// Handles one message from `user_id` and returns the reply. Blank text gets no
    /// reply and leaves the session untouched.
    #[instrument(skip(self, text), fields(provider = self.llm.provider_name()))]
    pub async fn process(&self, user_id: i64, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut session = self.manager.acquire(user_id).await;
        let key_prefix = self.llm.key_prefix();

        if let Some(command) = Command::parse(text) {
            return Some(self.run_command(&mut session, command));
        }

        if session.expired_while_authenticated() {
            return Some(SessionError::SessionExpired.user_message(key_prefix));
        }

        let outcome = match session.api_key().map(str::to_owned) {
            Some(api_key) => self.converse(&mut session, &api_key, text).await,
            None => self.authenticate(&mut session, text),
        };

        Some(match outcome {
            Ok(reply) => reply,
            Err(e) => {
                warn!(user_id, error = %e, "Message failed");
                e.user_message(key_prefix)
            }
        })
    }

    fn run_command(&self, session: &mut SessionGuard, command: Command) -> String {
        let key_prefix = self.llm.key_prefix();
        info!(user_id = session.user_id(), command = ?command, "step: command");
        match command {
            Command::Start => {
                session.reset();
                texts::welcome(key_prefix)
            }
            Command::Reset => {
                session.reset();
                texts::reset_done(key_prefix)
            }
            Command::Help => {
                let config = self.manager.config();
                texts::help(config.session_timeout_hours, config.max_conversation_length)
            }
            Command::Unknown(name) => texts::unknown_command(&name),
        }
    }

    /// Credential attempt from an unauthenticated session.
    fn authenticate(&self, session: &mut SessionEntry, text: &str) -> Result<String, SessionError> {
        let user_id = session.user_id();

        if self.credentials.matches_master_password(text) {
            let default_key = self
                .credentials
                .default_api_key()
                .ok_or(SessionError::MissingDefaultKey)?;
            session.authenticate(default_key);
            info!(user_id, "Authenticated with master password");
            return Ok(texts::AUTH_SUCCESS.to_string());
        }

        if self.llm.looks_like_api_key(text) && session.authenticate(text) {
            info!(user_id, api_key = %mask_token(text), "Authenticated with provisional API key");
            return Ok(texts::AUTH_KEY_ACCEPTED.to_string());
        }

        info!(user_id, "Credential attempt rejected");
        Err(SessionError::AuthRejected)
    }

    /// One LLM exchange. History is committed only when a non-empty reply arrives.
    async fn converse(
        &self,
        session: &mut SessionEntry,
        api_key: &str,
        text: &str,
    ) -> Result<String, SessionError> {
        let user_id = session.user_id();
        let request = session.history().with_pending(Turn::user(text));
        info!(user_id, turns = request.len(), "step: LLM request");

        let call = self.llm.complete(api_key, &request);
        let result = match tokio::time::timeout(self.llm_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout),
        };

        let reply = match result {
            Ok(reply) if reply.trim().is_empty() => {
                return Err(SessionError::LlmTransport("empty reply".to_string()))
            }
            Ok(reply) => reply,
            Err(LlmError::InvalidKey) => {
                session.deauthenticate();
                info!(user_id, api_key = %mask_token(api_key), "Provider rejected key, signed out");
                return Err(SessionError::LlmInvalidKey);
            }
            Err(e) => return Err(e.into()),
        };

        session.record_exchange(text, &reply);
        info!(
            user_id,
            reply_len = reply.len(),
            history_len = session.history().len(),
            "step: LLM reply recorded"
        );
        Ok(reply)
    }
}
