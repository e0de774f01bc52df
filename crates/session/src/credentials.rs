use llm_client::mask_token;
use std::env;
use std::fmt;

/// Secrets loaded once at startup. Empty values count as unset.
#[derive(Clone, Default)]
pub struct Credentials {
    master_password: Option<String>,
    default_api_key: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Credentials {
    pub fn new(master_password: Option<String>, default_api_key: Option<String>) -> Self {
        Self {
            master_password: non_empty(master_password),
            default_api_key: non_empty(default_api_key),
        }
    }

    /// Load from MASTER_PASSWORD and DEFAULT_API_KEY (or DEFAULT_CLAUDE_API_KEY).
    pub fn from_env() -> Self {
        let default_api_key = non_empty(env::var("DEFAULT_API_KEY").ok())
            .or_else(|| env::var("DEFAULT_CLAUDE_API_KEY").ok());
        Self::new(env::var("MASTER_PASSWORD").ok(), default_api_key)
    }

    pub fn has_master_password(&self) -> bool {
        self.master_password.is_some()
    }

    /// True only when a password is configured and `candidate` equals it.
    pub fn matches_master_password(&self, candidate: &str) -> bool {
        match &self.master_password {
            Some(password) => !candidate.is_empty() && candidate == password,
            None => false,
        }
    }

    pub fn default_api_key(&self) -> Option<&str> {
        self.default_api_key.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("master_password", &self.master_password.as_ref().map(|_| "***"))
            .field(
                "default_api_key",
                &self.default_api_key.as_deref().map(mask_token),
            )
            .finish()
    }
}
