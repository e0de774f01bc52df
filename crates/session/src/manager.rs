//! User id → session map with lazy expiry, a periodic sweep and per-user serialization.
//!
//! The map lock is only held to look up or insert an entry handle. Work on a session
//! happens under that session's own [`tokio::sync::Mutex`], which is fair: concurrent
//! messages from one user queue up and run one at a time in arrival order, while other
//! users proceed independently.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::entry::SessionEntry;

/// Shared handle to one user's entry.
pub type SessionHandle = Arc<Mutex<SessionEntry>>;

pub struct SessionManager {
    sessions: RwLock<HashMap<i64, SessionHandle>>,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the user's entry, creating a fresh unauthenticated one if absent.
    pub async fn get_or_create(&self, user_id: i64) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(&user_id) {
            return Arc::clone(handle);
        }

        let mut sessions = self.sessions.write().await;
        let handle = sessions.entry(user_id).or_insert_with(|| {
            debug!(user_id, "Creating session");
            Arc::new(Mutex::new(SessionEntry::new(
                user_id,
                self.config.max_conversation_length,
                self.clock.now(),
            )))
        });
        Arc::clone(handle)
    }

    /// Clears history and authentication. Idempotent.
    pub async fn reset(&self, user_id: i64) {
        let handle = self.get_or_create(user_id).await;
        handle.lock().await.reset();
        info!(user_id, "Session reset");
    }

    pub async fn touch(&self, user_id: i64) {
        let handle = self.get_or_create(user_id).await;
        let now = self.clock.now();
        handle.lock().await.touch(now);
    }

    /// Whether the user's session has been idle longer than the timeout. False for unknown users.
    pub async fn is_expired(&self, user_id: i64) -> bool {
        let handle = match self.sessions.read().await.get(&user_id) {
            Some(handle) => Arc::clone(handle),
            None => return false,
        };
        let entry = handle.lock().await;
        entry.is_expired(self.clock.now(), self.config.session_timeout())
    }

    /// Locks the user's session for the duration of one message. Waits behind earlier
    /// messages from the same user. An expired entry is reset before it is handed out;
    /// the entry is then touched.
    pub async fn acquire(&self, user_id: i64) -> SessionGuard {
        let handle = self.get_or_create(user_id).await;
        let mut entry = handle.lock_owned().await;

        let now = self.clock.now();
        let was_expired = entry.is_expired(now, self.config.session_timeout());
        let expired_while_authenticated = was_expired && entry.is_authenticated();
        if was_expired {
            info!(
                user_id,
                was_authenticated = expired_while_authenticated,
                "Session expired, resetting"
            );
            entry.reset();
        }
        entry.touch(now);

        SessionGuard {
            entry,
            was_expired,
            expired_while_authenticated,
        }
    }

    /// Copy of the user's entry without touching it, if one exists.
    pub async fn snapshot(&self, user_id: i64) -> Option<SessionEntry> {
        let handle = Arc::clone(self.sessions.read().await.get(&user_id)?);
        let entry = handle.lock().await;
        Some(entry.clone())
    }

    /// Drops expired entries nobody is using. Entries currently locked or waited on
    /// are left alone; [`acquire`](Self::acquire) expires them lazily. Returns how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let timeout = self.config.session_timeout();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Ok(entry) => !entry.is_expired(now, timeout),
                Err(_) => true,
            }
        });

        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "Swept expired sessions");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Exclusive access to one user's entry. Dropping it lets the next queued message in.
pub struct SessionGuard {
    entry: OwnedMutexGuard<SessionEntry>,
    was_expired: bool,
    expired_while_authenticated: bool,
}

impl SessionGuard {
    /// The entry had expired and was reset on acquisition.
    pub fn was_expired(&self) -> bool {
        self.was_expired
    }

    /// The entry had expired while authenticated; the user has to sign in again.
    pub fn expired_while_authenticated(&self) -> bool {
        self.expired_while_authenticated
    }
}

impl Deref for SessionGuard {
    type Target = SessionEntry;

    fn deref(&self) -> &SessionEntry {
        &self.entry
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut SessionEntry {
        &mut self.entry
    }
}
