//! # session
//!
//! Session and conversation-state management for the bot.
//!
//! - [`Credentials`]: master password and default API key, read-only after startup.
//! - [`SessionEntry`]: one user's auth state, key, history and last activity.
//! - [`ConversationWindow`]: bounded FIFO history of [`Turn`]s.
//! - [`SessionManager`]: user id → entry map with lazy expiry, sweep and per-user locking.
//! - [`AuthGate`]: the per-message state machine (commands, credential attempts, LLM calls).
//!
//! All state is in memory and lives as long as the process.

mod clock;
mod command;
mod config;
mod credentials;
mod entry;
mod error;
mod gate;
mod manager;
pub mod texts;
mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::Command;
pub use config::SessionConfig;
pub use credentials::Credentials;
pub use entry::{AuthState, SessionEntry};
pub use error::SessionError;
pub use gate::AuthGate;
pub use llm_client::{Role, Turn};
pub use manager::{SessionGuard, SessionHandle, SessionManager};
pub use window::ConversationWindow;
