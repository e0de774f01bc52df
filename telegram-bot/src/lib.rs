//! # Telegram bot application
//!
//! Wires the session gate into a handler chain behind teloxide long polling. Loads config
//! from env, serves a health endpoint and periodically sweeps expired sessions.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod health;
pub mod queue;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_gate, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig};
pub use handlers::{LoggingHandler, SessionHandler};
pub use health::{health_routes, BotStatus, HealthState};
pub use queue::UserQueues;
pub use runner::{run_bot, spawn_sweep_task};
pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use chatgate_core::{Bot, Chat, Handler, HandlerResponse, Message, User};
