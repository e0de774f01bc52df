//! # chatgate-core
//!
//! Core types and traits for the bot: [`Bot`], [`Handler`], message and user types,
//! message splitting and tracing initialization. Transport-agnostic; used by handler-chain and telegram-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{split_message, Bot, TELEGRAM_MESSAGE_LIMIT};
pub use error::{ChatgateError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User,
};
