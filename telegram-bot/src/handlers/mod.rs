//! Handlers in the chain: request logging and the session gate.

mod logging_handler;
mod session_handler;

pub use logging_handler::LoggingHandler;
pub use session_handler::SessionHandler;
