//! Command handling.
//!
//! Parses and answers the `/start`, `/status` and `/graph` chat
//! commands. Handlers only read the shared monitor state.

mod handler;
mod types;

pub use handler::CommandHandler;
pub use types::BotCommand;
