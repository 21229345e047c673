//! Configuration module for the status bot.
//!
//! Everything comes from the environment at process start: the bot
//! credential, the optional notify channel, and the monitor tunables.

mod settings;

pub use settings::{BotConfig, ConfigError, MonitorSettings};
