//! Telegram delivery.
//!
//! Fire-and-forget channel notifications with send pacing. Command
//! replies go through the dispatcher in `main` and do not pass
//! through this module.

mod notifier;
mod rate_limiter;

pub use notifier::{ChannelNotifier, DeliveryError, LogOnlyNotifier, TelegramNotifier};
pub use rate_limiter::RateLimiter;
