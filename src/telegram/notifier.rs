//! Channel notification delivery.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::RateLimiter;

/// Errors that can occur while delivering a channel message.
///
/// All of these are recoverable: the message is dropped and the state
/// update proceeds; a missed notification is acceptable.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Telegram asked to retry after {0} seconds")]
    RetryAfter(u32),

    #[error("Failed to send message: {0}")]
    Request(String),
}

impl From<RequestError> for DeliveryError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::RetryAfter(secs) => Self::RetryAfter(secs.seconds()),
            other => Self::Request(other.to_string()),
        }
    }
}

/// Delivery channel for status notifications.
///
/// Production code sends messages via Telegram; tests substitute
/// another impl.
#[async_trait]
pub trait ChannelNotifier: Send + Sync {
    /// Delivers one message to the configured channel.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the send fails. Callers treat
    /// every failure as recoverable.
    async fn notify(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Telegram-backed notifier for a single chat or channel.
pub struct TelegramNotifier {
    /// The underlying Bot API client.
    bot: Bot,

    /// Where notifications go.
    chat: Recipient,

    /// Pacing guard for outbound sends.
    rate_limiter: RateLimiter,
}

impl TelegramNotifier {
    /// Creates a notifier for the given chat.
    #[must_use]
    pub fn new(bot: Bot, chat: Recipient, min_interval_secs: u64) -> Self {
        Self {
            bot,
            chat,
            rate_limiter: RateLimiter::from_secs(min_interval_secs),
        }
    }

    /// Parses a chat identifier: a numeric chat id or `@channelusername`.
    #[must_use]
    pub fn parse_recipient(raw: &str) -> Option<Recipient> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Some(Recipient::Id(ChatId(id)));
        }
        if raw.starts_with('@') && raw.len() > 1 {
            return Some(Recipient::ChannelUsername(raw.to_owned()));
        }
        None
    }
}

#[async_trait]
impl ChannelNotifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), DeliveryError> {
        let waited = self.rate_limiter.wait_and_acquire().await;
        if !waited.is_zero() {
            debug!("Waited {:?} before sending notification", waited);
        }

        match self.bot.send_message(self.chat.clone(), text).await {
            Ok(_message) => {
                debug!("Notification delivered");
                Ok(())
            }
            Err(e) => {
                let err: DeliveryError = e.into();
                if let DeliveryError::RetryAfter(seconds) = &err {
                    warn!("Telegram flood control: retry after {} seconds", seconds);
                    self.rate_limiter
                        .hold_for(Duration::from_secs(u64::from(*seconds)))
                        .await;
                }
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat", &self.chat)
            .field("rate_limiter", &self.rate_limiter)
            .finish_non_exhaustive()
    }
}

/// Notifier used when no channel is configured: the message is logged
/// locally and dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyNotifier;

#[async_trait]
impl ChannelNotifier for LogOnlyNotifier {
    async fn notify(&self, text: &str) -> Result<(), DeliveryError> {
        let first_line = text.lines().next().unwrap_or_default();
        info!("No notify channel configured, dropping: {}", first_line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipient_numeric_id() {
        assert_eq!(
            TelegramNotifier::parse_recipient("-1001234567890"),
            Some(Recipient::Id(ChatId(-1_001_234_567_890)))
        );
    }

    #[test]
    fn test_parse_recipient_channel_username() {
        assert_eq!(
            TelegramNotifier::parse_recipient("@reddit_status"),
            Some(Recipient::ChannelUsername("@reddit_status".to_owned()))
        );
    }

    #[test]
    fn test_parse_recipient_rejects_garbage() {
        assert_eq!(TelegramNotifier::parse_recipient(""), None);
        assert_eq!(TelegramNotifier::parse_recipient("@"), None);
        assert_eq!(TelegramNotifier::parse_recipient("not a chat"), None);
    }

    #[tokio::test]
    async fn test_log_only_notifier_always_succeeds() {
        let notifier = LogOnlyNotifier;
        assert!(notifier.notify("✅ Reddit is operating normally.").await.is_ok());
    }
}
