//! Application settings loaded from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::status::{DEFAULT_USER_AGENT, STATUS_URL};

/// Telegram bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot API token (obtain from `@BotFather`).
    pub token: String,

    /// Chat to deliver status notifications to: a numeric chat id or
    /// `@channelusername`. Notifications are only logged when unset.
    pub notify_chat: Option<String>,
}

impl BotConfig {
    /// Creates configuration from environment variables.
    ///
    /// Expects `BOT_TOKEN` to be set; `NOTIFY_CHAT` is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if `BOT_TOKEN` is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("BOT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingEnvVar("BOT_TOKEN"))?;

        let notify_chat = std::env::var("NOTIFY_CHAT")
            .ok()
            .filter(|c| !c.trim().is_empty());

        Ok(Self { token, notify_chat })
    }
}

/// Monitor-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Seconds between status polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Timeout for a single status fetch, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Heartbeat interval in seconds; 0 disables heartbeats.
    #[serde(default)]
    pub heartbeat_secs: u64,

    /// Minimum seconds between outbound channel messages.
    #[serde(default = "default_min_notify_interval")]
    pub min_notify_interval_secs: u64,

    /// Status summary endpoint to poll.
    #[serde(default = "default_status_url")]
    pub status_url: String,

    /// User-Agent header sent with status requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_poll_interval() -> u64 {
    300
}

fn default_fetch_timeout() -> u64 {
    15
}

fn default_min_notify_interval() -> u64 {
    3
}

fn default_status_url() -> String {
    STATUS_URL.to_owned()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            fetch_timeout_secs: default_fetch_timeout(),
            heartbeat_secs: 0,
            min_notify_interval_secs: default_min_notify_interval(),
            status_url: default_status_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl MonitorSettings {
    /// Creates monitor settings from environment variables with
    /// defaults. Unparseable numbers fall back to the default.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self {
            poll_interval_secs: env_u64("POLL_INTERVAL_SECS", default_poll_interval()),
            fetch_timeout_secs: env_u64("FETCH_TIMEOUT_SECS", default_fetch_timeout()),
            heartbeat_secs: env_u64("HEARTBEAT_SECS", 0),
            min_notify_interval_secs: env_u64(
                "MIN_NOTIFY_INTERVAL_SECS",
                default_min_notify_interval(),
            ),
            status_url: std::env::var("STATUS_URL").unwrap_or_else(|_| default_status_url()),
            user_agent: std::env::var("USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        }
    }

    /// Poll interval as a [`Duration`].
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Fetch timeout as a [`Duration`].
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Heartbeat interval; `None` when disabled.
    #[must_use]
    pub const fn heartbeat(&self) -> Option<Duration> {
        if self.heartbeat_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.heartbeat_secs))
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
}
