//! Status page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{ServiceState, StatusSnapshot};

/// Public Reddit status summary endpoint (Statuspage.io v2 document).
pub const STATUS_URL: &str = "https://www.redditstatus.com/api/v2/summary.json";

/// Default User-Agent sent with status requests.
pub const DEFAULT_USER_AGENT: &str =
    "RedditStatusBot/0.3 (+https://github.com/user/reddit_status_bot)";

/// Errors that can occur while fetching the upstream status.
///
/// All of these are recoverable: the monitor skips the tick and keeps
/// the last known state.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("status request timed out")]
    Timeout,

    #[error("status request failed: {0}")]
    Network(String),

    #[error("status response malformed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// The parts of the Statuspage summary document this bot reads.
#[derive(Debug, Deserialize)]
struct StatusSummary {
    #[serde(default)]
    status: SummaryStatus,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryStatus {
    indicator: Option<String>,
    description: Option<String>,
}

/// Source of upstream status observations.
///
/// Production code talks to the public status page; tests substitute a
/// scripted source.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Performs one bounded observation of the upstream status.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on network failure, timeout, or a
    /// malformed response. Never panics and never blocks past the
    /// configured timeout.
    async fn fetch_status(&self) -> Result<StatusSnapshot, FetchError>;
}

/// Statuspage.io client for a public summary endpoint.
#[derive(Debug, Clone)]
pub struct StatusPageClient {
    http: reqwest::Client,
    url: String,
}

impl StatusPageClient {
    /// Creates a client for the given endpoint with a bounded timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Normalizes the wire document into a snapshot.
    fn normalize(summary: StatusSummary) -> StatusSnapshot {
        let state = summary
            .status
            .indicator
            .as_deref()
            .map_or(ServiceState::Unknown, ServiceState::from_indicator);

        StatusSnapshot::new(state, summary.status.description)
    }
}

#[async_trait]
impl StatusSource for StatusPageClient {
    async fn fetch_status(&self) -> Result<StatusSnapshot, FetchError> {
        debug!("Fetching status summary from {}", self.url);

        let response = self.http.get(&self.url).send().await?;
        let response = response.error_for_status()?;
        let summary: StatusSummary = response.json().await?;

        let snapshot = Self::normalize(summary);
        debug!(
            "Fetched status: {} ({:?})",
            snapshot.state, snapshot.raw_message
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> StatusSnapshot {
        let summary: StatusSummary = serde_json::from_str(json).unwrap();
        StatusPageClient::normalize(summary)
    }

    #[test]
    fn test_normalize_operational() {
        let snapshot = parse(
            r#"{"status": {"indicator": "none", "description": "All Systems Operational"}}"#,
        );
        assert_eq!(snapshot.state, ServiceState::Operational);
        assert_eq!(
            snapshot.raw_message.as_deref(),
            Some("All Systems Operational")
        );
    }

    #[test]
    fn test_normalize_outage() {
        let snapshot =
            parse(r#"{"status": {"indicator": "major", "description": "Partial Outage"}}"#);
        assert_eq!(snapshot.state, ServiceState::Outage);
    }

    #[test]
    fn test_normalize_unrecognized_indicator() {
        let snapshot = parse(r#"{"status": {"indicator": "weird", "description": null}}"#);
        assert_eq!(snapshot.state, ServiceState::Unknown);
        assert!(snapshot.raw_message.is_none());
    }

    #[test]
    fn test_normalize_missing_status_block() {
        let snapshot = parse(r"{}");
        assert_eq!(snapshot.state, ServiceState::Unknown);
    }

    #[test]
    fn test_malformed_body_is_a_parse_error() {
        let result: Result<StatusSummary, _> = serde_json::from_str("not json");
        assert!(result.is_err());
    }
}
