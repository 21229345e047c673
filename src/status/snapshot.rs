//! Normalized status observations.

use chrono::{DateTime, Utc};

/// Normalized upstream service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Everything is running normally.
    Operational,

    /// Partial degradation reported.
    Degraded,

    /// Major or critical outage reported.
    Outage,

    /// No successful observation yet, or an unrecognized upstream value.
    Unknown,
}

impl ServiceState {
    /// Maps a Statuspage `status.indicator` value to a normalized state.
    ///
    /// Unrecognized values map to `Unknown` rather than failing the fetch.
    #[must_use]
    pub fn from_indicator(indicator: &str) -> Self {
        match indicator.trim().to_lowercase().as_str() {
            "none" => Self::Operational,
            "minor" => Self::Degraded,
            "major" | "critical" => Self::Outage,
            _ => Self::Unknown,
        }
    }

    /// Short label used in log lines and message text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Degraded => "degraded",
            Self::Outage => "outage",
            Self::Unknown => "unknown",
        }
    }

    /// Marker used in front of history lines.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Operational => "✅",
            Self::Degraded => "⚠️",
            Self::Outage => "🛑",
            Self::Unknown => "❓",
        }
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One point-in-time observation of the upstream status.
///
/// Immutable once created; the monitor replaces the whole snapshot on
/// every successful poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// When the observation was made.
    pub observed_at: DateTime<Utc>,

    /// Normalized state.
    pub state: ServiceState,

    /// Upstream human-readable description, when present.
    pub raw_message: Option<String>,
}

impl StatusSnapshot {
    /// Creates a snapshot observed now.
    #[must_use]
    pub fn new(state: ServiceState, raw_message: Option<String>) -> Self {
        Self {
            observed_at: Utc::now(),
            state,
            raw_message,
        }
    }

    /// The slot value before any successful poll.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(ServiceState::Unknown, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_mapping() {
        assert_eq!(
            ServiceState::from_indicator("none"),
            ServiceState::Operational
        );
        assert_eq!(
            ServiceState::from_indicator("minor"),
            ServiceState::Degraded
        );
        assert_eq!(ServiceState::from_indicator("major"), ServiceState::Outage);
        assert_eq!(
            ServiceState::from_indicator("critical"),
            ServiceState::Outage
        );
    }

    #[test]
    fn test_indicator_mapping_is_lenient() {
        assert_eq!(ServiceState::from_indicator("NONE"), ServiceState::Operational);
        assert_eq!(ServiceState::from_indicator(" minor "), ServiceState::Degraded);
        assert_eq!(
            ServiceState::from_indicator("maintenance"),
            ServiceState::Unknown
        );
        assert_eq!(ServiceState::from_indicator(""), ServiceState::Unknown);
    }

    #[test]
    fn test_initial_snapshot_is_unknown() {
        let snapshot = StatusSnapshot::initial();
        assert_eq!(snapshot.state, ServiceState::Unknown);
        assert!(snapshot.raw_message.is_none());
    }
}
