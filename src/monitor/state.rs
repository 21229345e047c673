//! Monitor state: the last-known-status slot and the incident log.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::status::{ServiceState, StatusSnapshot};

/// Maximum number of incident log entries kept in memory.
pub const INCIDENT_LOG_CAP: usize = 512;

/// One recorded state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentLogEntry {
    /// When the change was observed.
    pub at: DateTime<Utc>,

    /// The state entered at that point.
    pub state: ServiceState,
}

/// Shared monitoring state.
///
/// The polling loop is the only writer; command handlers only read.
/// Starts out as an `Unknown` snapshot and always reflects the most
/// recent successfully completed poll afterwards.
#[derive(Debug)]
pub struct MonitorState {
    /// Most recent successfully observed snapshot.
    last: StatusSnapshot,

    /// Ordered record of state changes, oldest first, bounded by
    /// [`INCIDENT_LOG_CAP`].
    incidents: VecDeque<IncidentLogEntry>,

    /// When the last channel message went out (change or heartbeat).
    last_announced: Option<Instant>,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorState {
    /// Creates the initial state (no successful poll yet).
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: StatusSnapshot::initial(),
            incidents: VecDeque::new(),
            last_announced: None,
        }
    }

    /// The most recent successfully observed snapshot.
    #[must_use]
    pub fn last_snapshot(&self) -> &StatusSnapshot {
        &self.last
    }

    /// The normalized state of the most recent successful poll.
    #[must_use]
    pub fn current_state(&self) -> ServiceState {
        self.last.state
    }

    /// Records a successful observation and reports whether it was a
    /// state change.
    ///
    /// On change the incident log gains an entry (dropping the oldest
    /// one at capacity); either way the snapshot slot is replaced, so
    /// the timestamp refreshes even for an unchanged state.
    pub fn record_observation(&mut self, snapshot: StatusSnapshot) -> bool {
        let changed = snapshot.state != self.last.state;

        if changed {
            if self.incidents.len() == INCIDENT_LOG_CAP {
                self.incidents.pop_front();
            }
            self.incidents.push_back(IncidentLogEntry {
                at: snapshot.observed_at,
                state: snapshot.state,
            });
        }

        self.last = snapshot;
        changed
    }

    /// Marks that a channel message was just delivered.
    pub fn mark_announced(&mut self) {
        self.last_announced = Some(Instant::now());
    }

    /// Whether a heartbeat message is due for the given interval.
    ///
    /// Due when nothing was ever announced, or when the last
    /// announcement is at least `interval` old.
    #[must_use]
    pub fn heartbeat_due(&self, interval: Duration) -> bool {
        match self.last_announced {
            Some(at) => at.elapsed() >= interval,
            None => true,
        }
    }

    /// The most recent `limit` incident entries, oldest first.
    #[must_use]
    pub fn recent_incidents(&self, limit: usize) -> Vec<IncidentLogEntry> {
        let skip = self.incidents.len().saturating_sub(limit);
        self.incidents.iter().skip(skip).cloned().collect()
    }

    /// Total number of recorded state changes still in the log.
    #[must_use]
    pub fn incident_count(&self) -> usize {
        self.incidents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_unknown() {
        let state = MonitorState::new();
        assert_eq!(state.current_state(), ServiceState::Unknown);
        assert_eq!(state.incident_count(), 0);
    }

    #[test]
    fn test_baseline_counts_as_a_change() {
        let mut state = MonitorState::new();
        let changed =
            state.record_observation(StatusSnapshot::new(ServiceState::Operational, None));
        assert!(changed);
        assert_eq!(state.current_state(), ServiceState::Operational);
        assert_eq!(state.incident_count(), 1);
    }

    #[test]
    fn test_repeated_state_is_not_a_change() {
        let mut state = MonitorState::new();
        state.record_observation(StatusSnapshot::new(ServiceState::Operational, None));

        let second = StatusSnapshot::new(
            ServiceState::Operational,
            Some("All Systems Operational".to_owned()),
        );
        let changed = state.record_observation(second.clone());

        assert!(!changed);
        assert_eq!(state.incident_count(), 1);
        // The slot still refreshes to the latest observation.
        assert_eq!(state.last_snapshot(), &second);
    }

    #[test]
    fn test_repeated_unknown_is_not_a_change() {
        let mut state = MonitorState::new();
        let changed = state.record_observation(StatusSnapshot::new(ServiceState::Unknown, None));
        assert!(!changed);
        assert_eq!(state.incident_count(), 0);
    }

    #[test]
    fn test_incident_log_is_bounded() {
        let mut state = MonitorState::new();
        for i in 0..(INCIDENT_LOG_CAP + 10) {
            let next = if i % 2 == 0 {
                ServiceState::Operational
            } else {
                ServiceState::Outage
            };
            state.record_observation(StatusSnapshot::new(next, None));
        }
        assert_eq!(state.incident_count(), INCIDENT_LOG_CAP);
    }

    #[test]
    fn test_recent_incidents_keeps_latest() {
        let mut state = MonitorState::new();
        state.record_observation(StatusSnapshot::new(ServiceState::Operational, None));
        state.record_observation(StatusSnapshot::new(ServiceState::Outage, None));
        state.record_observation(StatusSnapshot::new(ServiceState::Operational, None));

        let recent = state.recent_incidents(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].state, ServiceState::Outage);
        assert_eq!(recent[1].state, ServiceState::Operational);
    }

    #[test]
    fn test_heartbeat_due_before_any_announcement() {
        let state = MonitorState::new();
        assert!(state.heartbeat_due(Duration::from_secs(3600)));
    }

    #[test]
    fn test_heartbeat_not_due_right_after_announcement() {
        let mut state = MonitorState::new();
        state.mark_announced();
        assert!(!state.heartbeat_due(Duration::from_secs(3600)));
        assert!(state.heartbeat_due(Duration::ZERO));
    }
}
