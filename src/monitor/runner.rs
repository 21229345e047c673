//! Status polling loop.
//!
//! Each tick is: fetch, compare against the last known state, announce
//! on change, replace the slot. A failed fetch skips the tick and
//! leaves the slot untouched; a failed delivery is logged and dropped.
//! The first successful poll after startup always compares unequal to
//! the initial `Unknown` state and is announced as the baseline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, mpsc};
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use super::MonitorState;
use crate::status::StatusSource;
use crate::telegram::ChannelNotifier;
use crate::text::{self, Lang};

/// Default seconds between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);

/// Messages that can be sent to the monitor loop.
#[derive(Debug, Clone)]
pub enum MonitorMessage {
    /// Run a poll immediately instead of waiting for the next tick.
    TriggerPoll,
    /// Stop the loop.
    Shutdown,
}

/// Status polling and change-detection loop.
///
/// Sole writer of the shared [`MonitorState`].
pub struct StatusMonitor {
    /// Where observations come from.
    source: Arc<dyn StatusSource>,

    /// Where change notifications go.
    notifier: Arc<dyn ChannelNotifier>,

    /// Shared state; command handlers hold read access.
    state: Arc<RwLock<MonitorState>>,

    /// Time between polls.
    poll_interval: Duration,

    /// Optional heartbeat: announce the current state even without a
    /// change once this much time passed since the last announcement.
    heartbeat: Option<Duration>,
}

impl StatusMonitor {
    /// Creates a monitor with the default poll interval and no heartbeat.
    #[must_use]
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn ChannelNotifier>,
        state: Arc<RwLock<MonitorState>>,
    ) -> Self {
        Self {
            source,
            notifier,
            state,
            poll_interval: DEFAULT_POLL_INTERVAL,
            heartbeat: None,
        }
    }

    /// Sets the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the heartbeat interval (`None` disables heartbeats).
    #[must_use]
    pub const fn with_heartbeat(mut self, heartbeat: Option<Duration>) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    /// Runs the polling loop until a shutdown message arrives.
    ///
    /// The first tick fires immediately, so the baseline is established
    /// at startup rather than one interval later.
    pub async fn run(&self, mut rx: mpsc::Receiver<MonitorMessage>) {
        info!(
            "Status monitor started (poll interval: {:?})",
            self.poll_interval
        );

        let mut tick_timer = interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = tick_timer.tick() => {
                    self.tick().await;
                }
                msg = rx.recv() => {
                    match msg {
                        Some(MonitorMessage::TriggerPoll) => {
                            debug!("Received trigger poll message");
                            self.tick().await;
                        }
                        Some(MonitorMessage::Shutdown) | None => {
                            info!("Status monitor shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Single tick of the monitor: one fetch, at most one notification.
    async fn tick(&self) {
        let snapshot = match self.source.fetch_status().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Skip this tick; the slot keeps the last known state.
                warn!("Status fetch failed, skipping this tick: {}", e);
                return;
            }
        };

        let (previous, changed) = {
            let mut state = self.state.write().await;
            let previous = state.current_state();
            let changed = state.record_observation(snapshot.clone());
            (previous, changed)
        };

        if changed {
            info!("Status changed: {} -> {}", previous, snapshot.state);
            self.announce(&text::change_message(previous, &snapshot))
                .await;
            return;
        }

        debug!("Status unchanged: {}", snapshot.state);

        if let Some(heartbeat) = self.heartbeat {
            let due = self.state.read().await.heartbeat_due(heartbeat);
            if due {
                self.announce(&text::status_report(Lang::En, &snapshot))
                    .await;
            }
        }
    }

    /// Fire-and-forget delivery; a failure is logged and the message is
    /// dropped (the next detected change will report the new state).
    async fn announce(&self, message: &str) {
        match self.notifier.notify(message).await {
            Ok(()) => {
                self.state.write().await.mark_announced();
            }
            Err(e) => {
                error!("Failed to deliver notification: {}", e);
            }
        }
    }

    /// Gets a reference to the shared state.
    #[must_use]
    pub fn state(&self) -> &Arc<RwLock<MonitorState>> {
        &self.state
    }
}

impl std::fmt::Debug for StatusMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusMonitor")
            .field("poll_interval", &self.poll_interval)
            .field("heartbeat", &self.heartbeat)
            .finish_non_exhaustive()
    }
}
