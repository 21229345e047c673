//! Pacing guard for outbound Telegram messages.
//!
//! Keeps a minimum interval between sends and honors the retry-after
//! delays Telegram's flood control hands back.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

/// Enforces a minimum interval between sends.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum duration between allowed sends.
    min_interval: Duration,

    /// Earliest instant the next send is allowed at.
    next_allowed: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a rate limiter with the specified minimum interval.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_allowed: Mutex::new(None),
        }
    }

    /// Creates a rate limiter from seconds.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Waits until a send is allowed, then reserves the next slot.
    ///
    /// Returns the duration waited (zero if no wait was needed).
    pub async fn wait_and_acquire(&self) -> Duration {
        let mut next = self.next_allowed.lock().await;

        let wait = match *next {
            Some(at) => at.saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        };

        if !wait.is_zero() {
            debug!("Rate limiter: waiting {:?} before next send", wait);
            tokio::time::sleep(wait).await;
        }

        *next = Some(Instant::now() + self.min_interval);
        wait
    }

    /// Pushes the next allowed send out to at least `delay` from now.
    ///
    /// Used when Telegram answers with a retry-after; the current send
    /// already failed, so this does not sleep.
    pub async fn hold_for(&self, delay: Duration) {
        let mut next = self.next_allowed.lock().await;
        let candidate = Instant::now() + delay;
        *next = Some(next.map_or(candidate, |at| at.max(candidate)));
        debug!("Rate limiter: send window pushed out by {:?}", delay);
    }

    /// Time remaining until the next send is allowed.
    pub async fn time_until_allowed(&self) -> Duration {
        let next = self.next_allowed.lock().await;
        match *next {
            Some(at) => at.saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        }
    }
}
