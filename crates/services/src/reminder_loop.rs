use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use tracker_core::Clock;

use crate::controller::StudyController;

/// Default polling cadence for due reminders.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Cooperative loop that checks for due reminders at a fixed interval.
pub struct ReminderLoop {
    controller: Arc<StudyController>,
    clock: Clock,
    interval: Duration,
}

impl ReminderLoop {
    /// Loop reading time from the controller's own clock.
    #[must_use]
    pub fn new(controller: Arc<StudyController>) -> Self {
        let clock = controller.clock();
        Self {
            controller,
            clock,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Poll once against the loop's clock.
    pub async fn tick(&self) -> usize {
        self.controller.poll(self.clock.local_now()).await
    }

    /// Poll until `shutdown` resolves. Returns the number of reminders delivered.
    pub async fn run_until<F>(self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(interval_ms = self.interval.as_millis() as u64, "reminder loop started");
        let mut delivered = 0;
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    let fired = self.tick().await;
                    if fired > 0 {
                        debug!(fired, "delivered reminders");
                    }
                    delivered += fired;
                }
            }
        }
        info!(delivered, "reminder loop stopped");
        delivered
    }
}
