use std::sync::Mutex;

use tracing::info;
use tracker_core::ReminderDue;

/// Delivery seam for reminders. Fire-and-forget: nothing is returned or retried.
pub trait Notifier: Send + Sync {
    fn notify(&self, reminder: &ReminderDue);
}

/// Emits reminders as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, reminder: &ReminderDue) {
        info!(
            title = ReminderDue::TITLE,
            category = reminder.task.category(),
            problem = reminder.task.problem().name(),
            at = %reminder.at,
            "{}",
            reminder.message()
        );
    }
}

/// Keeps every reminder in memory, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<ReminderDue>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    #[must_use]
    pub fn reminders(&self) -> Vec<ReminderDue> {
        self.delivered
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.delivered.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, reminder: &ReminderDue) {
        if let Ok(mut guard) = self.delivered.lock() {
            guard.push(reminder.clone());
        }
    }
}
