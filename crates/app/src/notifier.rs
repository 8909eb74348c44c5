use services::Notifier;
use tracing::debug;
use tracker_core::ReminderDue;

/// Prints reminders to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn line(reminder: &ReminderDue) -> String {
        format!("[{}] {}", ReminderDue::TITLE, reminder.message())
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, reminder: &ReminderDue) {
        println!("{}", Self::line(reminder));
        debug!(
            category = reminder.task.category(),
            problem = reminder.task.problem().name(),
            at = %reminder.at,
            "reminder printed"
        );
    }
}
