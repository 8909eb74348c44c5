use std::sync::Arc;

use storage::{JsonPaths, Storage};
use tracker_core::reminder::default_reminder_times;
use tracker_core::{Clock, ReminderTime};

use crate::bank_service::BankService;
use crate::controller::StudyController;
use crate::notifier::{LogNotifier, Notifier};
use crate::progress_service::ProgressService;
use crate::schedule_service::ScheduleService;

/// Assembles the services around one storage backend and builds a controller.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    banks: BankService,
    progress: ProgressService,
    schedules: ScheduleService,
    reminder_times: Vec<ReminderTime>,
    notifier: Arc<dyn Notifier>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock) -> Self {
        Self {
            clock,
            banks: BankService::new(Arc::clone(&storage.banks)),
            progress: ProgressService::new(Arc::clone(&storage.progress)),
            schedules: ScheduleService::new(Arc::clone(&storage.schedules)),
            reminder_times: default_reminder_times(),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Services backed by JSON documents.
    #[must_use]
    pub fn json_files(paths: JsonPaths, clock: Clock) -> Self {
        Self::new(&Storage::json_files(paths), clock)
    }

    #[must_use]
    pub fn with_reminder_times(mut self, times: Vec<ReminderTime>) -> Self {
        self.reminder_times = times;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Use a seeded random source for schedule generation.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.schedules = self.schedules.with_seed(seed);
        self
    }

    #[must_use]
    pub fn bank_service(&self) -> BankService {
        self.banks.clone()
    }

    #[must_use]
    pub fn progress_service(&self) -> ProgressService {
        self.progress.clone()
    }

    #[must_use]
    pub fn schedule_service(&self) -> ScheduleService {
        self.schedules.clone()
    }

    #[must_use]
    pub fn controller(&self) -> Arc<StudyController> {
        Arc::new(StudyController::new(
            self.clock,
            self.banks.clone(),
            self.progress.clone(),
            self.schedules.clone(),
            self.reminder_times.clone(),
            Arc::clone(&self.notifier),
        ))
    }
}
