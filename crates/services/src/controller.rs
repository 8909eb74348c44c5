use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracker_core::model::{Problem, ProblemBank, ProgressLog, WeeklySchedule};
use tracker_core::{Clock, ReminderClock, ReminderTime};

use crate::bank_service::BankService;
use crate::error::ControllerError;
use crate::notifier::Notifier;
use crate::progress_service::ProgressService;
use crate::schedule_service::ScheduleService;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

struct TrackerState {
    bank: ProblemBank,
    schedule: WeeklySchedule,
    progress: ProgressLog,
    reminders: ReminderClock,
}

/// What `bootstrap` ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSummary {
    pub categories: usize,
    pub problems: usize,
    pub scheduled_tasks: usize,
    pub reminders: usize,
    pub progress_records: usize,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the active bank, schedule, progress log and reminder triggers.
///
/// All state sits behind one async mutex, so the reminder loop and command
/// callers can share the controller and progress writes stay single-writer.
pub struct StudyController {
    clock: Clock,
    banks: BankService,
    progress: ProgressService,
    schedules: ScheduleService,
    notifier: Arc<dyn Notifier>,
    state: Mutex<TrackerState>,
}

impl StudyController {
    #[must_use]
    pub fn new(
        clock: Clock,
        banks: BankService,
        progress: ProgressService,
        schedules: ScheduleService,
        reminder_times: Vec<ReminderTime>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            clock,
            banks,
            progress,
            schedules,
            notifier,
            state: Mutex::new(TrackerState {
                bank: ProblemBank::new(),
                schedule: WeeklySchedule::default(),
                progress: ProgressLog::new(),
                reminders: ReminderClock::new(reminder_times),
            }),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Load the bank and progress log without touching the schedule.
    ///
    /// Creates an empty progress document first if none exists. Missing or
    /// malformed files leave empty state behind.
    pub async fn open(&self) {
        if let Err(err) = self.progress.ensure_exists().await {
            warn!(error = %err, "could not create progress file");
        }
        let bank = self.banks.load().await;
        let progress = self.progress.load().await;

        let mut state = self.state.lock().await;
        state.bank = bank;
        state.progress = progress;
    }

    /// Load everything, generate this run's schedule and register reminders.
    ///
    /// Never fails: generation or write errors are logged and the controller
    /// keeps running with whatever state it has.
    pub async fn bootstrap(&self) -> BootstrapSummary {
        self.open().await;
        if let Err(err) = self.regenerate().await {
            warn!(error = %err, "starting without a fresh schedule");
        }

        let state = self.state.lock().await;
        let summary = BootstrapSummary {
            categories: state.bank.len(),
            problems: state.bank.problem_count(),
            scheduled_tasks: state.schedule.len(),
            reminders: state.reminders.len(),
            progress_records: state.progress.total_completed(),
        };
        info!(
            categories = summary.categories,
            tasks = summary.scheduled_tasks,
            reminders = summary.reminders,
            "tracker ready"
        );
        summary
    }

    /// Generate a new schedule from the current bank, persist it and re-register reminders.
    ///
    /// On generation failure the old schedule and its triggers are dropped and
    /// nothing is written. On write failure the new schedule still takes effect.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Schedule` for generation or write failures.
    pub async fn regenerate(&self) -> Result<WeeklySchedule, ControllerError> {
        let mut state = self.state.lock().await;
        let schedule = match self.schedules.generate(&state.bank) {
            Ok(schedule) => schedule,
            Err(err) => {
                state.schedule = WeeklySchedule::default();
                state.reminders.clear();
                return Err(err.into());
            }
        };

        state.schedule = schedule.clone();
        let now = self.clock.local_now();
        state.reminders.register(&schedule, now);
        info!(
            triggers = state.reminders.len(),
            next = ?state.reminders.next_fire(),
            "reminders registered"
        );
        drop(state);

        self.schedules.persist(&schedule).await?;
        Ok(schedule)
    }

    /// Record a completion under `date` and persist the whole log.
    ///
    /// The in-memory record is kept even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Progress` if the log cannot be written.
    pub async fn mark_done(
        &self,
        date: NaiveDate,
        category: &str,
        problem_name: &str,
    ) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        if !state.bank.contains(category, problem_name) {
            warn!(category, problem = problem_name, "marking a problem that is not in the bank");
        }
        state.progress = state.progress.mark_done(date, category, problem_name);
        info!(%date, category, problem = problem_name, "marked done");

        self.progress.persist(&state.progress).await?;
        Ok(())
    }

    /// [`StudyController::mark_done`] for the clock's local date.
    ///
    /// # Errors
    ///
    /// See [`StudyController::mark_done`].
    pub async fn mark_done_today(
        &self,
        category: &str,
        problem_name: &str,
    ) -> Result<NaiveDate, ControllerError> {
        let today = self.clock.today();
        self.mark_done(today, category, problem_name).await?;
        Ok(today)
    }

    /// Replace the bank from JSON text. The current schedule is left as is.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Bank` if the text is rejected or cannot be
    /// written; the previous bank stays active in both cases.
    pub async fn replace_bank(&self, text: &str) -> Result<(), ControllerError> {
        let bank = self.banks.replace(text).await?;
        self.state.lock().await.bank = bank;
        Ok(())
    }

    /// Fire every reminder due at `now` through the notifier.
    ///
    /// Returns how many reminders were delivered.
    pub async fn poll(&self, now: NaiveDateTime) -> usize {
        let due = self.state.lock().await.reminders.tick(now);
        for reminder in &due {
            self.notifier.notify(reminder);
        }
        due.len()
    }

    pub async fn categories(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .bank
            .categories()
            .map(str::to_owned)
            .collect()
    }

    pub async fn problems(&self, category: &str) -> Option<Vec<Problem>> {
        self.state
            .lock()
            .await
            .bank
            .problems(category)
            .map(<[Problem]>::to_vec)
    }

    pub async fn bank(&self) -> ProblemBank {
        self.state.lock().await.bank.clone()
    }

    pub async fn schedule(&self) -> WeeklySchedule {
        self.state.lock().await.schedule.clone()
    }

    pub async fn progress(&self) -> ProgressLog {
        self.state.lock().await.progress.clone()
    }

    /// Earliest pending reminder, if any triggers are registered.
    pub async fn next_reminder(&self) -> Option<NaiveDateTime> {
        self.state.lock().await.reminders.next_fire()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
