use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracker_core::model::{ProblemBank, ProgressLog, WeeklySchedule};

use crate::json::{JsonFileRepository, JsonPaths};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("malformed data: {0}")]
    Malformed(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl StorageError {
    /// True for the two conditions callers treat as "start from empty".
    #[must_use]
    pub fn is_recoverable_read(&self) -> bool {
        matches!(self, StorageError::NotFound | StorageError::Malformed(_))
    }
}

/// Repository contract for the problem bank document.
#[async_trait]
pub trait ProblemBankRepository: Send + Sync {
    /// Load the persisted bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing has been stored yet,
    /// `StorageError::Malformed` if the stored content cannot be parsed.
    async fn load_bank(&self) -> Result<ProblemBank, StorageError>;

    /// Overwrite the persisted bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be written.
    async fn save_bank(&self, bank: &ProblemBank) -> Result<(), StorageError>;
}

/// Repository contract for the progress log document.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the persisted progress log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` or `StorageError::Malformed` for missing
    /// or unreadable content, other variants for I/O failures.
    async fn load_progress(&self) -> Result<ProgressLog, StorageError>;

    /// Overwrite the persisted progress log with `log`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be written.
    async fn save_progress(&self, log: &ProgressLog) -> Result<(), StorageError>;

    /// Create an empty progress document if none exists.
    ///
    /// Returns `true` when a new document was created.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the empty document cannot be written.
    async fn ensure_progress(&self) -> Result<bool, StorageError>;
}

/// Repository contract for the most recently generated weekly schedule.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no schedule has been written.
    async fn load_schedule(&self) -> Result<WeeklySchedule, StorageError>;

    /// Overwrite the stored schedule.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the schedule cannot be written.
    async fn save_schedule(&self, schedule: &WeeklySchedule) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// `None` slots behave like missing files. Writes can be forced to fail to
/// exercise error paths.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    bank: Arc<Mutex<Option<ProblemBank>>>,
    progress: Arc<Mutex<Option<ProgressLog>>>,
    schedule: Arc<Mutex<Option<WeeklySchedule>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with a bank.
    #[must_use]
    pub fn with_bank(bank: ProblemBank) -> Self {
        let repo = Self::new();
        if let Ok(mut guard) = repo.bank.lock() {
            *guard = Some(bank);
        }
        repo
    }

    /// Make every subsequent write fail with `StorageError::Io`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("writes disabled".into()));
        }
        Ok(())
    }
}

fn read_slot<T: Clone>(slot: &Mutex<Option<T>>) -> Result<T, StorageError> {
    let guard = slot
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))?;
    guard.clone().ok_or(StorageError::NotFound)
}

fn write_slot<T: Clone>(slot: &Mutex<Option<T>>, value: &T) -> Result<(), StorageError> {
    let mut guard = slot
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))?;
    *guard = Some(value.clone());
    Ok(())
}

#[async_trait]
impl ProblemBankRepository for InMemoryRepository {
    async fn load_bank(&self) -> Result<ProblemBank, StorageError> {
        read_slot(&self.bank)
    }

    async fn save_bank(&self, bank: &ProblemBank) -> Result<(), StorageError> {
        self.check_writable()?;
        write_slot(&self.bank, bank)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<ProgressLog, StorageError> {
        read_slot(&self.progress)
    }

    async fn save_progress(&self, log: &ProgressLog) -> Result<(), StorageError> {
        self.check_writable()?;
        write_slot(&self.progress, log)
    }

    async fn ensure_progress(&self) -> Result<bool, StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.is_some() {
            return Ok(false);
        }
        self.check_writable()?;
        *guard = Some(ProgressLog::new());
        Ok(true)
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryRepository {
    async fn load_schedule(&self) -> Result<WeeklySchedule, StorageError> {
        read_slot(&self.schedule)
    }

    async fn save_schedule(&self, schedule: &WeeklySchedule) -> Result<(), StorageError> {
        self.check_writable()?;
        write_slot(&self.schedule, schedule)
    }
}

/// Aggregates the three repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub banks: Arc<dyn ProblemBankRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repo(InMemoryRepository::new())
    }

    /// Storage backed by JSON documents at `paths`.
    #[must_use]
    pub fn json_files(paths: JsonPaths) -> Self {
        Self::from_repo(JsonFileRepository::new(paths))
    }

    /// Share one repository implementing all three contracts.
    #[must_use]
    pub fn from_repo<R>(repo: R) -> Self
    where
        R: ProblemBankRepository + ProgressRepository + ScheduleRepository + Clone + 'static,
    {
        let banks: Arc<dyn ProblemBankRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let schedules: Arc<dyn ScheduleRepository> = Arc::new(repo);
        Self {
            banks,
            progress,
            schedules,
        }
    }
}
