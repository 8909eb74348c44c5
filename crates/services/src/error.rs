//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use tracker_core::model::BankError;
use tracker_core::scheduler::GenerationError;

/// Errors emitted by `BankService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankServiceError {
    #[error(transparent)]
    Validation(#[from] BankError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("failed to persist progress: {0}")]
    Persist(#[source] StorageError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ScheduleService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScheduleServiceError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("failed to persist schedule: {0}")]
    Persist(#[source] StorageError),
}

/// Errors emitted by `StudyController` commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error(transparent)]
    Bank(#[from] BankServiceError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
    #[error(transparent)]
    Schedule(#[from] ScheduleServiceError),
}
