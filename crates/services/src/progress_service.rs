use std::sync::Arc;

use storage::StorageError;
use storage::repository::ProgressRepository;
use tracing::{debug, info, warn};
use tracker_core::model::ProgressLog;

use crate::error::ProgressServiceError;

/// Reads and writes the progress log document.
///
/// Appending is done on the in-memory log via [`ProgressLog::mark_done`]; this
/// service only moves whole logs in and out of storage.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Create an empty progress document if there is none yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the empty document cannot be written.
    pub async fn ensure_exists(&self) -> Result<bool, ProgressServiceError> {
        Ok(self.repo.ensure_progress().await?)
    }

    /// Load the log, falling back to an empty log on missing or malformed storage.
    pub async fn load(&self) -> ProgressLog {
        match self.repo.load_progress().await {
            Ok(log) => {
                debug!(
                    days = log.dates().count(),
                    records = log.total_completed(),
                    "loaded progress log"
                );
                log
            }
            Err(StorageError::NotFound) => {
                info!("no progress log found, starting empty");
                ProgressLog::new()
            }
            Err(err) => {
                warn!(error = %err, "error loading progress log, starting empty");
                ProgressLog::new()
            }
        }
    }

    /// Overwrite the stored log with `log`. Failures are logged and returned, never retried.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Persist` if the write fails.
    pub async fn persist(&self, log: &ProgressLog) -> Result<(), ProgressServiceError> {
        self.repo.save_progress(log).await.map_err(|err| {
            warn!(error = %err, "error saving progress log");
            ProgressServiceError::Persist(err)
        })
    }
}
