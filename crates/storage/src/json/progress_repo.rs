use async_trait::async_trait;
use tracing::info;
use tracker_core::model::ProgressLog;

use crate::repository::{ProgressRepository, StorageError};

use super::JsonFileRepository;
use super::mapping::{exists, read_json, write_json};

#[async_trait]
impl ProgressRepository for JsonFileRepository {
    async fn load_progress(&self) -> Result<ProgressLog, StorageError> {
        read_json(&self.paths.progress).await
    }

    async fn save_progress(&self, log: &ProgressLog) -> Result<(), StorageError> {
        write_json(&self.paths.progress, log).await
    }

    async fn ensure_progress(&self) -> Result<bool, StorageError> {
        if exists(&self.paths.progress).await? {
            return Ok(false);
        }
        write_json(&self.paths.progress, &ProgressLog::new()).await?;
        info!(path = %self.paths.progress.display(), "created empty progress file");
        Ok(true)
    }
}
