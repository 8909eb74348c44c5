use async_trait::async_trait;
use tracker_core::model::WeeklySchedule;

use crate::repository::{ScheduleRepository, StorageError};

use super::JsonFileRepository;
use super::mapping::{read_json, write_json};

#[async_trait]
impl ScheduleRepository for JsonFileRepository {
    async fn load_schedule(&self) -> Result<WeeklySchedule, StorageError> {
        read_json(&self.paths.schedule).await
    }

    async fn save_schedule(&self, schedule: &WeeklySchedule) -> Result<(), StorageError> {
        write_json(&self.paths.schedule, schedule).await
    }
}
