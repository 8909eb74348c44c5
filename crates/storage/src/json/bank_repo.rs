use async_trait::async_trait;
use tracker_core::model::ProblemBank;

use crate::repository::{ProblemBankRepository, StorageError};

use super::JsonFileRepository;
use super::mapping::{read_json, write_json};

#[async_trait]
impl ProblemBankRepository for JsonFileRepository {
    async fn load_bank(&self) -> Result<ProblemBank, StorageError> {
        read_json(&self.paths.bank).await
    }

    async fn save_bank(&self, bank: &ProblemBank) -> Result<(), StorageError> {
        write_json(&self.paths.bank, bank).await
    }
}
