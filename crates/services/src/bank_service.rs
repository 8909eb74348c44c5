use std::sync::Arc;

use storage::StorageError;
use storage::repository::ProblemBankRepository;
use tracing::{debug, info, warn};
use tracker_core::model::ProblemBank;

use crate::error::BankServiceError;

/// Loads and replaces the persisted problem bank.
#[derive(Clone)]
pub struct BankService {
    repo: Arc<dyn ProblemBankRepository>,
}

impl BankService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProblemBankRepository>) -> Self {
        Self { repo }
    }

    /// Load the bank, falling back to an empty bank when it is missing or unreadable.
    ///
    /// An empty result is not an error here; callers decide whether they can
    /// work with it.
    pub async fn load(&self) -> ProblemBank {
        match self.repo.load_bank().await {
            Ok(bank) => {
                debug!(
                    categories = bank.len(),
                    problems = bank.problem_count(),
                    "loaded problem bank"
                );
                bank
            }
            Err(StorageError::NotFound) => {
                info!("no problem bank found, starting empty");
                ProblemBank::new()
            }
            Err(err) => {
                warn!(error = %err, "error loading problem bank, starting empty");
                ProblemBank::new()
            }
        }
    }

    /// Parse `text` as a new bank and persist it.
    ///
    /// Nothing is written when parsing fails.
    ///
    /// # Errors
    ///
    /// - `Validation` if `text` is not a category-to-problem-list mapping
    /// - `Storage` if the new bank cannot be written
    pub async fn replace(&self, text: &str) -> Result<ProblemBank, BankServiceError> {
        let bank = ProblemBank::from_json(text)?;
        self.repo.save_bank(&bank).await?;
        info!(categories = bank.len(), "problem bank replaced");
        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storage::repository::InMemoryRepository;
    use tracker_core::model::Problem;

    struct CorruptBank;

    #[async_trait]
    impl ProblemBankRepository for CorruptBank {
        async fn load_bank(&self) -> Result<ProblemBank, StorageError> {
            Err(StorageError::Malformed("expected value at line 1".into()))
        }

        async fn save_bank(&self, _bank: &ProblemBank) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn missing_bank_loads_empty() {
        let service = BankService::new(Arc::new(InMemoryRepository::new()));
        assert!(service.load().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_bank_loads_empty() {
        let service = BankService::new(Arc::new(CorruptBank));
        assert!(service.load().await.is_empty());
    }

    #[tokio::test]
    async fn replace_rejects_invalid_text_and_keeps_stored_bank() {
        let original = ProblemBank::new().with_problem("arrays", Problem::new("Two Sum", "Easy"));
        let repo = InMemoryRepository::with_bank(original.clone());
        let service = BankService::new(Arc::new(repo.clone()));

        let err = service.replace("[1, 2, 3]").await.unwrap_err();
        assert!(matches!(err, BankServiceError::Validation(_)));
        assert_eq!(service.load().await, original);
    }

    #[tokio::test]
    async fn replace_persists_parsed_bank() {
        let service = BankService::new(Arc::new(InMemoryRepository::new()));
        let bank = service
            .replace(r#"{"graphs": [{"name": "BFS", "difficulty": "Medium"}]}"#)
            .await
            .unwrap();

        assert!(bank.contains("graphs", "BFS"));
        assert_eq!(service.load().await, bank);
    }

    #[tokio::test]
    async fn replace_surfaces_write_failures() {
        let repo = InMemoryRepository::new();
        repo.set_fail_writes(true);
        let service = BankService::new(Arc::new(repo));

        let err = service.replace(r#"{"graphs": []}"#).await.unwrap_err();
        assert!(matches!(err, BankServiceError::Storage(StorageError::Io(_))));
    }
}
