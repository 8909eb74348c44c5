use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::StorageError;
use storage::repository::ScheduleRepository;
use tracing::{info, warn};
use tracker_core::model::{ProblemBank, WeeklySchedule};
use tracker_core::scheduler::ScheduleGenerator;

use crate::error::ScheduleServiceError;

/// Generates weekly schedules and writes the latest one to storage.
#[derive(Clone)]
pub struct ScheduleService {
    repo: Arc<dyn ScheduleRepository>,
    generator: ScheduleGenerator,
    rng: Option<Arc<Mutex<StdRng>>>,
}

impl ScheduleService {
    #[must_use]
    pub fn new(repo: Arc<dyn ScheduleRepository>) -> Self {
        Self {
            repo,
            generator: ScheduleGenerator::new(),
            rng: None,
        }
    }

    /// Draw from a seeded generator instead of the thread RNG.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))));
        self
    }

    /// Build a new schedule from `bank`.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleServiceError::Generation` if the bank is empty or has an
    /// empty category.
    pub fn generate(&self, bank: &ProblemBank) -> Result<WeeklySchedule, ScheduleServiceError> {
        let schedule = match &self.rng {
            Some(rng) => {
                let mut guard = rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
                self.generator.generate_with(bank, &mut *guard)?
            }
            None => self.generator.generate(bank)?,
        };
        info!(
            tasks = schedule.len(),
            categories = bank.len(),
            "generated weekly schedule"
        );
        Ok(schedule)
    }

    /// Overwrite the stored schedule.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleServiceError::Persist` if the write fails.
    pub async fn persist(&self, schedule: &WeeklySchedule) -> Result<(), ScheduleServiceError> {
        self.repo.save_schedule(schedule).await.map_err(|err| {
            warn!(error = %err, "error saving schedule");
            ScheduleServiceError::Persist(err)
        })
    }

    /// The schedule written by the most recent run, if any.
    pub async fn last_saved(&self) -> Option<WeeklySchedule> {
        match self.repo.load_schedule().await {
            Ok(schedule) => Some(schedule),
            Err(StorageError::NotFound) => None,
            Err(err) => {
                warn!(error = %err, "error loading saved schedule");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use tracker_core::model::Problem;
    use tracker_core::scheduler::GenerationError;

    fn bank() -> ProblemBank {
        ProblemBank::new()
            .with_problem("arrays", Problem::new("Two Sum", "Easy"))
            .with_problem("graphs", Problem::new("BFS", "Medium"))
    }

    #[tokio::test]
    async fn generated_schedule_is_persisted() {
        let service = ScheduleService::new(Arc::new(InMemoryRepository::new()));
        assert!(service.last_saved().await.is_none());

        let schedule = service.generate(&bank()).unwrap();
        service.persist(&schedule).await.unwrap();
        assert_eq!(service.last_saved().await, Some(schedule));
    }

    #[test]
    fn seeded_services_agree() {
        let repo = Arc::new(InMemoryRepository::new());
        let a = ScheduleService::new(repo.clone()).with_seed(9);
        let b = ScheduleService::new(repo).with_seed(9);
        assert_eq!(a.generate(&bank()).unwrap(), b.generate(&bank()).unwrap());
    }

    #[test]
    fn empty_bank_fails_generation() {
        let service = ScheduleService::new(Arc::new(InMemoryRepository::new()));
        let err = service.generate(&ProblemBank::new()).unwrap_err();
        assert!(matches!(
            err,
            ScheduleServiceError::Generation(GenerationError::EmptyBank)
        ));
    }

    #[tokio::test]
    async fn persist_failure_is_reported() {
        let repo = InMemoryRepository::new();
        repo.set_fail_writes(true);
        let service = ScheduleService::new(Arc::new(repo));
        let schedule = service.generate(&bank()).unwrap();

        let err = service.persist(&schedule).await.unwrap_err();
        assert!(matches!(err, ScheduleServiceError::Persist(_)));
    }
}
