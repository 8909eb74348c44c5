use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use thiserror::Error;

use crate::model::{Problem, ProblemBank, WeeklySchedule, WeeklyTask};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("problem bank has no categories")]
    EmptyBank,
    #[error("category `{0}` has no problems")]
    EmptyCategory(String),
}

//
// ─── SCHEDULE GENERATOR ────────────────────────────────────────────────────────
//

/// Builds a randomized weekly schedule from a problem bank.
///
/// Every category contributes one task first. While the list is shorter than
/// [`WeeklySchedule::DAYS`], a category is drawn with replacement and another
/// problem from it is appended. The list is then shuffled.
///
/// The seven-task target is a floor, not a cap: a bank with more than seven
/// categories yields one task per category and nothing is dropped.
///
/// # Examples
///
/// ```
/// # use tracker_core::model::{Problem, ProblemBank};
/// # use tracker_core::scheduler::ScheduleGenerator;
/// let bank = ProblemBank::new()
///     .with_problem("arrays", Problem::new("Two Sum", "Easy"))
///     .with_problem("graphs", Problem::new("BFS", "Medium"));
///
/// let schedule = ScheduleGenerator::new().generate(&bank)?;
/// assert_eq!(schedule.len(), 7);
/// # Ok::<(), tracker_core::scheduler::GenerationError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleGenerator {
    target_len: usize,
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleGenerator {
    /// Generator targeting one task per day of the week.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target_len: WeeklySchedule::DAYS,
        }
    }

    /// Generate a schedule using the thread-local random source.
    ///
    /// # Errors
    ///
    /// See [`ScheduleGenerator::generate_with`].
    pub fn generate(&self, bank: &ProblemBank) -> Result<WeeklySchedule, GenerationError> {
        self.generate_with(bank, &mut rand::rng())
    }

    /// Generate a schedule drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// - `EmptyBank` if the bank has no categories
    /// - `EmptyCategory` if any category lists no problems
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        bank: &ProblemBank,
        rng: &mut R,
    ) -> Result<WeeklySchedule, GenerationError> {
        if bank.is_empty() {
            return Err(GenerationError::EmptyBank);
        }
        if let Some((name, _)) = bank.iter().find(|(_, problems)| problems.is_empty()) {
            return Err(GenerationError::EmptyCategory(name.to_owned()));
        }

        let categories: Vec<(&str, &[Problem])> = bank.iter().collect();
        let mut tasks = Vec::with_capacity(categories.len().max(self.target_len));

        for (name, problems) in &categories {
            tasks.push(pick_task(name, problems, rng));
        }

        while tasks.len() < self.target_len {
            let (name, problems) = categories
                .choose(rng)
                .ok_or(GenerationError::EmptyBank)?;
            tasks.push(pick_task(name, problems, rng));
        }

        tasks.shuffle(rng);
        Ok(WeeklySchedule::new(tasks))
    }
}

fn pick_task<R: Rng + ?Sized>(category: &str, problems: &[Problem], rng: &mut R) -> WeeklyTask {
    // Callers reject empty categories before drawing.
    let index = rng.random_range(0..problems.len());
    WeeklyTask::new(category, problems[index].clone())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
