mod problem;
mod progress;
mod task;

pub use problem::{BankError, Problem, ProblemBank};
pub use progress::{ProgressLog, ProgressRecord};
pub use task::{WeeklySchedule, WeeklyTask};
