use serde::{Deserialize, Serialize};

use crate::model::problem::Problem;

/// A category paired with the problem picked from it for this week.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeeklyTask {
    category: String,
    problem: Problem,
}

impl WeeklyTask {
    #[must_use]
    pub fn new(category: impl Into<String>, problem: Problem) -> Self {
        Self {
            category: category.into(),
            problem,
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }
}

/// Ordered list of weekly tasks.
///
/// Position carries no calendar meaning. Serialized as a flat JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    tasks: Vec<WeeklyTask>,
}

impl WeeklySchedule {
    /// Target number of tasks per week.
    pub const DAYS: usize = 7;

    #[must_use]
    pub fn new(tasks: Vec<WeeklyTask>) -> Self {
        Self { tasks }
    }

    #[must_use]
    pub fn tasks(&self) -> &[WeeklyTask] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeeklyTask> {
        self.tasks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<'a> IntoIterator for &'a WeeklySchedule {
    type Item = &'a WeeklyTask;
    type IntoIter = std::slice::Iter<'a, WeeklyTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_serializes_as_flat_task_list() {
        let schedule = WeeklySchedule::new(vec![WeeklyTask::new(
            "graphs",
            Problem::new("BFS", "Medium"),
        )]);

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"category": "graphs", "problem": {"name": "BFS", "difficulty": "Medium"}}
            ])
        );
    }
}
