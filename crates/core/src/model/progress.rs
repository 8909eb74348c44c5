use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single completion event logged under a date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressRecord {
    category: String,
    #[serde(rename = "problem")]
    problem_name: String,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(category: impl Into<String>, problem_name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            problem_name: problem_name.into(),
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn problem_name(&self) -> &str {
        &self.problem_name
    }
}

/// Date-keyed, append-only record of completed problems.
///
/// Serialized as `{"YYYY-MM-DD": [{"category": .., "problem": ..}]}`. A date
/// key appears on the first completion of that day and is never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressLog {
    days: BTreeMap<NaiveDate, Vec<ProgressRecord>>,
}

impl ProgressLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of `self` with one more record appended under `date`.
    ///
    /// Identical calls are not deduplicated: marking the same problem twice on
    /// one day yields two records.
    #[must_use]
    pub fn mark_done(&self, date: NaiveDate, category: &str, problem_name: &str) -> Self {
        let mut next = self.clone();
        next.push(date, ProgressRecord::new(category, problem_name));
        next
    }

    /// In-place append used by owners that already hold the log mutably.
    pub fn push(&mut self, date: NaiveDate, record: ProgressRecord) {
        self.days.entry(date).or_default().push(record);
    }

    /// Records logged on `date`, in insertion order.
    #[must_use]
    pub fn records_on(&self, date: NaiveDate) -> &[ProgressRecord] {
        self.days.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Dates with at least one record, oldest first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[ProgressRecord])> {
        self.days
            .iter()
            .map(|(date, records)| (*date, records.as_slice()))
    }

    /// Number of completion records across all dates.
    #[must_use]
    pub fn total_completed(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_completion_creates_date_entry() {
        let log = ProgressLog::new().mark_done(day(2024, 1, 1), "arrays", "Two Sum");

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"2024-01-01": [{"category": "arrays", "problem": "Two Sum"}]})
        );
    }

    #[test]
    fn mark_done_leaves_original_untouched() {
        let empty = ProgressLog::new();
        let next = empty.mark_done(day(2024, 1, 1), "arrays", "Two Sum");
        assert!(empty.is_empty());
        assert_eq!(next.total_completed(), 1);
    }

    #[test]
    fn repeated_marks_are_not_deduplicated() {
        let date = day(2024, 1, 1);
        let log = ProgressLog::new()
            .mark_done(date, "arrays", "Two Sum")
            .mark_done(date, "arrays", "Two Sum");

        assert_eq!(log.records_on(date).len(), 2);
        assert_eq!(log.records_on(date)[0], log.records_on(date)[1]);
    }

    #[test]
    fn different_dates_are_independent_and_order_free() {
        let a = day(2024, 1, 1);
        let b = day(2024, 1, 2);

        let forward = ProgressLog::new()
            .mark_done(a, "arrays", "Two Sum")
            .mark_done(b, "graphs", "BFS");
        let backward = ProgressLog::new()
            .mark_done(b, "graphs", "BFS")
            .mark_done(a, "arrays", "Two Sum");

        assert_eq!(forward, backward);
        assert_eq!(forward.records_on(a), &[ProgressRecord::new("arrays", "Two Sum")]);
        assert_eq!(forward.records_on(b), &[ProgressRecord::new("graphs", "BFS")]);
        assert_eq!(forward.dates().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn same_date_keeps_insertion_order() {
        let date = day(2024, 3, 9);
        let log = ProgressLog::new()
            .mark_done(date, "graphs", "BFS")
            .mark_done(date, "arrays", "Two Sum");

        let names: Vec<_> = log
            .records_on(date)
            .iter()
            .map(ProgressRecord::problem_name)
            .collect();
        assert_eq!(names, vec!["BFS", "Two Sum"]);
    }

    #[test]
    fn json_round_trip_preserves_log() {
        let log = ProgressLog::new()
            .mark_done(day(2024, 1, 1), "arrays", "Two Sum")
            .mark_done(day(2024, 1, 1), "arrays", "Two Sum")
            .mark_done(day(2023, 12, 31), "graphs", "BFS");

        let text = serde_json::to_string(&log).unwrap();
        let back: ProgressLog = serde_json::from_str(&text).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn rejects_non_date_keys() {
        let result: Result<ProgressLog, _> =
            serde_json::from_str(r#"{"yesterday": [{"category": "a", "problem": "b"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn records_on_unknown_date_is_empty() {
        assert!(ProgressLog::new().records_on(day(2024, 1, 1)).is_empty());
    }
}
