use std::fmt::Write;

use chrono::NaiveDate;
use tracker_core::model::{ProblemBank, ProgressLog, ProgressRecord, WeeklySchedule};

const RULE_WIDTH: usize = 60;

pub fn render_schedule(schedule: &WeeklySchedule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "  Weekly schedule ({} tasks)", schedule.len());
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    if schedule.is_empty() {
        let _ = writeln!(out, "  (no schedule: the problem bank is empty)");
    }
    for (i, task) in schedule.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. [{}] {} ({})",
            i + 1,
            task.category(),
            task.problem().name(),
            task.problem().difficulty()
        );
    }
    out
}

pub fn render_bank(bank: &ProblemBank) -> String {
    let mut out = String::new();
    if bank.is_empty() {
        let _ = writeln!(out, "Problem bank is empty.");
        return out;
    }
    for (category, problems) in bank.iter() {
        let _ = writeln!(out, "{category} ({})", problems.len());
        for problem in problems {
            let _ = writeln!(out, "  - {} ({})", problem.name(), problem.difficulty());
        }
    }
    out
}

pub fn render_progress(log: &ProgressLog, only: Option<NaiveDate>) -> String {
    let mut out = String::new();
    let days: Vec<(NaiveDate, &[ProgressRecord])> = log
        .iter()
        .filter(|(date, _)| only.is_none_or(|d| d == *date))
        .collect();

    if days.is_empty() {
        let _ = writeln!(out, "No completed problems recorded.");
        return out;
    }
    for (date, records) in &days {
        let _ = writeln!(out, "{date}");
        for record in *records {
            let _ = writeln!(out, "  - [{}] {}", record.category(), record.problem_name());
        }
    }
    let total: usize = days.iter().map(|(_, r)| r.len()).sum();
    let _ = writeln!(out, "Total: {total}");
    out
}
