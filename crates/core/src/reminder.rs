use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{WeeklySchedule, WeeklyTask};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReminderTimeError {
    #[error("reminder time must look like HH:MM, got `{0}`")]
    Format(String),
    #[error("reminder time out of range: `{0}`")]
    OutOfRange(String),
}

//
// ─── REMINDER TIME ─────────────────────────────────────────────────────────────
//

/// Wall-clock time of day at which reminders fire, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    /// # Errors
    ///
    /// Returns `OutOfRange` if `hour > 23` or `minute > 59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ReminderTimeError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ReminderTimeError::OutOfRange(format!("{hour:02}:{minute:02}")))
    }

    #[must_use]
    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// First occurrence of this time strictly after `after`.
    #[must_use]
    pub fn next_after(&self, after: NaiveDateTime) -> NaiveDateTime {
        let candidate = after.date().and_time(self.0);
        if candidate > after {
            candidate
        } else {
            candidate + Duration::days(1)
        }
    }
}

impl FromStr for ReminderTime {
    type Err = ReminderTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hour, minute) = trimmed
            .split_once(':')
            .ok_or_else(|| ReminderTimeError::Format(s.to_owned()))?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(ReminderTimeError::Format(s.to_owned()));
        }
        let hour: u32 = hour
            .parse()
            .map_err(|_| ReminderTimeError::Format(s.to_owned()))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| ReminderTimeError::Format(s.to_owned()))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = ReminderTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// Default reminder times: noon and 20:00.
#[must_use]
pub fn default_reminder_times() -> Vec<ReminderTime> {
    [(12, 0), (20, 0)]
        .into_iter()
        .filter_map(|(hour, minute)| ReminderTime::new(hour, minute).ok())
        .collect()
}

//
// ─── REMINDER EVENT ────────────────────────────────────────────────────────────
//

/// Emitted when a registered trigger comes due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDue {
    pub task: WeeklyTask,
    pub at: ReminderTime,
    pub scheduled_for: NaiveDateTime,
}

impl ReminderDue {
    pub const TITLE: &'static str = "Problem Reminder";

    /// Human-readable reminder body.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Solve {} problem - {} ({})",
            self.task.category(),
            self.task.problem().name(),
            self.task.problem().difficulty()
        )
    }
}

//
// ─── REMINDER CLOCK ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct Trigger {
    task: WeeklyTask,
    at: ReminderTime,
    next_fire: NaiveDateTime,
}

/// Daily triggers for every task in the current schedule.
///
/// Each task gets one trigger per configured time and fires every day,
/// regardless of where it sits in the week. Triggers live only in memory;
/// registering a schedule replaces whatever was registered before.
///
/// Times are naive local wall-clock values. The caller converts from its
/// clock before calling [`ReminderClock::register`] or [`ReminderClock::tick`].
#[derive(Debug, Clone)]
pub struct ReminderClock {
    times: Vec<ReminderTime>,
    triggers: Vec<Trigger>,
}

impl Default for ReminderClock {
    fn default() -> Self {
        Self::new(default_reminder_times())
    }
}

impl ReminderClock {
    /// Clock firing at each distinct time in `times`; repeats are dropped.
    #[must_use]
    pub fn new(mut times: Vec<ReminderTime>) -> Self {
        let mut seen = std::collections::HashSet::new();
        times.retain(|t| seen.insert(*t));
        Self {
            times,
            triggers: Vec::new(),
        }
    }

    #[must_use]
    pub fn times(&self) -> &[ReminderTime] {
        &self.times
    }

    /// Drop all triggers and register `times.len()` triggers per task.
    ///
    /// A time that has already passed today first fires tomorrow.
    pub fn register(&mut self, schedule: &WeeklySchedule, now: NaiveDateTime) {
        self.triggers.clear();
        for task in schedule {
            for at in &self.times {
                self.triggers.push(Trigger {
                    task: task.clone(),
                    at: *at,
                    next_fire: at.next_after(now),
                });
            }
        }
    }

    pub fn clear(&mut self) {
        self.triggers.clear();
    }

    /// Number of registered triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Earliest pending fire time.
    #[must_use]
    pub fn next_fire(&self) -> Option<NaiveDateTime> {
        self.triggers.iter().map(|t| t.next_fire).min()
    }

    /// Collect every trigger due at `now` and advance it to its next occurrence.
    ///
    /// Output is ordered by fire time, then registration order. A trigger that
    /// missed several days fires once.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<ReminderDue> {
        let mut due: Vec<usize> = self
            .triggers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.next_fire <= now)
            .map(|(i, _)| i)
            .collect();
        due.sort_by_key(|&i| (self.triggers[i].next_fire, i));

        due.into_iter()
            .map(|i| {
                let trigger = &mut self.triggers[i];
                let event = ReminderDue {
                    task: trigger.task.clone(),
                    at: trigger.at,
                    scheduled_for: trigger.next_fire,
                };
                trigger.next_fire = trigger.at.next_after(now);
                event
            })
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::Problem;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn schedule(names: &[&str]) -> WeeklySchedule {
        WeeklySchedule::new(
            names
                .iter()
                .map(|n| WeeklyTask::new("arrays", Problem::new(*n, "Easy")))
                .collect(),
        )
    }

    #[test]
    fn parses_and_displays_times() {
        let t: ReminderTime = "12:00".parse().unwrap();
        assert_eq!(t.to_string(), "12:00");
        let t: ReminderTime = "8:05".parse().unwrap();
        assert_eq!(t.to_string(), "08:05");
    }

    #[test]
    fn rejects_bad_times() {
        assert!(matches!("noon".parse::<ReminderTime>(), Err(ReminderTimeError::Format(_))));
        assert!(matches!("12:5".parse::<ReminderTime>(), Err(ReminderTimeError::Format(_))));
        assert!(matches!(
            "24:00".parse::<ReminderTime>(),
            Err(ReminderTimeError::OutOfRange(_))
        ));
        assert!(matches!(
            "12:60".parse::<ReminderTime>(),
            Err(ReminderTimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn defaults_are_noon_and_evening() {
        let names: Vec<_> = default_reminder_times()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["12:00", "20:00"]);
    }

    #[test]
    fn next_after_rolls_to_tomorrow_once_passed() {
        let noon: ReminderTime = "12:00".parse().unwrap();
        assert_eq!(noon.next_after(at(1, 9, 0)), at(1, 12, 0));
        assert_eq!(noon.next_after(at(1, 12, 0)), at(2, 12, 0));
        assert_eq!(noon.next_after(at(1, 13, 0)), at(2, 12, 0));
    }

    #[test]
    fn registers_two_triggers_per_task() {
        let mut clock = ReminderClock::default();
        clock.register(&schedule(&["a", "b", "c", "d", "e", "f", "g"]), at(1, 8, 0));
        assert_eq!(clock.len(), 14);
        assert_eq!(clock.next_fire(), Some(at(1, 12, 0)));
    }

    #[test]
    fn every_task_fires_at_each_time_every_day() {
        let mut clock = ReminderClock::default();
        clock.register(&schedule(&["a", "b", "c", "d", "e", "f", "g"]), at(1, 8, 0));

        assert!(clock.tick(at(1, 11, 59)).is_empty());

        let noon = clock.tick(at(1, 12, 0));
        assert_eq!(noon.len(), 7);
        assert!(noon.iter().all(|r| r.at.to_string() == "12:00"));
        assert!(clock.tick(at(1, 12, 0)).is_empty());

        let evening = clock.tick(at(1, 20, 0));
        assert_eq!(evening.len(), 7);

        let next_day = clock.tick(at(2, 12, 0));
        assert_eq!(next_day.len(), 7);
    }

    #[test]
    fn due_events_keep_registration_order() {
        let mut clock = ReminderClock::default();
        clock.register(&schedule(&["first", "second", "third"]), at(1, 8, 0));

        let names: Vec<_> = clock
            .tick(at(1, 12, 0))
            .into_iter()
            .map(|r| r.task.problem().name().to_owned())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn missed_days_fire_once() {
        let mut clock = ReminderClock::new(vec!["12:00".parse().unwrap()]);
        clock.register(&schedule(&["a"]), at(1, 8, 0));

        let fired = clock.tick(at(5, 13, 0));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].scheduled_for, at(1, 12, 0));
        assert_eq!(clock.next_fire(), Some(at(6, 12, 0)));
    }

    #[test]
    fn repeated_times_register_once() {
        let noon: ReminderTime = "12:00".parse().unwrap();
        let mut clock = ReminderClock::new(vec![noon, noon]);
        assert_eq!(clock.times(), &[noon]);

        clock.register(&schedule(&["a"]), at(1, 8, 0));
        assert_eq!(clock.tick(at(1, 12, 0)).len(), 1);
    }

    #[test]
    fn late_catch_up_orders_by_fire_time() {
        let mut clock = ReminderClock::default();
        clock.register(&schedule(&["a"]), at(1, 8, 0));

        let fired = clock.tick(at(1, 21, 0));
        let times: Vec<_> = fired.iter().map(|r| r.at.to_string()).collect();
        assert_eq!(times, vec!["12:00", "20:00"]);
    }

    #[test]
    fn register_replaces_previous_triggers() {
        let mut clock = ReminderClock::default();
        clock.register(&schedule(&["a", "b", "c"]), at(1, 8, 0));
        clock.register(&schedule(&["z"]), at(1, 8, 0));
        assert_eq!(clock.len(), 2);

        let fired = clock.tick(at(1, 12, 0));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].task.problem().name(), "z");
    }

    #[test]
    fn reminder_message_names_category_problem_and_difficulty() {
        let due = ReminderDue {
            task: WeeklyTask::new("graphs", Problem::new("BFS", "Medium")),
            at: "20:00".parse().unwrap(),
            scheduled_for: at(1, 20, 0),
        };
        assert_eq!(due.message(), "Solve graphs problem - BFS (Medium)");
    }

    #[test]
    fn reminder_time_serde_uses_strings() {
        let times: Vec<ReminderTime> = serde_json::from_str(r#"["07:30", "21:15"]"#).unwrap();
        assert_eq!(serde_json::to_string(&times).unwrap(), r#"["07:30","21:15"]"#);
        assert!(serde_json::from_str::<ReminderTime>(r#""7pm""#).is_err());
    }
}
