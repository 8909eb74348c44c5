#![forbid(unsafe_code)]

pub mod model;
pub mod reminder;
pub mod scheduler;
pub mod time;

pub use reminder::{ReminderClock, ReminderDue, ReminderTime};
pub use scheduler::{GenerationError, ScheduleGenerator};
pub use time::Clock;
