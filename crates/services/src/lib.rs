#![forbid(unsafe_code)]

pub mod app_services;
pub mod bank_service;
pub mod controller;
pub mod error;
pub mod notifier;
pub mod progress_service;
pub mod reminder_loop;
pub mod schedule_service;

pub use tracker_core::Clock;

pub use app_services::AppServices;
pub use bank_service::BankService;
pub use controller::{BootstrapSummary, StudyController};
pub use error::{BankServiceError, ControllerError, ProgressServiceError, ScheduleServiceError};
pub use notifier::{LogNotifier, Notifier, RecordingNotifier};
pub use progress_service::ProgressService;
pub use reminder_loop::{DEFAULT_POLL_INTERVAL, ReminderLoop};
pub use schedule_service::ScheduleService;
