use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

/// Weekly practice-problem schedule with twice-daily reminders.
#[derive(Parser)]
#[command(name = "study-tracker", version)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the problem, progress and schedule files.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Problem bank file (relative to the data directory).
    #[arg(long, global = true)]
    pub bank: Option<PathBuf>,

    /// Progress file (relative to the data directory).
    #[arg(long, global = true)]
    pub progress: Option<PathBuf>,

    /// Weekly schedule file (relative to the data directory).
    #[arg(long, global = true)]
    pub schedule: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate this week's schedule and deliver reminders until interrupted.
    Run,
    /// Generate and save a new schedule, print it, and exit.
    Schedule,
    /// Mark a problem as done.
    Done {
        category: String,
        problem: String,
        /// Date to record under (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Inspect or replace the problem bank.
    Bank {
        #[command(subcommand)]
        action: BankCommand,
    },
    /// Show completed problems.
    Progress {
        /// Only show this date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum BankCommand {
    /// List categories and their problems.
    Show,
    /// Replace the bank with a new JSON document.
    Replace(ReplaceSource),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ReplaceSource {
    /// New bank as inline JSON text.
    #[arg(long)]
    pub json: Option<String>,
    /// Read the new bank from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            bank_file: self.bank.clone(),
            progress_file: self.progress.clone(),
            schedule_file: self.schedule.clone(),
        }
    }
}
