use std::fmt;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use storage::repository::{ProblemBankRepository, ProgressRepository};
use storage::{JsonFileRepository, JsonPaths, StorageError};
use tracker_core::model::{Problem, ProblemBank, ProgressLog};

#[derive(Debug, Clone)]
struct Args {
    data_dir: PathBuf,
    force: bool,
    history_days: u32,
    today: Option<NaiveDate>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDataDir { raw: String },
    InvalidHistoryDays { raw: String },
    InvalidToday { raw: String },
    HistoryOutOfRange { days: u32, today: NaiveDate },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDataDir { raw } => write!(f, "invalid --data-dir value: {raw}"),
            ArgsError::InvalidHistoryDays { raw } => {
                write!(f, "invalid --history-days value: {raw}")
            }
            ArgsError::InvalidToday { raw } => {
                write!(f, "invalid --today value (expected YYYY-MM-DD): {raw}")
            }
            ArgsError::HistoryOutOfRange { days, today } => {
                write!(f, "--history-days {days} reaches before the earliest date from {today}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("STUDY_TRACKER_DATA_DIR")
            .map_or_else(|_| PathBuf::from("."), PathBuf::from);
        let mut force = false;
        let mut history_days = 0;
        let mut today = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = require_value(&mut args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataDir { raw: value });
                    }
                    data_dir = PathBuf::from(value);
                }
                "--force" => force = true,
                "--history-days" => {
                    let value = require_value(&mut args, "--history-days")?;
                    history_days = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidHistoryDays { raw: value.clone() })?;
                }
                "--today" => {
                    let value = require_value(&mut args, "--today")?;
                    let parsed = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .map_err(|_| ArgsError::InvalidToday { raw: value.clone() })?;
                    today = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_dir,
            force,
            history_days,
            today,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data-dir <dir>          Directory holding the JSON files (default: .)");
    eprintln!("  --force                   Overwrite an existing problem bank");
    eprintln!("  --history-days <n>        Append sample progress for the last n days (default: 0)");
    eprintln!("  --today <YYYY-MM-DD>      Fixed current date for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_TRACKER_DATA_DIR");
}

fn sample_bank() -> ProblemBank {
    let samples = [
        ("arrays", "Two Sum", "Easy"),
        ("arrays", "Product of Array Except Self", "Medium"),
        ("strings", "Longest Substring Without Repeating Characters", "Medium"),
        ("linked lists", "Reverse Linked List", "Easy"),
        ("trees", "Binary Tree Level Order Traversal", "Medium"),
        ("graphs", "Number of Islands", "Medium"),
        ("graphs", "Course Schedule", "Medium"),
        ("dynamic programming", "Climbing Stairs", "Easy"),
        ("dynamic programming", "Edit Distance", "Hard"),
    ];
    samples
        .iter()
        .fold(ProblemBank::new(), |bank, (category, name, difficulty)| {
            bank.with_problem(*category, Problem::new(*name, *difficulty))
        })
}

/// The date `days` before `today`, if representable.
fn history_start(today: NaiveDate, days: u32) -> Option<NaiveDate> {
    today.checked_sub_signed(Duration::days(i64::from(days)))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    if history_start(today, args.history_days).is_none() {
        return Err(ArgsError::HistoryOutOfRange {
            days: args.history_days,
            today,
        }
        .into());
    }

    let repo = JsonFileRepository::new(JsonPaths::in_dir(&args.data_dir));
    let bank = sample_bank();

    let bank_exists = match repo.load_bank().await {
        Ok(_) => true,
        Err(StorageError::NotFound) => false,
        Err(e) if e.is_recoverable_read() => true,
        Err(e) => return Err(e.into()),
    };
    if bank_exists && !args.force {
        eprintln!(
            "problem bank already exists at {} (use --force to overwrite)",
            repo.paths().bank.display()
        );
    } else {
        repo.save_bank(&bank).await?;
    }

    let mut log = match repo.load_progress().await {
        Ok(log) => log,
        Err(e) if e.is_recoverable_read() => ProgressLog::new(),
        Err(e) => return Err(e.into()),
    };
    let entries: Vec<_> = bank
        .iter()
        .flat_map(|(category, problems)| problems.iter().map(move |p| (category, p.name())))
        .collect();
    for day in 1..=args.history_days {
        let Some(date) = history_start(today, day) else {
            break;
        };
        let (category, name) = entries[((day - 1) as usize) % entries.len()];
        log = log.mark_done(date, category, name);
    }
    repo.save_progress(&log).await?;

    println!(
        "Seeded {} categories ({} problems) and {} progress days into {}",
        bank.len(),
        bank.problem_count(),
        args.history_days,
        args.data_dir.display()
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
