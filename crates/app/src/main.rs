mod cli;
mod commands;
mod config;
mod display;
mod notifier;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use services::{AppServices, Clock};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::TrackerConfig;
use crate::notifier::ConsoleNotifier;

const DEFAULT_LOG_FILTER: &str = "study_tracker=info,services=info,storage=warn";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = cli.overrides();
    let config = TrackerConfig::resolve(
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        &overrides,
    )
    .context("failed to load configuration")?;
    let paths = config.paths();
    debug!(
        bank = %paths.bank.display(),
        progress = %paths.progress.display(),
        schedule = %paths.schedule.display(),
        "resolved data files"
    );

    let mut services = AppServices::json_files(paths, Clock::default_clock())
        .with_reminder_times(config.reminder_times.clone())
        .with_notifier(Arc::new(ConsoleNotifier));
    if let Some(seed) = config.seed {
        services = services.with_seed(seed);
    }

    let command = cli.command.unwrap_or(Command::Run);
    if let Some(report) = commands::execute(command, &services, &config).await? {
        print!("{report}");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
