use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use services::{AppServices, ReminderLoop};
use tracing::{info, warn};

use crate::cli::{BankCommand, Command, ReplaceSource};
use crate::config::TrackerConfig;
use crate::display::{render_bank, render_progress, render_schedule};

/// Run one command against the configured files.
///
/// Everything except `run` returns its report as text for the caller to print.
///
/// # Errors
///
/// Returns an error if a write the command depends on fails or the input is rejected.
pub async fn execute(
    command: Command,
    services: &AppServices,
    config: &TrackerConfig,
) -> Result<Option<String>> {
    match command {
        Command::Run => {
            run(services, config).await;
            Ok(None)
        }
        Command::Schedule => schedule(services).await.map(Some),
        Command::Done {
            category,
            problem,
            date,
        } => done(services, &category, &problem, date).await.map(Some),
        Command::Bank { action } => match action {
            BankCommand::Show => bank_show(services).await.map(Some),
            BankCommand::Replace(source) => bank_replace(services, source).await.map(Some),
        },
        Command::Progress { date } => progress(services, date).await.map(Some),
    }
}

async fn run(services: &AppServices, config: &TrackerConfig) {
    let controller = services.controller();
    let summary = controller.bootstrap().await;
    println!("{}", render_schedule(&controller.schedule().await));
    if let Some(next) = controller.next_reminder().await {
        println!("Next reminder at {}", next.format("%Y-%m-%d %H:%M"));
    }
    println!("Press Ctrl+C to stop.");
    info!(
        tasks = summary.scheduled_tasks,
        progress = summary.progress_records,
        "waiting for reminders"
    );

    ReminderLoop::new(controller)
        .with_interval(config.poll_interval())
        .run_until(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await;
}

/// Resolve when `signal` fires. If the listener cannot be installed, never resolve.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        warn!(error = %err, "could not listen for Ctrl+C, running until the process is killed");
        std::future::pending::<()>().await;
    }
}

async fn schedule(services: &AppServices) -> Result<String> {
    let controller = services.controller();
    controller.open().await;
    let schedule = controller
        .regenerate()
        .await
        .context("failed to generate a schedule")?;
    Ok(render_schedule(&schedule))
}

async fn done(
    services: &AppServices,
    category: &str,
    problem: &str,
    date: Option<NaiveDate>,
) -> Result<String> {
    let controller = services.controller();
    controller.open().await;
    let date = match date {
        Some(date) => {
            controller.mark_done(date, category, problem).await?;
            date
        }
        None => controller.mark_done_today(category, problem).await?,
    };
    Ok(format!("Marked [{category}] {problem} done on {date}\n"))
}

async fn bank_show(services: &AppServices) -> Result<String> {
    let bank = services.bank_service().load().await;
    Ok(render_bank(&bank))
}

async fn bank_replace(services: &AppServices, source: ReplaceSource) -> Result<String> {
    let text = match (source.json, source.file) {
        (Some(json), _) => json,
        (None, Some(path)) => read_bank_file(&path).await?,
        (None, None) => anyhow::bail!("either --json or --file is required"),
    };
    let controller = services.controller();
    controller.open().await;
    controller
        .replace_bank(&text)
        .await
        .context("problem bank was not replaced")?;
    let bank = controller.bank().await;
    Ok(format!(
        "Problem bank replaced: {} categories, {} problems\n",
        bank.len(),
        bank.problem_count()
    ))
}

async fn read_bank_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

async fn progress(services: &AppServices, date: Option<NaiveDate>) -> Result<String> {
    let log = services.progress_service().load().await;
    Ok(render_progress(&log, date))
}
