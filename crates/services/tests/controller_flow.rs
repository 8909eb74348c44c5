use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use services::{AppServices, Clock, RecordingNotifier, ReminderLoop};
use storage::JsonPaths;
use tracker_core::model::{ProgressLog, WeeklySchedule};
use tracker_core::time::fixed_now;

const BANK: &str = r#"{
    "arrays": [{"name":"Two Sum","difficulty":"Easy"}],
    "graphs": [{"name":"BFS","difficulty":"Medium"}]
}"#;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn services_in(dir: &tempfile::TempDir) -> (AppServices, JsonPaths, Arc<RecordingNotifier>) {
    let paths = JsonPaths::in_dir(dir.path());
    let notifier = Arc::new(RecordingNotifier::new());
    let services = AppServices::json_files(paths.clone(), Clock::fixed(fixed_now()))
        .with_notifier(notifier.clone())
        .with_seed(3);
    (services, paths, notifier)
}

#[tokio::test]
async fn startup_writes_schedule_and_empty_progress() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (services, paths, _) = services_in(&dir);
    std::fs::write(&paths.bank, BANK).unwrap();

    let controller = services.controller();
    let summary = controller.bootstrap().await;
    assert_eq!(summary.scheduled_tasks, 7);

    let progress = std::fs::read_to_string(&paths.progress).unwrap();
    assert_eq!(progress.trim(), "{}");

    let saved: WeeklySchedule =
        serde_json::from_str(&std::fs::read_to_string(&paths.schedule).unwrap()).unwrap();
    assert_eq!(saved.len(), 7);
    let names: HashSet<_> = saved.iter().map(|t| t.problem().name().to_owned()).collect();
    assert_eq!(names, HashSet::from(["Two Sum".to_owned(), "BFS".to_owned()]));
}

#[tokio::test]
async fn restart_regenerates_and_overwrites_schedule_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (services, paths, _) = services_in(&dir);
    std::fs::write(&paths.bank, BANK).unwrap();

    services.controller().bootstrap().await;
    services
        .bank_service()
        .replace(r#"{"trees": [{"name":"Inorder","difficulty":"Easy"}]}"#)
        .await
        .unwrap();
    services.controller().bootstrap().await;

    let saved: WeeklySchedule =
        serde_json::from_str(&std::fs::read_to_string(&paths.schedule).unwrap()).unwrap();
    assert!(saved.iter().all(|t| t.category() == "trees"));
}

#[tokio::test]
async fn completions_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (services, paths, _) = services_in(&dir);
    std::fs::write(&paths.bank, BANK).unwrap();

    let first = services.controller();
    first.bootstrap().await;
    first.mark_done(day(1), "arrays", "Two Sum").await.unwrap();
    first.mark_done(day(2), "graphs", "BFS").await.unwrap();
    let expected = first.progress().await;

    let second = services.controller();
    second.open().await;
    assert_eq!(second.progress().await, expected);

    second.mark_done(day(2), "graphs", "BFS").await.unwrap();
    let reloaded = services.progress_service().load().await;
    assert_eq!(reloaded.records_on(day(1)).len(), 1);
    assert_eq!(reloaded.records_on(day(2)).len(), 2);
}

#[tokio::test]
async fn malformed_files_start_empty_without_failing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (services, paths, _) = services_in(&dir);
    std::fs::write(&paths.bank, "{{ definitely not json").unwrap();
    std::fs::write(&paths.progress, "[]").unwrap();

    let controller = services.controller();
    let summary = controller.bootstrap().await;

    assert_eq!(summary.categories, 0);
    assert_eq!(summary.scheduled_tasks, 0);
    assert_eq!(controller.progress().await, ProgressLog::new());
    assert!(!paths.schedule.exists());
}

#[tokio::test]
async fn rejected_replacement_leaves_bank_file_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (services, paths, _) = services_in(&dir);
    std::fs::write(&paths.bank, BANK).unwrap();

    let controller = services.controller();
    controller.open().await;
    assert!(controller.replace_bank(r#"{"arrays": 5}"#).await.is_err());

    assert_eq!(std::fs::read_to_string(&paths.bank).unwrap(), BANK);
    assert_eq!(controller.categories().await, vec!["arrays", "graphs"]);
}

#[tokio::test]
async fn reminder_loop_announces_every_task() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (services, paths, notifier) = services_in(&dir);
    std::fs::write(&paths.bank, BANK).unwrap();

    let controller = services.controller();
    controller.bootstrap().await;

    let mut next_day = Clock::fixed(fixed_now());
    next_day.advance(Duration::days(1));
    let delivered = ReminderLoop::new(Arc::clone(&controller))
        .with_clock(next_day)
        .tick()
        .await;

    assert_eq!(delivered, 14);
    let schedule = controller.schedule().await;
    for task in &schedule {
        let count = notifier
            .reminders()
            .iter()
            .filter(|r| &r.task == task)
            .count();
        assert!(count >= 2);
    }
}
