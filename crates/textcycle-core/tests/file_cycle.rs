//! End-to-end rotation against the file-backed host.

use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use textcycle_core::{
    CycleSettings, Cycler, FileSourceHost, ManualScheduler, Scheduler, SourceHost,
    ThreadScheduler, TickOutcome, lock, schedule,
};

fn read_source(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(format!("{}.txt", name))).unwrap()
}

#[test]
fn test_manual_schedule_writes_each_item_in_turn() {
    let dir = TempDir::new().unwrap();
    let host = FileSourceHost::new(dir.path());
    host.create_source("ticker").unwrap();

    let cycler = Cycler::new(host, CycleSettings::new("ticker", &["a", "b", "c"], 5))
        .unwrap()
        .into_shared();
    let mut scheduler = ManualScheduler::new();
    schedule(&cycler, &mut scheduler);

    let mut seen = Vec::new();
    for _ in 0..4 {
        scheduler.fire();
        seen.push(read_source(&dir, "ticker"));
    }
    assert_eq!(seen, ["a", "b", "c", "a"]);
}

#[test]
fn test_missing_source_then_created() {
    let dir = TempDir::new().unwrap();
    let host = FileSourceHost::new(dir.path());
    let mut cycler =
        Cycler::new(host.clone(), CycleSettings::new("ticker", &["a", "b"], 5)).unwrap();

    assert_eq!(cycler.tick(), TickOutcome::SourceMissing);
    assert!(host.list_sources().unwrap().is_empty());

    host.create_source("ticker").unwrap();
    assert_eq!(cycler.tick(), TickOutcome::Applied("b".to_string()));
    assert_eq!(read_source(&dir, "ticker"), "b");
}

#[test]
fn test_settings_reload_restarts_rotation() {
    let dir = TempDir::new().unwrap();
    let host = FileSourceHost::new(dir.path());
    host.create_source("ticker").unwrap();

    let cycler = Cycler::new(host, CycleSettings::new("ticker", &["a", "b", "c"], 5))
        .unwrap()
        .into_shared();
    let mut scheduler = ManualScheduler::new();
    schedule(&cycler, &mut scheduler);
    scheduler.fire();
    scheduler.fire();

    let change = lock(&cycler).update(CycleSettings::new("ticker", &["x", "y"], 2))
        .unwrap();
    assert!(change.items_changed);
    assert!(change.interval_changed);
    schedule(&cycler, &mut scheduler);
    assert_eq!(scheduler.interval(), Some(Duration::from_secs(2)));

    scheduler.fire();
    assert_eq!(read_source(&dir, "ticker"), "x");
}

#[test]
fn test_thread_scheduler_drives_file_updates() {
    let dir = TempDir::new().unwrap();
    let host = Arc::new(FileSourceHost::new(dir.path()));
    host.create_source("ticker").unwrap();

    let cycler = Cycler::new(Arc::clone(&host), CycleSettings::new("ticker", &["a", "b"], 1))
        .unwrap()
        .into_shared();
    let mut scheduler = ThreadScheduler::new();

    // Drive the timer faster than the 1s setting so the test stays short
    let shared = Arc::clone(&cycler);
    scheduler.every(
        Duration::from_millis(10),
        Box::new(move || {
            lock(&shared).tick();
        }),
    );

    let deadline = Instant::now() + Duration::from_secs(2);
    while read_source(&dir, "ticker").is_empty() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    scheduler.cancel();

    let text = read_source(&dir, "ticker");
    assert!(text == "a" || text == "b", "unexpected text {:?}", text);
}

#[test]
fn test_zero_interval_update_keeps_timer_interval() {
    let dir = TempDir::new().unwrap();
    let host = FileSourceHost::new(dir.path());
    host.create_source("ticker").unwrap();

    let cycler = Cycler::new(host, CycleSettings::new("ticker", &["a", "b"], 5))
        .unwrap()
        .into_shared();
    let mut scheduler = ManualScheduler::new();
    schedule(&cycler, &mut scheduler);
    scheduler.fire();

    let result = lock(&cycler).update(CycleSettings::new("ticker", &["a", "b"], 0));
    assert!(result.is_err());

    // Rescheduling still uses the last valid interval
    schedule(&cycler, &mut scheduler);
    assert_eq!(scheduler.interval(), Some(Duration::from_secs(5)));
    scheduler.fire();
    assert_eq!(read_source(&dir, "ticker"), "b");
}
