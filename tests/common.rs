#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use crewlog::core::aggregate::Aggregator;
use crewlog::db::Store;
use crewlog::models::{DrawingType, GeoPoint, NewDrawing, NewReport, NewWorker, Worker};
use crewlog::utils::date::local_millis;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with HOME pointed at a scratch directory so that the
/// user's own configuration is never read or written.
pub fn crewlog() -> Command {
    let home = env::temp_dir().join("crewlog_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("crewlog");
    cmd.env("HOME", &home).env("APPDATA", &home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_crewlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB through the CLI with one group, one worker and one report
/// dated 2025-09-15 10:00 local time.
pub fn init_db_with_data(db_path: &str) {
    crewlog()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    crewlog()
        .args(["--db", db_path, "group", "add", "Roads"])
        .assert()
        .success();

    crewlog()
        .args([
            "--db", db_path, "worker", "add", "--name", "Ana", "--phone", "555-0101", "--group",
            "1",
        ])
        .assert()
        .success();

    crewlog()
        .args([
            "--db",
            db_path,
            "report",
            "add",
            "--task",
            "Pothole repair",
            "--kind",
            "point",
            "--points",
            "45.07,7.68",
            "--hours",
            "3",
            "--workers",
            "1",
            "--date",
            "2025-09-15 10:00",
            "--address",
            "Via Roma 1",
        ])
        .assert()
        .success();
}

// ---------------------------
// Library helpers
// ---------------------------

pub fn memory_store() -> Store {
    Store::open_in_memory().expect("open in-memory store")
}

/// Epoch millis of `y-m-d h:00` local time.
pub fn local_ms(y: i32, m: u32, d: u32, h: u32) -> i64 {
    let date = NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
    let time = NaiveTime::from_hms_opt(h, 0, 0).expect("valid time");
    local_millis(date.and_time(time)).expect("resolvable local time")
}

pub fn add_group(store: &mut Store, name: &str) -> i64 {
    store.insert_group(name).expect("insert group")
}

pub fn add_worker(store: &mut Store, name: &str, group: Option<i64>) -> Worker {
    let mut new = NewWorker::new(name, "555-0000");
    if let Some(g) = group {
        new = new.in_group(g);
    }
    let id = store.insert_worker(&new).expect("insert worker");
    store.worker(id).expect("load worker").expect("worker exists")
}

pub fn drawing(task: &str, timestamp: i64, hours: i64) -> NewDrawing {
    NewDrawing {
        kind: DrawingType::Polygon,
        points: vec![
            GeoPoint::new(45.0, 7.0),
            GeoPoint::new(45.1, 7.0),
            GeoPoint::new(45.1, 7.1),
        ],
        task_type: task.to_string(),
        description: format!("{task} description"),
        address: None,
        timestamp,
        hours,
    }
}

/// Insert one report holding one drawing worked by `workers`.
pub fn add_report(store: &mut Store, date: i64, task: &str, hours: i64, workers: &[Worker]) -> i64 {
    let report = NewReport {
        date,
        description: format!("Report for task: {task}"),
    };
    Aggregator::insert_report_with_drawings(store, &report, &drawing(task, date, hours), workers)
        .expect("insert report")
}

pub fn count_rows(store: &Store, table: &str) -> i64 {
    store
        .conn()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count rows")
}
