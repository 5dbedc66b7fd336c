use crewlog::core::aggregate::Aggregator;
use crewlog::db::Table;
use crewlog::db::reports::{insert_drawing, insert_report};
use crewlog::errors::AppError;
use crewlog::models::{NewReport, Worker};
use crewlog::utils::date::day_bounds;
use chrono::NaiveDate;

mod common;
use common::{add_group, add_report, add_worker, count_rows, drawing, local_ms, memory_store};

fn march(start: u32, end: u32) -> (i64, i64) {
    day_bounds(
        NaiveDate::from_ymd_opt(2025, 3, start).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, end).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_range_is_inclusive_and_most_recent_first() {
    let mut store = memory_store();
    let w = add_worker(&mut store, "Ana", None);

    add_report(&mut store, local_ms(2025, 2, 28, 12), "before", 1, &[w.clone()]);
    add_report(&mut store, local_ms(2025, 3, 1, 0), "first day", 1, &[w.clone()]);
    add_report(&mut store, local_ms(2025, 3, 10, 12), "middle", 1, &[w.clone()]);
    add_report(&mut store, local_ms(2025, 3, 31, 23), "last day", 1, &[w.clone()]);
    add_report(&mut store, local_ms(2025, 4, 1, 0), "after", 1, &[w]);

    let (start, end) = march(1, 31);
    let reports = Aggregator::reports_with_details(&store, start, end, &[]).unwrap();

    let tasks: Vec<&str> = reports
        .iter()
        .map(|r| r.drawings[0].drawing.task_type.as_str())
        .collect();
    assert_eq!(tasks, vec!["last day", "middle", "first day"]);

    for r in &reports {
        assert!(r.report.date >= start && r.report.date <= end);
    }
}

#[test]
fn test_empty_range_yields_no_reports() {
    let mut store = memory_store();
    let w = add_worker(&mut store, "Ana", None);
    add_report(&mut store, local_ms(2025, 5, 2, 9), "repair", 2, &[w]);

    let (start, end) = march(1, 31);
    let reports = Aggregator::reports_with_details(&store, start, end, &[]).unwrap();
    assert!(reports.is_empty());
}

#[test]
fn test_group_filter_keeps_only_matching_reports() {
    let mut store = memory_store();
    let g1 = add_group(&mut store, "G1");
    let g2 = add_group(&mut store, "G2");
    let w1 = add_worker(&mut store, "Ana", Some(g1));
    let w2 = add_worker(&mut store, "Bruno", Some(g2));

    let r1 = add_report(&mut store, local_ms(2025, 3, 5, 10), "signage", 2, &[w1]);
    let r2 = add_report(&mut store, local_ms(2025, 3, 6, 10), "mowing", 4, &[w2]);

    let (start, end) = march(1, 31);

    let only_g1 = Aggregator::reports_with_details(&store, start, end, &[g1]).unwrap();
    assert_eq!(only_g1.len(), 1);
    assert_eq!(only_g1[0].report.id, r1);
    assert_eq!(only_g1[0].drawings[0].workers[0].name, "Ana");

    let only_g2 = Aggregator::reports_with_details(&store, start, end, &[g2]).unwrap();
    assert_eq!(only_g2.len(), 1);
    assert_eq!(only_g2[0].report.id, r2);

    let both = Aggregator::reports_with_details(&store, start, end, &[g1, g2]).unwrap();
    assert_eq!(both.len(), 2);
}

#[test]
fn test_empty_group_list_is_no_filter() {
    let mut store = memory_store();
    let g1 = add_group(&mut store, "G1");
    let w1 = add_worker(&mut store, "Ana", Some(g1));
    let loner = add_worker(&mut store, "Carla", None);

    add_report(&mut store, local_ms(2025, 3, 5, 10), "signage", 2, &[w1]);
    add_report(&mut store, local_ms(2025, 3, 6, 10), "cleanup", 1, &[loner]);
    add_report(&mut store, local_ms(2025, 3, 7, 10), "survey", 1, &[]);

    let (start, end) = march(1, 31);
    let all = Aggregator::reports_with_details(&store, start, end, &[]).unwrap();
    assert_eq!(all.len(), 3);

    // Unassigned workers and worker-less drawings never match a group
    let filtered = Aggregator::reports_with_details(&store, start, end, &[g1]).unwrap();
    assert_eq!(filtered.len(), 1);
}

#[test]
fn test_group_filter_drops_non_matching_drawings() {
    let mut store = memory_store();
    let g1 = add_group(&mut store, "G1");
    let g2 = add_group(&mut store, "G2");
    let w1 = add_worker(&mut store, "Ana", Some(g1));
    let w2 = add_worker(&mut store, "Bruno", Some(g2));

    let id = add_report(&mut store, local_ms(2025, 3, 5, 10), "signage", 2, &[w1]);

    // Second drawing on the same report, worked only by G2
    store
        .write(&[Table::Drawings, Table::DrawingWorkers], |conn| {
            let d = insert_drawing(conn, id, &drawing("mowing", 0, 5))?;
            crewlog::db::reports::insert_drawing_worker(conn, d, w2.id)?;
            Ok(())
        })
        .unwrap();

    let (start, end) = march(1, 31);
    let filtered = Aggregator::reports_with_details(&store, start, end, &[g1]).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].drawings.len(), 1);
    assert_eq!(filtered[0].drawings[0].drawing.task_type, "signage");

    let all = Aggregator::reports_with_details(&store, start, end, &[]).unwrap();
    assert_eq!(all[0].drawings.len(), 2);
    assert_eq!(all[0].total_hours(), 7);
}

#[test]
fn test_insert_is_atomic_when_a_worker_is_missing() {
    let mut store = memory_store();
    let real = add_worker(&mut store, "Ana", None);
    let ghost = Worker {
        id: 999,
        name: "Ghost".into(),
        phone_number: String::new(),
        group_id: None,
        daily_leave: 0,
        hourly_leave: 0,
        overtime_hours: 0,
        work_hours: 0,
    };

    let report = NewReport {
        date: local_ms(2025, 3, 5, 10),
        description: "Report for task: signage".into(),
    };

    let res = Aggregator::insert_report_with_drawings(
        &mut store,
        &report,
        &drawing("signage", report.date, 2),
        &[real, ghost],
    );

    assert!(matches!(res, Err(AppError::Storage(_))));
    assert_eq!(count_rows(&store, "reports"), 0);
    assert_eq!(count_rows(&store, "drawings"), 0);
    assert_eq!(count_rows(&store, "drawing_workers"), 0);
}

#[test]
fn test_insert_is_atomic_when_the_drawing_insert_fails() {
    let mut store = memory_store();
    let ana = add_worker(&mut store, "Ana", None);

    store
        .conn()
        .execute_batch(
            "CREATE TRIGGER reject_drawings BEFORE INSERT ON drawings
             BEGIN SELECT RAISE(ABORT, 'drawing rejected'); END;",
        )
        .unwrap();

    let report = NewReport {
        date: local_ms(2025, 3, 5, 10),
        description: "Report for task: signage".into(),
    };

    let res = Aggregator::insert_report_with_drawings(
        &mut store,
        &report,
        &drawing("signage", report.date, 2),
        &[ana],
    );

    assert!(matches!(res, Err(AppError::Storage(_))));
    assert_eq!(count_rows(&store, "reports"), 0);
    assert_eq!(count_rows(&store, "drawings"), 0);
    assert_eq!(count_rows(&store, "drawing_workers"), 0);
}

#[test]
fn test_write_rolls_back_report_when_drawing_targets_missing_report() {
    let mut store = memory_store();

    let res = store.write(&[Table::Reports, Table::Drawings], |conn| {
        let report_id = insert_report(
            conn,
            &NewReport {
                date: local_ms(2025, 3, 5, 10),
                description: "orphan".into(),
            },
        )?;
        insert_drawing(conn, report_id + 1000, &drawing("signage", 0, 1))
    });

    assert!(matches!(res, Err(AppError::Storage(_))));
    assert_eq!(count_rows(&store, "reports"), 0);
    assert_eq!(count_rows(&store, "drawings"), 0);
}

#[test]
fn test_insert_links_every_worker_once() {
    let mut store = memory_store();
    let a = add_worker(&mut store, "Ana", None);
    let b = add_worker(&mut store, "Bruno", None);

    let id = add_report(
        &mut store,
        local_ms(2025, 3, 5, 10),
        "signage",
        2,
        &[a.clone(), b, a],
    );

    let drawings = store.drawings_for_report(id).unwrap();
    assert_eq!(drawings.len(), 1);
    assert_eq!(drawings[0].report_id, id);

    let workers = store.workers_for_drawing(drawings[0].id).unwrap();
    assert_eq!(workers.len(), 2);
}

#[test]
fn test_daily_counts_and_hours_group_by_local_day() {
    let mut store = memory_store();
    let w = add_worker(&mut store, "Ana", None);

    add_report(&mut store, local_ms(2025, 3, 5, 9), "signage", 2, &[w.clone()]);
    add_report(&mut store, local_ms(2025, 3, 5, 15), "mowing", 3, &[w.clone()]);
    add_report(&mut store, local_ms(2025, 3, 6, 12), "cleanup", 4, &[w]);

    let counts = Aggregator::daily_report_counts(&store).unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].date, "2025-03-06");
    assert_eq!(counts[0].count, 1);
    assert_eq!(counts[1].date, "2025-03-05");
    assert_eq!(counts[1].count, 2);

    let hours = Aggregator::daily_work_hours(&store).unwrap();
    assert_eq!(hours.len(), 2);
    assert_eq!(hours[0].total_hours, 4);
    assert_eq!(hours[1].date, "2025-03-05");
    assert_eq!(hours[1].total_hours, 5);
}

#[test]
fn test_daily_stats_on_empty_store() {
    let store = memory_store();
    assert!(Aggregator::daily_report_counts(&store).unwrap().is_empty());
    assert!(Aggregator::daily_work_hours(&store).unwrap().is_empty());
}
