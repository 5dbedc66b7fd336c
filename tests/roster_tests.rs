use crewlog::core::geocode::{Geocoder, NoGeocoder};
use crewlog::core::record::{NewTask, ReportLogic};
use crewlog::core::roster::RosterLogic;
use crewlog::errors::AppError;
use crewlog::models::{DrawingType, GeoPoint, NewWorker};

mod common;
use common::{add_group, add_report, add_worker, count_rows, local_ms, memory_store};

struct FixedGeocoder;

impl Geocoder for FixedGeocoder {
    fn reverse(&self, point: GeoPoint) -> Option<String> {
        Some(format!("Near {:.2},{:.2}", point.lat, point.lon))
    }
}

fn task(worker_ids: Vec<i64>) -> NewTask {
    NewTask {
        kind: DrawingType::Polyline,
        points: vec![GeoPoint::new(45.07, 7.68), GeoPoint::new(45.08, 7.69)],
        task_type: "Line painting".into(),
        description: "Crosswalk on Via Po".into(),
        address: None,
        timestamp: local_ms(2025, 3, 5, 10),
        hours: 4,
        worker_ids,
    }
}

#[test]
fn test_workers_are_listed_by_name() {
    let mut store = memory_store();
    add_worker(&mut store, "Carla", None);
    add_worker(&mut store, "Ana", None);
    add_worker(&mut store, "Bruno", None);

    let names: Vec<String> = store.workers().unwrap().into_iter().map(|w| w.name).collect();
    assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let mut store = memory_store();
    add_worker(&mut store, "Anna Rossi", None);
    add_worker(&mut store, "Marco Bianchi", None);

    let hits = RosterLogic::search(&store, "ROSS").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Anna Rossi");

    assert_eq!(RosterLogic::search(&store, "  ").unwrap().len(), 2);
    assert!(RosterLogic::search(&store, "zzz").unwrap().is_empty());
}

#[test]
fn test_grouped_listing_uses_default_label() {
    let mut store = memory_store();
    let roads = add_group(&mut store, "Roads");
    add_worker(&mut store, "Ana", Some(roads));
    add_worker(&mut store, "Bruno", None);

    let grouped = RosterLogic::grouped(&store, "Unassigned").unwrap();
    let labels: Vec<&str> = grouped.keys().map(String::as_str).collect();
    assert_eq!(labels, vec!["Roads", "Unassigned"]);
    assert_eq!(grouped["Roads"][0].name, "Ana");
    assert_eq!(grouped["Unassigned"][0].name, "Bruno");
}

#[test]
fn test_deleting_group_unassigns_workers() {
    let mut store = memory_store();
    let roads = add_group(&mut store, "Roads");
    let ana = add_worker(&mut store, "Ana", Some(roads));

    RosterLogic::delete_group(&mut store, roads).unwrap();

    let ana = store.worker(ana.id).unwrap().unwrap();
    assert_eq!(ana.group_id, None);
    assert!(store.groups().unwrap().is_empty());

    assert!(matches!(
        RosterLogic::delete_group(&mut store, roads),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_rename_group() {
    let mut store = memory_store();
    let id = add_group(&mut store, "Roads");

    store.rename_group(id, "Streets").unwrap();
    assert_eq!(store.group(id).unwrap().unwrap().name, "Streets");
    assert!(matches!(store.rename_group(99, "x"), Err(AppError::NotFound(_))));
}

#[test]
fn test_add_worker_into_unknown_group_fails() {
    let mut store = memory_store();
    let res = RosterLogic::add_worker(&mut store, &NewWorker::new("Ana", "1").in_group(7));
    assert!(matches!(res, Err(AppError::NotFound(_))));
    assert!(store.workers().unwrap().is_empty());

    let res = RosterLogic::add_worker(&mut store, &NewWorker::new("  ", "1"));
    assert!(res.is_err());
}

#[test]
fn test_set_group_moves_and_clears() {
    let mut store = memory_store();
    let roads = add_group(&mut store, "Roads");
    let ana = add_worker(&mut store, "Ana", None);

    RosterLogic::set_group(&mut store, ana.id, Some(roads)).unwrap();
    assert_eq!(store.worker(ana.id).unwrap().unwrap().group_id, Some(roads));

    RosterLogic::set_group(&mut store, ana.id, None).unwrap();
    assert_eq!(store.worker(ana.id).unwrap().unwrap().group_id, None);

    assert!(matches!(
        RosterLogic::set_group(&mut store, 42, None),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_overtime_and_leave_accumulate() {
    let mut store = memory_store();
    let ana = add_worker(&mut store, "Ana", None);

    assert_eq!(RosterLogic::add_overtime(&mut store, ana.id, 3).unwrap(), 3);
    assert_eq!(RosterLogic::add_overtime(&mut store, ana.id, 2).unwrap(), 5);
    assert_eq!(RosterLogic::add_overtime(&mut store, ana.id, -1).unwrap(), 4);

    let w = RosterLogic::add_leave(&mut store, ana.id, 1, 4).unwrap();
    assert_eq!((w.daily_leave, w.hourly_leave), (1, 4));
    let w = RosterLogic::add_leave(&mut store, ana.id, 2, 0).unwrap();
    assert_eq!((w.daily_leave, w.hourly_leave), (3, 4));
    assert_eq!(w.overtime_hours, 4);

    assert!(matches!(
        store.add_overtime(999, 1),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_absences_are_listed_most_recent_first() {
    let mut store = memory_store();
    let ana = add_worker(&mut store, "Ana", None);

    RosterLogic::add_absence(&mut store, ana.id, local_ms(2025, 3, 1, 0), "Sick").unwrap();
    RosterLogic::add_absence(&mut store, ana.id, local_ms(2025, 3, 10, 0), "Training").unwrap();

    let reasons: Vec<String> = store
        .absences_for_worker(ana.id)
        .unwrap()
        .into_iter()
        .map(|a| a.reason)
        .collect();
    assert_eq!(reasons, vec!["Training", "Sick"]);

    assert!(RosterLogic::add_absence(&mut store, 999, 0, "x").is_err());
}

#[test]
fn test_deleting_worker_cascades() {
    let mut store = memory_store();
    let ana = add_worker(&mut store, "Ana", None);
    RosterLogic::add_absence(&mut store, ana.id, local_ms(2025, 3, 1, 0), "Sick").unwrap();
    let report = add_report(&mut store, local_ms(2025, 3, 5, 10), "Signage", 2, &[ana.clone()]);

    RosterLogic::delete_worker(&mut store, ana.id).unwrap();

    assert_eq!(count_rows(&store, "absences"), 0);
    assert_eq!(count_rows(&store, "drawing_workers"), 0);
    // The report and its drawing remain
    assert!(store.report(report).unwrap().is_some());
    assert_eq!(count_rows(&store, "drawings"), 1);
}

#[test]
fn test_deleting_report_cascades_to_drawings() {
    let mut store = memory_store();
    let ana = add_worker(&mut store, "Ana", None);
    let report = add_report(&mut store, local_ms(2025, 3, 5, 10), "Signage", 2, &[ana]);

    assert_eq!(store.delete_report(report).unwrap(), 1);
    assert_eq!(count_rows(&store, "drawings"), 0);
    assert_eq!(count_rows(&store, "drawing_workers"), 0);
    assert_eq!(store.workers().unwrap().len(), 1);
}

#[test]
fn test_record_builds_report_from_task() {
    let mut store = memory_store();
    let ana = add_worker(&mut store, "Ana", None);

    let id = ReportLogic::record(&mut store, &FixedGeocoder, task(vec![ana.id])).unwrap();

    let report = store.report(id).unwrap().unwrap();
    assert_eq!(report.description, "Report for task: Line painting");
    assert_eq!(report.date, local_ms(2025, 3, 5, 10));

    let drawings = store.drawings_for_report(id).unwrap();
    assert_eq!(drawings.len(), 1);
    let d = &drawings[0];
    assert_eq!(d.kind, DrawingType::Polyline);
    assert_eq!(d.points, "45.07,7.68;45.08,7.69");
    assert_eq!(d.address.as_deref(), Some("Near 45.07,7.68"));
    assert_eq!(d.hours, 4);
    assert_eq!(d.geo_points().unwrap().len(), 2);

    let workers = store.workers_for_drawing(d.id).unwrap();
    assert_eq!(workers, vec![ana]);
}

#[test]
fn test_record_keeps_given_address_and_tolerates_no_geocoder() {
    let mut store = memory_store();

    let mut with_address = task(vec![]);
    with_address.address = Some("Via Po 12".into());
    let id = ReportLogic::record(&mut store, &FixedGeocoder, with_address).unwrap();
    assert_eq!(
        store.drawings_for_report(id).unwrap()[0].address.as_deref(),
        Some("Via Po 12")
    );

    let id = ReportLogic::record(&mut store, &NoGeocoder, task(vec![])).unwrap();
    assert_eq!(store.drawings_for_report(id).unwrap()[0].address, None);
}

#[test]
fn test_record_rejects_invalid_tasks() {
    let mut store = memory_store();

    let mut no_points = task(vec![]);
    no_points.points.clear();
    assert!(matches!(
        ReportLogic::record(&mut store, &NoGeocoder, no_points),
        Err(AppError::InvalidPoints(_))
    ));

    assert!(matches!(
        ReportLogic::record(&mut store, &NoGeocoder, task(vec![404])),
        Err(AppError::NotFound(_))
    ));

    assert_eq!(count_rows(&store, "reports"), 0);
}

#[test]
fn test_update_report_description() {
    let mut store = memory_store();
    let id = add_report(&mut store, local_ms(2025, 3, 5, 10), "Signage", 2, &[]);

    store.update_report_description(id, "Signage, second pass").unwrap();
    assert_eq!(
        store.report(id).unwrap().unwrap().description,
        "Signage, second pass"
    );
    assert!(matches!(
        store.update_report_description(999, "x"),
        Err(AppError::NotFound(_))
    ));
}
