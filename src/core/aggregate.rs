//! Report aggregation: date-range/group filtering, per-day statistics and
//! the atomic report insert.

use crate::db::reports::{
    drawings_for_report, insert_drawing, insert_drawing_worker, insert_report, reports_in_range,
    workers_for_drawing,
};
use crate::db::stats::{daily_report_counts, daily_work_hours};
use crate::db::{Store, Subscription, Table};
use crate::errors::AppResult;
use crate::models::{
    DailyCount, DailyHours, DrawingWithWorkers, NewDrawing, NewReport, ReportWithDetails, Worker,
};

/// Tables whose changes invalidate the per-day statistics.
const STATS_TABLES: &[Table] = &[Table::Reports, Table::Drawings];

pub struct Aggregator;

impl Aggregator {
    /// Reports dated within `[start, end]` (epoch millis, inclusive), most
    /// recent first, each with its drawings and their workers.
    ///
    /// With a non-empty `group_ids`, a drawing is kept only when one of its
    /// workers belongs to one of the groups, and a report is kept only when
    /// at least one of its drawings is. Reports without drawings are never
    /// returned.
    pub fn reports_with_details(
        store: &Store,
        start: i64,
        end: i64,
        group_ids: &[i64],
    ) -> AppResult<Vec<ReportWithDetails>> {
        store.read(|conn| {
            let reports = reports_in_range(conn, start, end)?;
            let mut out = Vec::with_capacity(reports.len());

            for report in reports {
                let mut drawings = Vec::new();

                for drawing in drawings_for_report(conn, report.id)? {
                    let workers = workers_for_drawing(conn, drawing.id)?;
                    let dw = DrawingWithWorkers { drawing, workers };

                    if group_ids.is_empty() || dw.matches_groups(group_ids) {
                        drawings.push(dw);
                    }
                }

                if !drawings.is_empty() {
                    out.push(ReportWithDetails { report, drawings });
                }
            }

            Ok(out)
        })
    }

    pub fn daily_report_counts(store: &Store) -> AppResult<Vec<DailyCount>> {
        store.read(daily_report_counts)
    }

    pub fn daily_work_hours(store: &Store) -> AppResult<Vec<DailyHours>> {
        store.read(daily_work_hours)
    }

    /// Live per-day report counts: `on_change` gets the current list now and
    /// a recomputed one after each committed change to reports or drawings.
    pub fn watch_daily_report_counts<F>(store: &Store, on_change: F) -> Subscription
    where
        F: FnMut(AppResult<Vec<DailyCount>>) + Send + 'static,
    {
        store.subscribe(STATS_TABLES, daily_report_counts, on_change)
    }

    /// Live per-day work hours, see [`Aggregator::watch_daily_report_counts`].
    pub fn watch_daily_work_hours<F>(store: &Store, on_change: F) -> Subscription
    where
        F: FnMut(AppResult<Vec<DailyHours>>) + Send + 'static,
    {
        store.subscribe(STATS_TABLES, daily_work_hours, on_change)
    }

    /// Insert a report, its drawing and one participation per worker as a
    /// single transaction. Returns the new report id.
    ///
    /// On any failure nothing is persisted.
    pub fn insert_report_with_drawings(
        store: &mut Store,
        report: &NewReport,
        drawing: &NewDrawing,
        workers: &[Worker],
    ) -> AppResult<i64> {
        store.write(
            &[Table::Reports, Table::Drawings, Table::DrawingWorkers],
            |conn| {
                let report_id = insert_report(conn, report)?;
                let drawing_id = insert_drawing(conn, report_id, drawing)?;

                for w in workers {
                    insert_drawing_worker(conn, drawing_id, w.id)?;
                }

                Ok(report_id)
            },
        )
    }
}
