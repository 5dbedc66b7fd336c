use crate::core::aggregate::Aggregator;
use crate::core::geocode::Geocoder;
use crate::db::Store;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::{DrawingType, GeoPoint, NewDrawing, NewReport};
use crate::ui::messages::{success, warning};

/// One mapped task as entered by a crew lead.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub kind: DrawingType,
    pub points: Vec<GeoPoint>,
    pub task_type: String,
    pub description: String,
    pub address: Option<String>,
    pub timestamp: i64,
    pub hours: i64,
    pub worker_ids: Vec<i64>,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Record a task as a new report holding a single drawing.
    ///
    /// When no address is given, the first point is reverse-geocoded.
    pub fn record(store: &mut Store, geocoder: &dyn Geocoder, task: NewTask) -> AppResult<i64> {
        let first = *task
            .points
            .first()
            .ok_or_else(|| AppError::InvalidPoints("at least one point is required".into()))?;

        if task.hours < 0 {
            return Err(AppError::Other(format!(
                "hours must not be negative (got {})",
                task.hours
            )));
        }

        let address = task
            .address
            .filter(|a| !a.trim().is_empty())
            .or_else(|| geocoder.reverse(first));

        if address.is_none() {
            warning("No address recorded for this task.");
        }

        let workers = store.workers_by_ids(&task.worker_ids)?;

        let report = NewReport {
            date: task.timestamp,
            description: format!("Report for task: {}", task.task_type),
        };

        let drawing = NewDrawing {
            kind: task.kind,
            points: task.points,
            task_type: task.task_type,
            description: task.description,
            address,
            timestamp: task.timestamp,
            hours: task.hours,
        };

        let report_id = Aggregator::insert_report_with_drawings(store, &report, &drawing, &workers)?;

        if let Err(e) = ttlog(
            store.conn(),
            "report",
            &format!("#{report_id}"),
            &format!(
                "{} {} with {} worker(s)",
                drawing.task_type,
                drawing.kind.label(),
                workers.len()
            ),
        ) {
            warning(format!("Failed to write internal log: {e}"));
        }

        success(format!("Report #{report_id} recorded."));
        Ok(report_id)
    }
}
