use super::drawing_type::DrawingType;
use super::geo_point::GeoPoint;
use super::worker::Worker;
use crate::errors::AppResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub id: i64,
    pub date: i64, // ⇔ reports.date (epoch millis)
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub date: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub id: i64,
    pub report_id: i64,
    pub kind: DrawingType,
    pub points: String, // ⇔ drawings.points ("lat,lon;lat,lon")
    pub task_type: String,
    pub description: String,
    pub address: Option<String>,
    pub timestamp: i64,
    pub hours: i64,
}

impl Drawing {
    pub fn geo_points(&self) -> AppResult<Vec<GeoPoint>> {
        GeoPoint::parse_list(&self.points)
    }
}

/// A drawing before it is attached to a report.
/// The owning report id is assigned inside the insert transaction.
#[derive(Debug, Clone)]
pub struct NewDrawing {
    pub kind: DrawingType,
    pub points: Vec<GeoPoint>,
    pub task_type: String,
    pub description: String,
    pub address: Option<String>,
    pub timestamp: i64,
    pub hours: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawingWithWorkers {
    pub drawing: Drawing,
    pub workers: Vec<Worker>,
}

impl DrawingWithWorkers {
    /// True when at least one participant belongs to one of `group_ids`.
    pub fn matches_groups(&self, group_ids: &[i64]) -> bool {
        self.workers
            .iter()
            .any(|w| w.group_id.is_some_and(|g| group_ids.contains(&g)))
    }
}

/// A report assembled on demand with its drawings and participants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportWithDetails {
    pub report: Report,
    pub drawings: Vec<DrawingWithWorkers>,
}

impl ReportWithDetails {
    pub fn total_hours(&self) -> i64 {
        self.drawings.iter().map(|d| d.drawing.hours).sum()
    }
}
