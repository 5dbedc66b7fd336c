pub mod drawing_type;
pub mod geo_point;
pub mod report;
pub mod stats;
pub mod worker;

pub use drawing_type::DrawingType;
pub use geo_point::GeoPoint;
pub use report::{Drawing, DrawingWithWorkers, NewDrawing, NewReport, Report, ReportWithDetails};
pub use stats::{DailyCount, DailyHours};
pub use worker::{Absence, NewWorker, Worker, WorkerGroup};
