use serde::Serialize;

/// Number of reports recorded on a local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: String, // YYYY-MM-DD
    pub count: i64,
}

/// Hours worked across all drawings of a local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyHours {
    pub date: String,
    pub total_hours: i64,
}
