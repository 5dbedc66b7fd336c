use serde::Serialize;

/// A crew member ⇔ `workers` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub group_id: Option<i64>, // ⇔ workers.group_id (NULL = unassigned)
    pub daily_leave: i64,
    pub hourly_leave: i64,
    pub overtime_hours: i64,
    pub work_hours: i64,
}

/// Input for a new worker; counters start at zero.
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub name: String,
    pub phone_number: String,
    pub group_id: Option<i64>,
}

impl NewWorker {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            group_id: None,
        }
    }

    pub fn in_group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerGroup {
    pub id: i64,
    pub name: String,
}

/// A recorded absence ⇔ `absences` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Absence {
    pub id: i64,
    pub worker_id: i64,
    pub date: i64, // epoch millis
    pub reason: String,
}
