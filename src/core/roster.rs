//! Worker, group and absence management.

use crate::db::Store;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::{NewWorker, Worker};
use crate::ui::messages::warning;
use std::collections::BTreeMap;

/// Audit a roster change; a failure to log never fails the operation.
fn audit(store: &Store, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(store.conn(), operation, target, message) {
        warning(format!("Failed to write internal log: {e}"));
    }
}

pub struct RosterLogic;

impl RosterLogic {
    pub fn add_group(store: &mut Store, name: &str) -> AppResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("group name must not be empty".into()));
        }
        let id = store.insert_group(name)?;
        audit(store, "group", &format!("#{id}"), &format!("Added group '{name}'"));
        Ok(id)
    }

    pub fn delete_group(store: &mut Store, id: i64) -> AppResult<()> {
        if store.delete_group(id)? == 0 {
            return Err(AppError::NotFound(format!("Group #{id}")));
        }
        audit(store, "delete", &format!("group #{id}"), "Deleted group");
        Ok(())
    }

    pub fn add_worker(store: &mut Store, worker: &NewWorker) -> AppResult<i64> {
        if worker.name.trim().is_empty() {
            return Err(AppError::Other("worker name must not be empty".into()));
        }
        if let Some(g) = worker.group_id
            && store.group(g)?.is_none()
        {
            return Err(AppError::NotFound(format!("Group #{g}")));
        }

        let id = store.insert_worker(worker)?;
        audit(
            store,
            "worker",
            &format!("#{id}"),
            &format!("Added worker '{}'", worker.name),
        );
        Ok(id)
    }

    pub fn delete_worker(store: &mut Store, id: i64) -> AppResult<()> {
        if store.delete_worker(id)? == 0 {
            return Err(AppError::NotFound(format!("Worker #{id}")));
        }
        audit(store, "delete", &format!("worker #{id}"), "Deleted worker");
        Ok(())
    }

    /// Move a worker to `group_id`, or out of any group with `None`.
    pub fn set_group(store: &mut Store, worker_id: i64, group_id: Option<i64>) -> AppResult<()> {
        let mut w = store
            .worker(worker_id)?
            .ok_or_else(|| AppError::NotFound(format!("Worker #{worker_id}")))?;

        if let Some(g) = group_id
            && store.group(g)?.is_none()
        {
            return Err(AppError::NotFound(format!("Group #{g}")));
        }

        w.group_id = group_id;
        store.update_worker(&w)
    }

    pub fn add_overtime(store: &mut Store, worker_id: i64, hours: i64) -> AppResult<i64> {
        let total = store.add_overtime(worker_id, hours)?;
        audit(
            store,
            "overtime",
            &format!("worker #{worker_id}"),
            &format!("{hours:+}h, total {total}h"),
        );
        Ok(total)
    }

    pub fn add_leave(store: &mut Store, worker_id: i64, days: i64, hours: i64) -> AppResult<Worker> {
        let w = store.add_leave(worker_id, days, hours)?;
        audit(
            store,
            "leave",
            &format!("worker #{worker_id}"),
            &format!("{days:+}d {hours:+}h"),
        );
        Ok(w)
    }

    pub fn add_absence(store: &mut Store, worker_id: i64, date: i64, reason: &str) -> AppResult<i64> {
        let id = store.insert_absence(worker_id, date, reason)?;
        audit(
            store,
            "absence",
            &format!("worker #{worker_id}"),
            reason,
        );
        Ok(id)
    }

    /// Workers whose name contains `query`, ignoring case. A blank query
    /// matches everyone.
    pub fn search(store: &Store, query: &str) -> AppResult<Vec<Worker>> {
        let workers = store.workers()?;
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Ok(workers);
        }
        Ok(workers
            .into_iter()
            .filter(|w| w.name.to_lowercase().contains(&q))
            .collect())
    }

    /// Workers keyed by group name; those without a group (or whose group
    /// no longer exists) go under `default_label`.
    pub fn grouped(store: &Store, default_label: &str) -> AppResult<BTreeMap<String, Vec<Worker>>> {
        let names: BTreeMap<i64, String> = store
            .groups()?
            .into_iter()
            .map(|g| (g.id, g.name))
            .collect();

        let mut out: BTreeMap<String, Vec<Worker>> = BTreeMap::new();
        for w in store.workers()? {
            let label = w
                .group_id
                .and_then(|g| names.get(&g).cloned())
                .unwrap_or_else(|| default_label.to_string());
            out.entry(label).or_default().push(w);
        }
        Ok(out)
    }
}
