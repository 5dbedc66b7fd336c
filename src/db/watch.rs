//! Change notifications for live queries.
//!
//! Every committed write reports the tables it touched; listeners registered
//! for any of those tables are re-run against the connection right after the
//! commit. A listener stays registered until its [`Subscription`] is
//! cancelled or dropped.

use rusqlite::Connection;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    WorkerGroups,
    Workers,
    Reports,
    Drawings,
    DrawingWorkers,
    Absences,
}

type Listener = Box<dyn FnMut(&Connection) + Send>;

struct Entry {
    tables: Vec<Table>,
    listener: Listener,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

fn lock(state: &Mutex<HubState>) -> MutexGuard<'_, HubState> {
    match state.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[derive(Default)]
pub struct ChangeHub {
    state: Arc<Mutex<HubState>>,
}

impl ChangeHub {
    pub fn register(&self, tables: Vec<Table>, listener: Listener) -> Subscription {
        let mut st = lock(&self.state);
        let id = st.next_id;
        st.next_id += 1;
        st.entries.insert(id, Entry { tables, listener });

        Subscription {
            id,
            hub: Arc::downgrade(&self.state),
        }
    }

    /// Run every listener interested in at least one of `touched`.
    ///
    /// Listeners run in registration order while the hub is locked, so they
    /// must not register or cancel subscriptions themselves.
    pub fn notify(&self, touched: &[Table], conn: &Connection) {
        let mut st = lock(&self.state);
        for entry in st.entries.values_mut() {
            if entry.tables.iter().any(|t| touched.contains(t)) {
                (entry.listener)(conn);
            }
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.state).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a live query. Dropping it unsubscribes.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<HubState>>,
}

impl Subscription {
    pub fn cancel(self) {
        // Drop does the work.
    }

    /// False once cancelled or once the owning store is closed.
    pub fn is_active(&self) -> bool {
        match self.hub.upgrade() {
            Some(state) => lock(&state).entries.contains_key(&self.id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.hub.upgrade() {
            lock(&state).entries.remove(&self.id);
        }
    }
}
