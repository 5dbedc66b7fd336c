//! SQLite-backed store. Owns the connection and the change hub.
//!
//! The store is opened explicitly at process start and closed explicitly at
//! shutdown; there is no global handle.

use crate::db::initialize::init_db;
use crate::db::watch::{ChangeHub, Subscription, Table};
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, TransactionBehavior};
use std::path::{Path, PathBuf};

pub struct Store {
    conn: Connection,
    hub: ChangeHub,
    path: Option<PathBuf>,
    applied_migrations: Vec<&'static str>,
}

impl Store {
    /// Open (or create) the database at `path` and apply pending migrations.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> AppResult<Self> {
        let applied_migrations = init_db(&conn)?;

        Ok(Self {
            conn,
            hub: ChangeHub::default(),
            path,
            applied_migrations,
        })
    }

    /// Close the connection. Outstanding subscriptions become inactive.
    pub fn close(self) -> AppResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| AppError::Storage(e))
    }

    /// Migration versions applied while opening this store, in order.
    pub fn applied_migrations(&self) -> &[&'static str] {
        &self.applied_migrations
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw connection, for maintenance commands (VACUUM, integrity check, log).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run `func` inside a read transaction so that multi-step reads see one
    /// consistent snapshot.
    pub fn read<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Run `func` inside an immediate write transaction.
    ///
    /// Any error rolls the whole transaction back. On commit, live queries
    /// watching one of `touched` are re-evaluated.
    pub fn write<F, T>(&mut self, touched: &[Table], func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = func(&tx)?;
        tx.commit()?;

        self.hub.notify(touched, &self.conn);
        Ok(out)
    }

    /// Register a live query.
    ///
    /// `on_change` receives the current result immediately, then a fresh
    /// result after every committed write to one of `tables`.
    pub fn subscribe<T, Q, F>(&self, tables: &[Table], query: Q, mut on_change: F) -> Subscription
    where
        Q: Fn(&Connection) -> AppResult<T> + Send + 'static,
        F: FnMut(AppResult<T>) + Send + 'static,
    {
        on_change(query(&self.conn));

        self.hub.register(
            tables.to_vec(),
            Box::new(move |conn| on_change(query(conn))),
        )
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.len()
    }
}
