use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database and return the migrations applied just now.
/// Schema creation and upgrades are delegated to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<Vec<&'static str>> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(run_pending_migrations(conn)?)
}
