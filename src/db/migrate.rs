use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_core_tables",
        description: "Created groups, workers, reports, drawings, drawing_workers and absences",
        sql: r#"
        CREATE TABLE IF NOT EXISTS worker_groups (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS workers (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            phone_number   TEXT NOT NULL DEFAULT '',
            daily_leave    INTEGER NOT NULL DEFAULT 0,
            hourly_leave   INTEGER NOT NULL DEFAULT 0,
            overtime_hours INTEGER NOT NULL DEFAULT 0,
            work_hours     INTEGER NOT NULL DEFAULT 0,
            group_id       INTEGER REFERENCES worker_groups(id) ON DELETE SET NULL
        );

        CREATE TABLE IF NOT EXISTS reports (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        INTEGER NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS drawings (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            report_id   INTEGER NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
            kind        TEXT NOT NULL CHECK(kind IN ('POLYGON','POLYLINE','POINT')),
            points      TEXT NOT NULL,
            task_type   TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            address     TEXT,
            timestamp   INTEGER NOT NULL,
            hours       INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS drawing_workers (
            drawing_id INTEGER NOT NULL REFERENCES drawings(id) ON DELETE CASCADE,
            worker_id  INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
            PRIMARY KEY (drawing_id, worker_id)
        );

        CREATE TABLE IF NOT EXISTS absences (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
            date      INTEGER NOT NULL,
            reason    TEXT NOT NULL DEFAULT ''
        );
        "#,
    },
    Migration {
        version: "20250412_0002_add_lookup_indexes",
        description: "Added indexes on report dates and foreign keys",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_reports_date ON reports(date);
        CREATE INDEX IF NOT EXISTS idx_drawings_report ON drawings(report_id);
        CREATE INDEX IF NOT EXISTS idx_drawing_workers_worker ON drawing_workers(worker_id);
        CREATE INDEX IF NOT EXISTS idx_workers_group ON workers(group_id);
        CREATE INDEX IF NOT EXISTS idx_absences_worker_date ON absences(worker_id, date);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Names of the migrations still to be applied, in order.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations and return the versions
/// applied, in order. Prints nothing; callers decide what to report.
///
/// Invoked every time a store is opened; already applied versions are skipped.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
            applied.push(m.version);
        }
    }

    Ok(applied)
}
