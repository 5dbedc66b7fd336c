use crate::config::Config;
use crate::db::{Store, log};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

use crate::cli::parser::Cli;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database_path();

    println!("⚙️  Initializing crewlog…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", db_path.display());

    let store = Store::open(&db_path)?;
    for version in store.applied_migrations() {
        success(format!("Migration applied: {version}"));
    }

    if let Err(e) = log::ttlog(
        store.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path.display()),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    store.close()?;

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
