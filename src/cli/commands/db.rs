use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        // Opening already migrates; --migrate reports on it
        let store = open_store(cfg)?;

        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let mut applied = store.applied_migrations().to_vec();
            applied.extend(run_pending_migrations(store.conn())?);
            for version in &applied {
                success(format!("Migration applied: {version}"));
            }
            let pending = pending_migrations(store.conn())?;
            if pending.is_empty() {
                println!("{}✔ Database schema is up to date.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✘ Migrations still pending:{} {}\n",
                    RED,
                    RESET,
                    pending.join(", ")
                );
            }
        }

        if *info {
            stats::print_db_info(&store)?;
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String =
                store
                    .conn()
                    .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            store.conn().execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        store.close()?;
    }

    Ok(())
}
