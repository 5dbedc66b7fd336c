pub mod absence;
pub mod config;
pub mod db;
pub mod export;
pub mod group;
pub mod init;
pub mod log;
pub mod report;
pub mod stats;
pub mod worker;

use crate::config::Config;
use crate::db::Store;
use crate::errors::AppResult;

/// Open the configured database, applying pending migrations.
pub(crate) fn open_store(cfg: &Config) -> AppResult<Store> {
    Store::open(cfg.database_path())
}
