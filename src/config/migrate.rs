//! Detect and fill keys missing from an older configuration file.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

const KNOWN_KEYS: &[&str] = &[
    "database",
    "export_dir",
    "date_format",
    "default_group_label",
    "template",
    "stylesheet",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top level is not a mapping",
            path.display()
        ))),
    }
}

/// Keys the file does not define (their defaults are in effect).
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(KNOWN_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Rewrite the file with every key present, keeping existing values.
///
/// Returns `Ok(false)` when nothing had to change.
pub fn migrate_config_file(path: &Path) -> AppResult<bool> {
    let missing = missing_keys(path)?;
    if missing.is_empty() {
        info("Configuration file is up to date.");
        return Ok(false);
    }

    let cfg = Config::load_from(path)?;
    cfg.save_to(path)?;

    success(format!("Added missing keys: {}", missing.join(", ")));
    Ok(true)
}
