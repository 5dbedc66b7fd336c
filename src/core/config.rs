use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{yaml}");
        Ok(())
    }

    pub fn check(path: &Path) -> AppResult<()> {
        if !path.exists() {
            info(format!(
                "No configuration file at {}; defaults are in effect.",
                path.display()
            ));
            return Ok(());
        }

        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!(
                "Missing keys (defaults in effect): {}",
                missing.join(", ")
            ));
        }
        Ok(())
    }

    pub fn migrate(path: &Path) -> AppResult<()> {
        if !path.exists() {
            Config::default().save_to(path)?;
            success(format!("Created {}", path.display()));
            return Ok(());
        }
        migrate_config_file(path)?;
        Ok(())
    }

    /// Open the configuration file in an editor, falling back to the
    /// platform default when the requested one cannot be started.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration edited using '{editor_to_use}'"));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            )),
        }

        match Command::new(&default_editor).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration edited using fallback '{default_editor}'"
                ));
                Ok(())
            }
            _ => Err(AppError::Config(format!(
                "failed to edit configuration using '{default_editor}'"
            ))),
        }
    }
}
