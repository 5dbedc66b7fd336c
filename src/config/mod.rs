use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_group_label")]
    pub default_group_label: String,
    /// Custom HTML template; the bundled one is used when unset.
    #[serde(default)]
    pub template: Option<String>,
    /// Custom stylesheet; the bundled one is used when unset.
    #[serde(default)]
    pub stylesheet: Option<String>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_export_dir() -> String {
    Config::config_dir()
        .join("exports")
        .to_string_lossy()
        .to_string()
}
fn default_date_format() -> String {
    "%Y/%m/%d".to_string()
}
fn default_group_label() -> String {
    "Unassigned".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            export_dir: default_export_dir(),
            date_format: default_date_format(),
            default_group_label: default_group_label(),
            template: None,
            stylesheet: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("crewlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".crewlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("crewlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("crewlog.sqlite")
    }

    /// Load configuration from the standard location, or defaults if absent.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn export_dir_path(&self) -> PathBuf {
        expand_tilde(&self.export_dir)
    }

    pub fn template_path(&self) -> Option<PathBuf> {
        self.template.as_deref().map(expand_tilde)
    }

    pub fn stylesheet_path(&self) -> Option<PathBuf> {
        self.stylesheet.as_deref().map(expand_tilde)
    }

    /// Resolve a user supplied database path. `~/` is expanded and a
    /// relative path is taken inside the configuration directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize the configuration directory, file and database location.
    ///
    /// In test mode the configuration file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
