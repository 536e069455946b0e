use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
    #[serde(default = "default_report_title")]
    pub report_title: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_report_dir() -> String {
    ".".to_string()
}
fn default_report_title() -> String {
    "Timecard Report".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            report_dir: default_report_dir(),
            report_title: default_report_title(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.timecard-vault`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".timecard-vault")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timecard-vault.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timecard-vault.sqlite")
    }

    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    /// Load configuration from `path`. A missing file yields the defaults;
    /// fields absent from an older file fall back to their defaults.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        if cfg.database.trim().is_empty() {
            return Err(AppError::Config(format!(
                "'database' is empty in {}",
                path.display()
            )));
        }
        Ok(cfg)
    }

    /// Write the configuration as YAML to `path`, creating parent dirs.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Initialize the configuration file (unless `is_test`) and return the
    /// configuration that points at the database to create.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let database = match custom_db {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: database.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_conf(name: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!("{name}_timecard-vault.conf"));
        fs::remove_file(&p).ok();
        p
    }

    #[test]
    fn missing_file_gives_defaults() {
        let p = temp_conf("cfg_missing");
        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn old_file_without_optional_fields_still_loads() {
        let p = temp_conf("cfg_partial");
        fs::write(&p, "database: /tmp/somewhere.sqlite\n").unwrap();

        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.database, "/tmp/somewhere.sqlite");
        assert_eq!(cfg.report_title, "Timecard Report");
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn save_then_load_keeps_values() {
        let p = temp_conf("cfg_save");
        let cfg = Config {
            database: "/data/vault.sqlite".into(),
            report_dir: "/data/reports".into(),
            report_title: "Hours".into(),
            log_level: "debug".into(),
        };
        cfg.save_to(&p).unwrap();
        assert_eq!(Config::load_from(&p).unwrap(), cfg);
    }

    #[test]
    fn empty_database_is_rejected() {
        let p = temp_conf("cfg_empty_db");
        fs::write(&p, "database: ''\n").unwrap();
        assert!(matches!(Config::load_from(&p), Err(AppError::Config(_))));
    }
}
