//! Application configuration
//!
//! Stored with `confy` in the platform config directory. Everything has a
//! default so a missing or partial file still yields a usable config.

use std::fs;
use std::path::{Path, PathBuf};

use copilot_types::NotificationSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::journal::reader::default_journal_dir;

pub const APP_NAME: &str = "route-copilot";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Route CSV exported by the route planner
    #[serde(default)]
    pub route_path: Option<PathBuf>,

    /// Directory holding the game's `Journal.*.log` files
    #[serde(default = "default_journal_directory")]
    pub journal_directory: PathBuf,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            route_path: None,
            journal_directory: default_journal_directory(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default confy location, creating it if missing.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Load an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn store(&self) -> Result<(), ConfigError> {
        Ok(confy::store(APP_NAME, None, self)?)
    }

    /// Where `load`/`store` read and write
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }
}

fn default_journal_directory() -> PathBuf {
    default_journal_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Confy(#[from] confy::ConfyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copilot.toml");
        fs::write(
            &path,
            r#"
route_path = "/tmp/neutron-route.csv"
journal_directory = "/tmp/journals"

[notifications]
announce_jumps = true
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.route_path, Some(PathBuf::from("/tmp/neutron-route.csv")));
        assert_eq!(config.journal_directory, PathBuf::from("/tmp/journals"));
        assert!(config.notifications.announce_jumps);
        assert_eq!(config.notifications.hazard.ttl_secs, 5);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "route_path = [").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = AppConfig {
            route_path: Some(PathBuf::from("route.csv")),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
