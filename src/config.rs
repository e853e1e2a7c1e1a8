use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{store::write_atomically, LifeLogError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the journal documents
    pub data_dir: PathBuf,

    /// Days covered by `insights` when no range is given
    pub default_range_days: u32,

    /// Write indented JSON documents
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_range_days: 7,
            pretty_json: false,
        }
    }
}

impl Config {
    /// Where the config file lives when `--config` is not given
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lifelog").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads configuration from `path`, or returns defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(|e| LifeLogError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|_| LifeLogError::DirectoryError {
                    path: parent.to_path_buf(),
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        write_atomically(path, &json)?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_range_days == 0 {
            return Err(LifeLogError::ConfigError {
                message: "default_range_days must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "lifelog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".lifelog"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();

        assert_eq!(config.default_range_days, 7);
        assert!(!config.pretty_json);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.json");
        let config = Config {
            data_dir: dir.path().join("data"),
            default_range_days: 30,
            pretty_json: true,
        };

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_range_days": 14}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_range_days, 14);
        assert_eq!(config.data_dir, Config::default().data_dir);
    }

    #[test]
    fn zero_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_range_days": 0}"#).unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(LifeLogError::ConfigError { .. })
        ));
    }
}
