//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::repository::DEFAULT_DATA_FILE;

/// SAV configuration read from the global config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file used when neither `--data-file` nor `SAV_DATA_FILE` is set
    pub data_file: Option<PathBuf>,

    /// Default output format for `sav list`
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration, falling back to defaults when no file is present
    ///
    /// Unreadable or malformed config files are ignored.
    pub fn load() -> Self {
        Self::global_config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load configuration from a specific YAML file
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    /// Get the path to the global config file (~/.config/sav/config.yaml)
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sav")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Resolve the data file: explicit path first, then config, then default
    pub fn data_file(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}
