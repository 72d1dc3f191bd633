// Editor configuration, loaded from RON (or JSON) on disk

use crate::changes::DispatcherConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_NOTIFICATION_CAPACITY: usize = 64;
const CONFIG_DIR_NAME: &str = "map_changes";
const CONFIG_FILE_NAME: &str = "config.ron";

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("RON serialization error: {0}")]
    RonWrite(#[from] ron::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Append accepted changes to the undo history
    pub log_changes: bool,
    /// Fail on unknown change types instead of ignoring them
    pub strict_change_types: bool,
    /// Keep at most this many history entries (unbounded when None)
    pub max_history: Option<usize>,
    /// Capacity of the notification channel
    pub notification_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_changes: false,
            strict_change_types: false,
            max_history: None,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }
}

impl EditorConfig {
    /// `<config dir>/map_changes/config.ron`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from a file. A missing file yields the defaults.
    ///
    /// Files ending in `.json` are read as JSON, anything else as RON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            ron::from_str(&content)?
        };

        Ok(config)
    }

    /// Load from the default path, falling back to defaults
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            log_changes: self.log_changes,
            strict_change_types: self.strict_change_types,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
