use crate::error::ConfigError;
use crate::forms::DEFAULT_RECENT_LIMIT;
use crate::workflow::DEFAULT_EXPORT_FILENAME;
use serde::{Deserialize, Serialize};
use std::fs;

/// User-tunable settings. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    /// File name offered for workflow downloads.
    pub export_filename: String,
    /// Spaces per indentation level in exported JSON.
    pub export_indent: usize,
    /// How many saved forms the dashboard lists.
    pub recent_forms_limit: usize,
    /// How long notifications stay visible.
    pub notification_duration_ms: u64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            export_indent: 2,
            recent_forms_limit: DEFAULT_RECENT_LIMIT,
            notification_duration_ms: 4000,
        }
    }
}

impl BuilderConfig {
    /// Loads a config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}
