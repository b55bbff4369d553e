use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::row::TAB_STOP;
use crate::syntax::{builtin_languages, Syntax};

/// Editor configuration, loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Columns between tab stops
    pub tab_stop: usize,

    /// Extra Ctrl-Q presses needed to quit with unsaved changes
    pub quit_times: usize,

    /// Seconds a status message stays visible
    pub message_timeout_secs: u64,

    /// Color theme name ("dark", "light" or "high-contrast")
    pub theme: String,

    /// Highlight rule sets, first match wins
    pub languages: Vec<Syntax>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: TAB_STOP,
            quit_times: 3,
            message_timeout_secs: 5,
            theme: "dark".to_string(),
            languages: builtin_languages(),
        }
    }
}

impl Config {
    /// Load a config file. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| EditorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&contents).map_err(|source| EditorError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            "Loaded config from {:?} ({} languages)",
            path,
            config.languages.len()
        );
        Ok(config)
    }
}
