//! Editor configuration, loaded from RON.
//!
//! ```ron
//! (
//!     validate_paths: true,
//!     history: (max_depth: 200),
//!     columns: (min_width: 15),
//! )
//! ```
//!
//! Every field has a default, so an empty `()` is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Default for [`ApplyOptions::validate_paths`](crate::ApplyOptions).
    pub validate_paths: bool,
    pub history: HistoryConfig,
    pub columns: ColumnConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            validate_paths: true,
            history: HistoryConfig::default(),
            columns: ColumnConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    /// Oldest entries are evicted beyond this many batches.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_depth: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Floor for explicit column widths. Zero leaves them untouched; widths
    /// above 100 are always capped.
    pub min_width: u32,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self { min_width: 0 }
    }
}

impl EditorConfig {
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Clamp a column width into `min_width..=100`.
    pub(crate) fn clamp_width(&self, width: u32) -> u32 {
        width.clamp(self.columns.min_width.min(100), 100)
    }
}
