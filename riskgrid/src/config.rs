//! Widget configuration.
//!
//! Defaults are in terminal cells. [`WidgetConfig::pixels`] carries the
//! browser-scale constants for pixel surfaces.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fit::{FitMetrics, HeaderFont};
use crate::position::PlacementOptions;

/// Cells with more words than this are truncated.
pub const DEFAULT_TRUNCATE_WORDS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub truncate_words: usize,
    pub header_font: HeaderFont,
    pub fit: FitMetrics,
    pub tooltip: PlacementOptions,
    pub dropdown: PlacementOptions,
    /// Widest a tooltip grows before wrapping its text.
    pub tooltip_max_width: u16,
    /// Width a truncated cell is elided to.
    pub truncated_width: u16,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            truncate_words: DEFAULT_TRUNCATE_WORDS,
            header_font: HeaderFont::default(),
            fit: FitMetrics::CELLS,
            tooltip: PlacementOptions::TOOLTIP_CELLS,
            dropdown: PlacementOptions::DROPDOWN_CELLS,
            tooltip_max_width: 48,
            truncated_width: 28,
        }
    }
}

impl WidgetConfig {
    pub fn pixels() -> Self {
        Self {
            fit: FitMetrics::PIXELS,
            tooltip: PlacementOptions::TOOLTIP_PIXELS,
            dropdown: PlacementOptions::DROPDOWN_PIXELS,
            tooltip_max_width: 360,
            truncated_width: 240,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WidgetConfig::from_json(r#"{"truncate_words": 10}"#).unwrap();
        assert_eq!(config.truncate_words, 10);
        assert_eq!(config.fit, FitMetrics::CELLS);
        assert_eq!(config.tooltip, PlacementOptions::TOOLTIP_CELLS);
    }

    #[test]
    fn test_unknown_file_is_io_error() {
        let err = WidgetConfig::load(Path::new("/nonexistent/riskgrid.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
