use std::fs;
use std::path::Path;

use log::{info, warn};
use riskgrid::{ConfigError, WidgetConfig};
use serde::{Deserialize, Serialize};

use crate::paths;
use crate::theme::Theme;

/// Everything the terminal app reads from its JSON config file. Widget keys
/// sit at the top level next to `theme`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    #[serde(flatten)]
    pub widget: WidgetConfig,
    pub theme: Theme,
}

impl TuiConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit`, or the platform config file when none is given.
    /// A missing default file is silent; every other failure logs a warning
    /// and falls back to defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match paths::config_file() {
                Some(path) => (path, false),
                None => return Self::default(),
            },
        };

        if !required && !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_keys_are_flattened() {
        let config: TuiConfig = serde_json::from_str(
            r#"{"truncate_words": 3, "theme": {"accent": {"l": 0.5, "c": 0.1, "h": 10.0}}}"#,
        )
        .unwrap();
        assert_eq!(config.widget.truncate_words, 3);
        assert_eq!(config.widget.truncated_width, WidgetConfig::default().truncated_width);
        assert_eq!(config.theme.risk_low, Theme::default().risk_low);
    }

    #[test]
    fn test_bad_explicit_file_falls_back() {
        let dir = std::env::temp_dir().join("riskgrid-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(TuiConfig::load_or_default(Some(&path)), TuiConfig::default());
        assert!(matches!(TuiConfig::load(&path), Err(ConfigError::Parse { .. })));
    }
}
