//! Sketchpad configuration, loadable from JSON.

use crate::brush::BrushConfig;
use crate::color::Rgba;
use crate::export::DEFAULT_EXPORT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Startup settings for a [`Sketchpad`](crate::Sketchpad).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Initial surface width in pixels.
    pub width: i64,
    /// Initial surface height in pixels.
    pub height: i64,
    /// Color the surface clears to, and the color the eraser paints.
    pub background: Rgba,
    /// Brush in effect before the user changes anything.
    pub brush: BrushConfig,
    /// Cap on committed history states. `None` keeps everything.
    pub history_depth: Option<usize>,
    pub export_file_name: String,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 480,
            background: Rgba::WHITE,
            brush: BrushConfig::default(),
            history_depth: None,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl PadConfig {
    /// Size the surface to a fraction of a viewport: 80% wide, 60% tall.
    pub fn for_viewport(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            width: (f64::from(viewport_width) * 0.8) as i64,
            height: (f64::from(viewport_height) * 0.6) as i64,
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json).map_err(|e| {
            ConfigError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| ConfigError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushColor, LinePattern};

    #[test]
    fn test_viewport_sizing() {
        let config = PadConfig::for_viewport(1280, 800);
        assert_eq!((config.width, config.height), (1024, 480));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PadConfig::from_json(r#"{ "width": 300, "history_depth": 20 }"#).unwrap();
        assert_eq!(config.width, 300);
        assert_eq!(config.height, 480);
        assert_eq!(config.history_depth, Some(20));
        assert_eq!(config.export_file_name, "painting.png");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpad.json");

        let mut config = PadConfig::default();
        config.background = Rgba::rgb(250, 250, 250);
        config.brush.pattern = LinePattern::Dotted;
        config.brush.color = BrushColor::Solid(Rgba::rgb(255, 0, 0));
        config.save(&path).unwrap();

        assert_eq!(PadConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(PadConfig::load(&missing), Err(ConfigError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ width: ").unwrap();
        assert!(matches!(PadConfig::load(&broken), Err(ConfigError::Serialization(_))));
    }
}
