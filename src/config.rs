use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::Rgba;
use crate::error::ConfigError;
use crate::frame::DEFAULT_FRAME_DURATION_MS;
use crate::renderer::Checkerboard;

/// Engine settings. Missing fields fall back to their defaults, so older or
/// partial config files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size of newly created sprites
    pub sprite_width: u32,
    pub sprite_height: u32,
    /// Duration of newly created frames, in milliseconds
    pub frame_duration: u32,
    pub brush_size: u32,
    pub brush_color: Rgba,
    pub checkerboard: Checkerboard,
    /// Where [`JsonFileStore`](crate::persistence::JsonFileStore) keeps projects
    pub store_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sprite_width: 32,
            sprite_height: 32,
            frame_duration: DEFAULT_FRAME_DURATION_MS,
            brush_size: 1,
            brush_color: Rgba::opaque(255, 255, 0),
            checkerboard: Checkerboard::default(),
            store_dir: PathBuf::from("projects"),
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "brush_size": 5 }"#).unwrap();
        assert_eq!(config.brush_size, 5);
        assert_eq!(config.sprite_width, 32);
        assert_eq!(config.checkerboard, Checkerboard::default());
    }

    #[test]
    fn nested_values_parse() {
        let config = EngineConfig::from_json(
            r#"{
                "brush_color": { "r": 1, "g": 2, "b": 3, "a": 4 },
                "checkerboard": { "cell_size": 4, "light": 255, "dark": 0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.brush_color, Rgba::new(1, 2, 3, 4));
        assert_eq!(config.checkerboard.cell_size, 4);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            EngineConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
