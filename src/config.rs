//! Serializable viewer configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants to
//! change:
//!
//! ```json
//! { "start_date": "12/26/2012", "reference": "Jupiter", "planet_scale": 40.0 }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::catalog;
use crate::error::ConfigError;
use crate::label::LabelStyle;
use crate::scene::SceneSettings;
use crate::time;

/// Window settings for the preview renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spacecast".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Label font settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub font_face: String,
    pub font_size: f64,
    pub bold: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        let style = LabelStyle::default();
        Self {
            font_face: style.font_face,
            font_size: style.font_size,
            bold: style.bold,
        }
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpacecastConfig {
    /// Simulated start date. `None` starts at the current time.
    pub start_date: Option<String>,
    /// Simulated seconds per real second.
    pub time_scale: f64,
    pub paused: bool,
    /// Body the camera frames at startup.
    pub reference: String,
    /// Planet-size slider value.
    pub planet_scale: f64,
    pub show_milky_way: bool,
    pub show_central_plane: bool,
    /// Directory image assets are read from.
    pub asset_dir: PathBuf,
    pub window: WindowConfig,
    pub labels: LabelConfig,
}

impl Default for SpacecastConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            time_scale: 1.0,
            paused: false,
            reference: catalog::SUN.to_string(),
            planet_scale: 1.0,
            show_milky_way: false,
            show_central_plane: false,
            asset_dir: PathBuf::from("."),
            window: WindowConfig::default(),
            labels: LabelConfig::default(),
        }
    }
}

impl SpacecastConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse configuration from JSON text. The start date is checked here so a
    /// bad value fails at load time rather than being silently dropped.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.start_date()?;
        Ok(config)
    }

    /// The parsed start date, if one is configured.
    pub fn start_date(&self) -> Result<Option<DateTime<Utc>>, ConfigError> {
        self.start_date
            .as_deref()
            .map(time::parse_date)
            .transpose()
            .map_err(ConfigError::from)
    }

    pub fn label_style(&self) -> LabelStyle {
        LabelStyle {
            font_face: self.labels.font_face.clone(),
            font_size: self.labels.font_size,
            bold: self.labels.bold,
            ..LabelStyle::default()
        }
    }

    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            asset_dir: self.asset_dir.clone(),
            label_style: self.label_style(),
            ..SceneSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_object_is_default() {
        let config = SpacecastConfig::from_json("{}").unwrap();
        assert_eq!(config, SpacecastConfig::default());
        assert_eq!(config.reference, "Sun");
        assert!(config.start_date().unwrap().is_none());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{
            "start_date": "12/26/2012",
            "planet_scale": 40.0,
            "window": { "width": 800 },
            "labels": { "font_face": "Helvetica" }
        }"#;
        let config = SpacecastConfig::from_json(json).unwrap();
        assert_eq!(
            config.start_date().unwrap(),
            Some(Utc.with_ymd_and_hms(2012, 12, 26, 0, 0, 0).unwrap())
        );
        assert_eq!(config.planet_scale, 40.0);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        let style = config.label_style();
        assert_eq!(style.font(), "Bold 128px Helvetica");
        assert_eq!(config.scene_settings().label_style, style);
    }

    #[test]
    fn test_bad_start_date_is_rejected() {
        let err = SpacecastConfig::from_json(r#"{ "start_date": "someday" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::StartDate(_)));
    }

    #[test]
    fn test_bad_json_is_rejected() {
        let err = SpacecastConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("spacecast-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "reference": "Mars", "show_central_plane": true }"#).unwrap();
        let loaded = SpacecastConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(
            loaded,
            SpacecastConfig {
                reference: "Mars".to_string(),
                show_central_plane: true,
                ..SpacecastConfig::default()
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let err = SpacecastConfig::load("/nonexistent/spacecast.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
