//! Render settings file.
//!
//! A JSON document combining image, sampling and camera settings. Every field
//! is optional:
//!
//! ```json
//! { "width": 400, "height": 240, "samples_per_pixel": 64, "seed": 7,
//!   "camera": { "look_from": [13, 2, 3], "vfov": 20.0 },
//!   "output": "cover.png" }
//! ```

use crate::{CameraSettings, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or checking settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Everything needed to render one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    #[serde(flatten)]
    pub render: RenderConfig,
    pub camera: CameraSettings,
    pub output: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraSettings::default(),
            output: PathBuf::from("out.ppm"),
        }
    }
}

impl RenderSettings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject settings that would produce a degenerate camera or image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render;
        if render.width == 0 {
            return Err(ConfigError::invalid("width", "must be at least 1"));
        }
        if render.height == 0 {
            return Err(ConfigError::invalid("height", "must be at least 1"));
        }
        if render.samples_per_pixel == 0 {
            return Err(ConfigError::invalid("samples_per_pixel", "must be at least 1"));
        }
        if render.max_depth == 0 {
            return Err(ConfigError::invalid("max_depth", "must be at least 1"));
        }

        let camera = &self.camera;
        for (field, value) in [
            ("camera.look_from", camera.look_from),
            ("camera.look_at", camera.look_at),
            ("camera.vup", camera.vup),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }
        if !(camera.vfov > 0.0 && camera.vfov < 180.0) {
            return Err(ConfigError::invalid("camera.vfov", "must be within (0, 180) degrees"));
        }
        if !(camera.aperture.is_finite() && camera.aperture >= 0.0) {
            return Err(ConfigError::invalid("camera.aperture", "must be non-negative"));
        }
        if !(camera.focus_dist.is_finite() && camera.focus_dist > 0.0) {
            return Err(ConfigError::invalid("camera.focus_dist", "must be positive"));
        }

        let view = camera.look_from - camera.look_at;
        if view.length_squared() < 1e-12 {
            return Err(ConfigError::invalid("camera.look_at", "must differ from look_from"));
        }
        if camera.vup.cross(view).length_squared() < 1e-12 {
            return Err(ConfigError::invalid(
                "camera.vup",
                "must not be parallel to the view direction",
            ));
        }

        Ok(())
    }
}
