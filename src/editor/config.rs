//! Editor Configuration
//!
//! Data-driven settings for the camera and builder controllers with JSON
//! load/save. Unknown fields fall back to defaults so older settings files
//! keep working.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::OrbitConfig;

use super::builder::DEFAULT_CLICK_INTERVAL_MS;

/// Errors from reading or writing a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse: {0}")]
    Json(#[from] serde_json::Error),
}

/// Camera tuning, mirroring [`OrbitConfig`] with angles in degrees for
/// readable settings files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub rotation_speed: f32,
    pub max_rotation_speed: f32,
    pub zoom_speed: f32,
    pub move_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch_deg: f32,
    pub max_pitch_deg: f32,
    pub invert_x: bool,
    pub invert_y: bool,
    pub smooth_motion: bool,
    pub smooth_sensitivity: f32,
    pub stretch_min: f32,
    pub stretch_max: f32,
    pub discard_threshold: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let config = OrbitConfig::default();
        Self {
            rotation_speed: config.rotation_speed,
            max_rotation_speed: config.max_rotation_speed,
            zoom_speed: config.zoom_speed,
            move_speed: config.move_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_pitch_deg: config.min_pitch.to_degrees(),
            max_pitch_deg: config.max_pitch.to_degrees(),
            invert_x: config.invert_x,
            invert_y: config.invert_y,
            smooth_motion: config.smooth_motion,
            smooth_sensitivity: config.smooth_sensitivity,
            stretch_min: config.stretch_min,
            stretch_max: config.stretch_max,
            discard_threshold: config.discard_threshold,
        }
    }
}

impl CameraSettings {
    /// Convert to the controller's config, degrees to radians.
    pub fn to_orbit_config(&self) -> OrbitConfig {
        OrbitConfig {
            rotation_speed: self.rotation_speed,
            max_rotation_speed: self.max_rotation_speed,
            zoom_speed: self.zoom_speed,
            move_speed: self.move_speed,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            min_pitch: self.min_pitch_deg.to_radians(),
            max_pitch: self.max_pitch_deg.to_radians(),
            invert_x: self.invert_x,
            invert_y: self.invert_y,
            smooth_motion: self.smooth_motion,
            smooth_sensitivity: self.smooth_sensitivity,
            stretch_min: self.stretch_min,
            stretch_max: self.stretch_max,
            discard_threshold: self.discard_threshold,
        }
    }
}

/// Builder tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// Time between repeated clicks while a trigger is held, milliseconds.
    /// `0` disables repeat (one click per press).
    pub click_repeat_interval_ms: u32,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            click_repeat_interval_ms: DEFAULT_CLICK_INTERVAL_MS,
        }
    }
}

/// All persistable editor settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub camera: CameraSettings,
    pub builder: BuilderSettings,
}

impl EditorSettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        info!("Loaded editor settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Saved editor settings to {}", path.display());
        Ok(())
    }
}
