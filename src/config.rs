//! Configuration file handling for finger-lightning.
//!
//! Loads configuration from `~/.config/finger-lightning/config.toml` or a
//! custom path. Every field has a built-in default, so the file is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::camera::{CameraSettings, Resolution};
use crate::compositor::Compositor;
use crate::draw::Rgb;
use crate::hands::{HandConfig, FINGERTIPS};
use crate::lightning::BoltStyle;

const MAX_HANDS: usize = 4;
const MAX_SEGMENTS: u32 = 1000;
const MAX_JITTER: i32 = 4096;
const MAX_THICKNESS: u32 = 64;
const MAX_MARKER_RADIUS: i32 = 512;

fn check(field: &'static str, ok: bool, reason: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: reason(),
        })
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub hands: HandsConfig,
    pub lightning: LightningConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub device: u32,
    pub mirror: bool,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            mirror: true,
            width: Resolution::VGA.width,
            height: Resolution::VGA.height,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HandsConfig {
    pub max_hands: usize,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    /// Interpreter that has `mediapipe` installed
    pub python: String,
}

impl Default for HandsConfig {
    fn default() -> Self {
        Self {
            max_hands: 2,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
            python: "python3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LightningConfig {
    pub segments: u32,
    pub jitter: i32,
    pub thickness: u32,
    /// RGB
    pub color: [u8; 3],
    pub marker_radius: i32,
}

impl Default for LightningConfig {
    fn default() -> Self {
        Self {
            segments: 10,
            jitter: 20,
            thickness: 2,
            color: [255, 0, 0],
            marker_radius: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Finger Lightning".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file path (or the default path).
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            config.validate()?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Reject values the drawing and detection code cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hands = &self.hands;
        check("hands.max_hands", (1..=MAX_HANDS).contains(&hands.max_hands), || {
            format!("must be between 1 and {}", MAX_HANDS)
        })?;
        for (field, value) in [
            ("hands.min_detection_confidence", hands.min_detection_confidence),
            ("hands.min_tracking_confidence", hands.min_tracking_confidence),
        ] {
            check(field, (0.0..=1.0).contains(&value), || {
                "must be between 0.0 and 1.0".to_string()
            })?;
        }

        let lightning = &self.lightning;
        check("lightning.segments", (1..=MAX_SEGMENTS).contains(&lightning.segments), || {
            format!("must be between 1 and {}", MAX_SEGMENTS)
        })?;
        check("lightning.jitter", (0..=MAX_JITTER).contains(&lightning.jitter), || {
            format!("must be between 0 and {}", MAX_JITTER)
        })?;
        check("lightning.thickness", (1..=MAX_THICKNESS).contains(&lightning.thickness), || {
            format!("must be between 1 and {}", MAX_THICKNESS)
        })?;
        check(
            "lightning.marker_radius",
            (0..=MAX_MARKER_RADIUS).contains(&lightning.marker_radius),
            || format!("must be between 0 and {}", MAX_MARKER_RADIUS),
        )?;

        let camera = &self.camera;
        check("camera.width", camera.width > 0, || "must be positive".to_string())?;
        check("camera.height", camera.height > 0, || "must be positive".to_string())?;
        check("camera.fps", camera.fps > 0, || "must be positive".to_string())?;
        Ok(())
    }

    /// Render as TOML, for `config show` and `config init`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.camera.device,
            resolution: Resolution {
                width: self.camera.width,
                height: self.camera.height,
            },
            fps: self.camera.fps,
        }
    }

    pub fn hand_config(&self) -> HandConfig {
        HandConfig {
            fingertips: FINGERTIPS.to_vec(),
            max_hands: self.hands.max_hands,
            min_detection_confidence: self.hands.min_detection_confidence,
            min_tracking_confidence: self.hands.min_tracking_confidence,
            ..HandConfig::default()
        }
    }

    pub fn bolt_style(&self) -> BoltStyle {
        BoltStyle {
            color: Rgb::from(self.lightning.color),
            segments: self.lightning.segments,
            jitter: self.lightning.jitter,
            thickness: self.lightning.thickness,
        }
    }

    pub fn compositor(&self) -> Compositor {
        Compositor::new(self.hand_config(), self.bolt_style())
            .with_marker(Rgb::from(self.lightning.color), self.lightning.marker_radius)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid config value '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::Invalid { .. } => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("finger-lightning").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/finger-lightning/config.toml")
        })
}
