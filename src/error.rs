//! Top-level error type for the binary and subcommands.

use std::path::PathBuf;

use crate::camera::CameraError;
use crate::config::ConfigError;
use crate::hands::DetectorError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Detector(#[from] DetectorError),

    #[error("Config file already exists: {0}")]
    ConfigExists(PathBuf),

    #[error("Failed to render config: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
