//! Hand landmark detection.
//!
//! Detection itself is delegated to an external model; this module defines
//! the data it produces ([`HandLandmarks`]), the [`HandDetector`] seam the
//! event loop talks to, and a MediaPipe-backed implementation.

mod landmarks;
mod mediapipe;

pub use landmarks::{
    index, HandLandmarks, Landmark, FINGERTIPS, HAND_CONNECTIONS, LANDMARK_COUNT,
};
pub use mediapipe::{parse_response, MediaPipeDetector};

use crate::camera::Frame;

/// Which landmarks matter and how the detector is tuned.
#[derive(Debug, Clone, PartialEq)]
pub struct HandConfig {
    /// Landmark indices treated as fingertips, in drawing order
    pub fingertips: Vec<usize>,
    /// Landmark index of the wrist
    pub wrist: usize,
    /// Upper bound on hands reported per frame
    pub max_hands: usize,
    /// Confidence needed to start tracking a new hand
    pub min_detection_confidence: f32,
    /// Confidence needed to keep tracking a hand across frames
    pub min_tracking_confidence: f32,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            fingertips: FINGERTIPS.to_vec(),
            wrist: index::WRIST,
            max_hands: 2,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Errors from a hand detector.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("Failed to start hand detector '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Hand detector did not signal ready, got: {0:?}")]
    NotReady(String),

    #[error("Hand detector closed its output")]
    Closed,

    #[error("Hand detector I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed detector response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Hand detector reported: {0}")]
    Reported(String),
}

impl DetectorError {
    /// Whether the detector is unusable from now on.
    ///
    /// A bad response or a model error spoils one frame; a dead helper
    /// process or a broken pipe spoils every frame after it.
    pub fn is_fatal(&self) -> bool {
        match self {
            DetectorError::SpawnFailed { .. }
            | DetectorError::NotReady(_)
            | DetectorError::Closed
            | DetectorError::Io(_) => true,
            DetectorError::Malformed(_) | DetectorError::Reported(_) => false,
        }
    }
}

/// Given an image, return zero or more hands' landmark sets.
pub trait HandDetector {
    /// Detect hands in an RGB frame. At most the configured maximum number
    /// of hands is returned; no hands is an empty vector, not an error.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, DetectorError>;

    /// Release the model's resources. Calling it again is a no-op.
    fn close(&mut self);
}
