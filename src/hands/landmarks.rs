//! Hand landmark data in the MediaPipe 21-point convention.

use crate::draw::Point;

/// Number of landmarks in one hand skeleton.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices (MediaPipe hand landmark model).
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Thumb, index, middle, ring and pinky tips, in that order.
pub const FINGERTIPS: [usize; 5] = [
    index::THUMB_TIP,
    index::INDEX_FINGER_TIP,
    index::MIDDLE_FINGER_TIP,
    index::RING_FINGER_TIP,
    index::PINKY_TIP,
];

/// Bone list of the hand skeleton, as pairs of landmark indices.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // palm
    (0, 1),
    (0, 5),
    (9, 13),
    (13, 17),
    (5, 9),
    (0, 17),
    // thumb
    (1, 2),
    (2, 3),
    (3, 4),
    // index
    (5, 6),
    (6, 7),
    (7, 8),
    // middle
    (9, 10),
    (10, 11),
    (11, 12),
    // ring
    (13, 14),
    (14, 15),
    (15, 16),
    // pinky
    (17, 18),
    (18, 19),
    (19, 20),
];

/// One normalized landmark. `x`/`y` are fractions of the image size,
/// `z` is depth relative to the wrist.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Pixel position in a `width` x `height` image, truncated and clamped
    /// into the frame.
    pub fn to_pixel(&self, width: u32, height: u32) -> Point {
        let x = (self.x * width as f32) as i32;
        let y = (self.y * height as f32) as i32;
        Point::new(x, y).clamped(width, height)
    }
}

/// All 21 landmarks of one detected hand for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// "Left" or "Right" as reported by the detector
    pub handedness: String,
    /// Detector confidence (0.0 to 1.0)
    pub score: f32,
}

impl HandLandmarks {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self {
            landmarks,
            handedness: String::new(),
            score: 1.0,
        }
    }

    /// Landmark at `idx`, or `None` past the end of the skeleton.
    pub fn get(&self, idx: usize) -> Option<&Landmark> {
        self.landmarks.get(idx)
    }

    /// Pixel position of landmark `idx`.
    pub fn pixel(&self, idx: usize, width: u32, height: u32) -> Option<Point> {
        self.get(idx).map(|lm| lm.to_pixel(width, height))
    }
}
