//! Camera types and data structures.

use std::fmt;

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Camera resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// 640x480, what most webcams deliver at 30 fps without complaint.
    pub const VGA: Resolution = Resolution {
        width: 640,
        height: 480,
    };
}

impl Default for Resolution {
    fn default() -> Self {
        Self::VGA
    }
}

/// A captured camera frame, interleaved RGB.
///
/// Lives for exactly one loop iteration: captured, annotated in place,
/// shown, dropped.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data, `width * height * 3` bytes
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl Frame {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 3;

    /// Create a black frame of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * Self::CHANNELS],
            width,
            height,
        }
    }

    /// Byte offset of pixel `(x, y)`, or `None` when outside the frame.
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * Self::CHANNELS)
    }

    /// Read pixel `(x, y)` as an `(r, g, b)` triple.
    pub fn rgb_at(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        let i = self.offset(x, y)?;
        let px = &self.data[i..i + Self::CHANNELS];
        Some((px[0], px[1], px[2]))
    }
}

/// Settings for camera capture.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Camera device index
    pub device_index: u32,
    /// Capture resolution
    pub resolution: Resolution,
    /// Target FPS (actual may vary)
    pub fps: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            resolution: Resolution::default(),
            fps: 30,
        }
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug)]
pub enum CameraError {
    /// Failed to query camera devices
    QueryFailed(String),
    /// Failed to open camera
    OpenFailed(String),
    /// Camera permission denied (macOS/iOS)
    PermissionDenied,
    /// Camera device not found at specified index
    DeviceNotFound(u32),
    /// Failed to start video stream
    StreamFailed(String),
    /// Reading or decoding a frame failed
    ReadFailed(String),
    /// The device was already released
    Released,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::QueryFailed(msg) => write!(f, "Failed to query cameras: {}", msg),
            CameraError::OpenFailed(msg) => write!(f, "Failed to open camera: {}", msg),
            CameraError::PermissionDenied => {
                write!(
                    f,
                    "Camera permission denied. On macOS, grant access in System Settings > Privacy & Security > Camera"
                )
            }
            CameraError::DeviceNotFound(index) => {
                write!(
                    f,
                    "Camera device {} not found. Run 'list-cameras' to see available devices",
                    index
                )
            }
            CameraError::StreamFailed(msg) => write!(f, "Failed to start camera stream: {}", msg),
            CameraError::ReadFailed(msg) => write!(f, "Failed to read camera frame: {}", msg),
            CameraError::Released => write!(f, "Camera already released"),
        }
    }
}

impl std::error::Error for CameraError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_info_display() {
        let info = CameraInfo {
            index: 0,
            name: "FaceTime HD".to_string(),
            description: "Built-in".to_string(),
        };
        assert_eq!(format!("{}", info), "[0] FaceTime HD (Built-in)");
    }

    #[test]
    fn test_camera_settings_default() {
        let settings = CameraSettings::default();
        assert_eq!(settings.device_index, 0);
        assert_eq!(settings.resolution, Resolution::VGA);
        assert_eq!(settings.fps, 30);
    }

    #[test]
    fn test_camera_error_display() {
        assert_eq!(
            format!("{}", CameraError::OpenFailed("busy".to_string())),
            "Failed to open camera: busy"
        );
        assert_eq!(
            format!("{}", CameraError::ReadFailed("eof".to_string())),
            "Failed to read camera frame: eof"
        );
        assert!(format!("{}", CameraError::PermissionDenied).contains("permission denied"));
        assert!(format!("{}", CameraError::DeviceNotFound(5)).contains("5"));
    }

    #[test]
    fn test_blank_frame_size() {
        let frame = Frame::blank(4, 3);
        assert_eq!(frame.data.len(), 4 * 3 * Frame::CHANNELS);
        assert_eq!(frame.rgb_at(3, 2), Some((0, 0, 0)));
    }

    #[test]
    fn test_offset_rejects_out_of_bounds() {
        let frame = Frame::blank(4, 3);
        assert_eq!(frame.offset(0, 0), Some(0));
        assert_eq!(frame.offset(1, 1), Some(15));
        assert_eq!(frame.offset(-1, 0), None);
        assert_eq!(frame.offset(4, 0), None);
        assert_eq!(frame.offset(0, 3), None);
    }

    #[test]
    fn test_rgb_at_reads_channels_in_order() {
        let mut frame = Frame::blank(2, 1);
        frame.data = vec![0, 0, 0, 10, 20, 30];
        assert_eq!(frame.rgb_at(1, 0), Some((10, 20, 30)));
        assert_eq!(frame.rgb_at(2, 0), None);
    }
}
