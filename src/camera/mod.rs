//! Camera capture module for webcam access and frame capture.
//!
//! - Device enumeration via [`list_devices`]
//! - Blocking capture via [`CameraCapture`], behind the [`FrameSource`] trait
//! - Frame helpers: mirroring and display packing

mod capture;
mod device;
mod frame_utils;
mod types;

pub use capture::CameraCapture;
pub use device::list_devices;
pub use frame_utils::{mirror_horizontal, to_display_buffer};
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, Resolution};

/// Anything that hands out frames one at a time.
///
/// A failed read is final: the event loop stops on the first error.
pub trait FrameSource {
    /// Whether the device is still open.
    fn is_open(&self) -> bool;

    /// Block until the next frame is available.
    fn read_frame(&mut self) -> Result<Frame, CameraError>;

    /// Close the device. Calling it again is a no-op.
    fn release(&mut self);
}
