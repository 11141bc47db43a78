//! finger-lightning library crate.
//!
//! Per frame: capture from the webcam, detect hand landmarks, draw
//! jittered "lightning" from every fingertip to its wrist (and between
//! matching fingertips when two hands are visible), show the result.
//!
//! The webcam, the landmark model and the window sit behind the
//! [`camera::FrameSource`], [`hands::HandDetector`] and
//! [`display::DisplaySink`] traits so the loop can run against fakes.

pub mod camera;
pub mod cli;
pub mod compositor;
pub mod config;
pub mod display;
pub mod draw;
pub mod error;
pub mod event_loop;
pub mod hands;
pub mod lightning;
