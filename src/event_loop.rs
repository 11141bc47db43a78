//! The capture → detect → composite → display loop.
//!
//! One thread, one frame at a time. The loop is RUNNING until a frame read
//! fails, the user quits, the hand detector dies or the display goes away.
//! Then it is STOPPED and every resource is released exactly once.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;

use crate::camera::{mirror_horizontal, FrameSource};
use crate::compositor::Compositor;
use crate::display::{DisplaySink, UserInput};
use crate::hands::HandDetector;

/// Global flag for handling Ctrl+C
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Check if Ctrl+C has been received.
pub fn ctrlc_received() -> bool {
    CTRLC_RECEIVED.load(Ordering::SeqCst)
}

/// Set up the Ctrl+C handler.
///
/// This should be called once at program startup. The loop notices the
/// flag at the top of the next iteration and shuts down cleanly.
pub fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        CTRLC_RECEIVED.store(true, Ordering::SeqCst);
    })
}

/// Why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The capture device failed or ran out of frames
    CaptureFailed(String),
    /// The quit key was pressed
    QuitRequested,
    /// The display window was closed
    WindowClosed,
    /// The display could not show a frame
    DisplayFailed(String),
    /// The hand detector can no longer answer
    DetectorFailed(String),
    /// Ctrl+C
    Interrupted,
}

/// Loop state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped(StopReason),
}

/// Outcome of [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopSummary {
    pub reason: StopReason,
    /// Frames that made it to the display
    pub frames_shown: u64,
    /// Frames whose detection failed and were shown unannotated
    pub detection_failures: u64,
}

/// Per-loop behaviour switches.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Flip frames left-right before detection
    pub mirror: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self { mirror: true }
    }
}

/// Drive the pipeline until it stops, then release everything.
///
/// Takes ownership of nothing: the caller keeps the source, detector and
/// display, but after `run` returns all three have been released.
pub fn run<S, D, W, R>(
    source: &mut S,
    detector: &mut D,
    display: &mut W,
    compositor: &Compositor,
    options: LoopOptions,
    rng: &mut R,
) -> LoopSummary
where
    S: FrameSource + ?Sized,
    D: HandDetector + ?Sized,
    W: DisplaySink + ?Sized,
    R: Rng + ?Sized,
{
    let mut frames_shown = 0u64;
    let mut detection_failures = 0u64;

    let reason = loop {
        match step(
            source,
            detector,
            display,
            compositor,
            options,
            rng,
            &mut frames_shown,
            &mut detection_failures,
        ) {
            LoopState::Running => continue,
            LoopState::Stopped(reason) => break reason,
        }
    };
    log::info!("Stopping after {} frame(s): {:?}", frames_shown, reason);

    source.release();
    display.close();
    detector.close();

    LoopSummary {
        reason,
        frames_shown,
        detection_failures,
    }
}

#[allow(clippy::too_many_arguments)]
fn step<S, D, W, R>(
    source: &mut S,
    detector: &mut D,
    display: &mut W,
    compositor: &Compositor,
    options: LoopOptions,
    rng: &mut R,
    frames_shown: &mut u64,
    detection_failures: &mut u64,
) -> LoopState
where
    S: FrameSource + ?Sized,
    D: HandDetector + ?Sized,
    W: DisplaySink + ?Sized,
    R: Rng + ?Sized,
{
    if ctrlc_received() {
        return LoopState::Stopped(StopReason::Interrupted);
    }
    if !source.is_open() {
        return LoopState::Stopped(StopReason::CaptureFailed("device closed".to_string()));
    }

    let mut frame = match source.read_frame() {
        Ok(frame) => frame,
        Err(e) => {
            log::debug!("Frame read failed: {}", e);
            return LoopState::Stopped(StopReason::CaptureFailed(e.to_string()));
        }
    };

    if options.mirror {
        mirror_horizontal(&mut frame);
    }

    match detector.detect(&frame) {
        Ok(hands) => {
            let report = compositor.composite(&mut frame, &hands, rng);
            log::trace!(
                "{} hand(s), {} wrist bolt(s), {} cross bolt(s)",
                report.fingertips.len(),
                report.wrist_bolts,
                report.cross_bolts.len()
            );
        }
        Err(e) if e.is_fatal() => {
            log::error!("Hand detector is gone: {}", e);
            return LoopState::Stopped(StopReason::DetectorFailed(e.to_string()));
        }
        Err(e) => {
            *detection_failures += 1;
            log::warn!("Hand detection failed: {}", e);
        }
    }

    if let Err(e) = display.show(&frame) {
        return LoopState::Stopped(StopReason::DisplayFailed(e.to_string()));
    }
    *frames_shown += 1;

    match display.poll_input() {
        UserInput::Quit => LoopState::Stopped(StopReason::QuitRequested),
        UserInput::WindowClosed => LoopState::Stopped(StopReason::WindowClosed),
        UserInput::None => LoopState::Running,
    }
}
