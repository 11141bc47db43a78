//! MediaPipe Hands running in a helper Python process.
//!
//! Wire format, one round trip per frame:
//! - request: `width`, `height`, `channels` as little-endian `u32`, then the
//!   raw RGB bytes
//! - response: one JSON line, `{"hands": [...], "error": null}`
//!
//! The helper prints `READY` once the model is loaded.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::Deserialize;

use super::landmarks::{HandLandmarks, Landmark, LANDMARK_COUNT};
use super::{DetectorError, HandConfig, HandDetector};
use crate::camera::Frame;

/// Helper script, passed to the interpreter with `-c`.
const HELPER_SCRIPT: &str = include_str!("hand_detect.py");

/// How long to wait for the helper to exit after its stdin closes.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    #[serde(default)]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResponse {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode one response line into at most `max_hands` hands.
///
/// Hands without exactly 21 landmarks are dropped with a warning.
pub fn parse_response(line: &str, max_hands: usize) -> Result<Vec<HandLandmarks>, DetectorError> {
    let response: DetectionResponse = serde_json::from_str(line.trim())?;
    if let Some(error) = response.error {
        return Err(DetectorError::Reported(error));
    }

    let mut hands = Vec::with_capacity(response.hands.len().min(max_hands));
    for hand in response.hands {
        if hands.len() == max_hands {
            break;
        }
        if hand.landmarks.len() != LANDMARK_COUNT {
            log::warn!(
                "Expected {} landmarks, got {}",
                LANDMARK_COUNT,
                hand.landmarks.len()
            );
            continue;
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (slot, lm) in landmarks.iter_mut().zip(&hand.landmarks) {
            *slot = Landmark::new(lm.x, lm.y, lm.z);
        }
        hands.push(HandLandmarks {
            landmarks,
            handedness: hand.handedness,
            score: hand.score,
        });
    }
    Ok(hands)
}

/// Hand detector backed by a MediaPipe subprocess.
pub struct MediaPipeDetector {
    /// `None` once closed
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
    stderr_thread: Option<JoinHandle<()>>,
    max_hands: usize,
    response: String,
}

impl std::fmt::Debug for MediaPipeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPipeDetector")
            .field("pid", &self.child.as_ref().map(Child::id))
            .field("max_hands", &self.max_hands)
            .finish_non_exhaustive()
    }
}

impl MediaPipeDetector {
    /// Start the helper with `python` and wait for it to load the model.
    pub fn spawn(python: &str, config: &HandConfig) -> Result<Self, DetectorError> {
        log::info!("Starting MediaPipe hand detector ({})...", python);

        let mut child = Command::new(python)
            .arg("-c")
            .arg(HELPER_SCRIPT)
            .arg("--max-hands")
            .arg(config.max_hands.to_string())
            .arg("--min-detection-confidence")
            .arg(config.min_detection_confidence.to_string())
            .arg("--min-tracking-confidence")
            .arg(config.min_tracking_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DetectorError::SpawnFailed {
                program: python.to_string(),
                source,
            })?;

        // Forward the helper's stderr (model download chatter, tracebacks) to the log
        let stderr_thread = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                for line in BufReader::new(stderr).lines() {
                    match line {
                        Ok(l) => log::debug!("[hand-detector] {}", l),
                        Err(_) => break,
                    }
                }
            })
        });

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().map(BufReader::new);

        let mut detector = Self {
            child: Some(child),
            stdin,
            stdout,
            stderr_thread,
            max_hands: config.max_hands,
            response: String::new(),
        };

        let ready = detector.read_line()?;
        if ready.trim() != "READY" {
            detector.close();
            return Err(DetectorError::NotReady(ready.trim().to_string()));
        }

        log::info!("MediaPipe hand detector ready");
        Ok(detector)
    }

    fn read_line(&mut self) -> Result<String, DetectorError> {
        let reader = self.stdout.as_mut().ok_or(DetectorError::Closed)?;
        self.response.clear();
        if reader.read_line(&mut self.response)? == 0 {
            return Err(DetectorError::Closed);
        }
        Ok(self.response.clone())
    }
}

impl HandDetector for MediaPipeDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, DetectorError> {
        let stdin = self.stdin.as_mut().ok_or(DetectorError::Closed)?;
        stdin.write_all(&frame.width.to_le_bytes())?;
        stdin.write_all(&frame.height.to_le_bytes())?;
        stdin.write_all(&(Frame::CHANNELS as u32).to_le_bytes())?;
        stdin.write_all(&frame.data)?;
        stdin.flush()?;

        let line = self.read_line()?;
        let hands = parse_response(&line, self.max_hands)?;
        log::trace!("Detected {} hand(s)", hands.len());
        Ok(hands)
    }

    fn close(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        // EOF on stdin tells the helper to release the model and exit
        drop(self.stdin.take());
        self.stdout = None;

        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if start.elapsed() > SHUTDOWN_TIMEOUT => {
                    log::warn!("Hand detector did not exit, killing it");
                    let _ = child.kill();
                    let _ = child.wait();
                    break;
                }
                Ok(None) => thread::sleep(Duration::from_millis(20)),
                Err(e) => {
                    log::warn!("Failed to wait for hand detector: {}", e);
                    let _ = child.kill();
                    break;
                }
            }
        }

        if let Some(handle) = self.stderr_thread.take() {
            let _ = handle.join();
        }
        log::info!("Hand detector released");
    }
}

impl Drop for MediaPipeDetector {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_json(n: usize, x: f32) -> String {
        let lms: Vec<String> = (0..n)
            .map(|_| format!(r#"{{"x":{},"y":0.5,"z":0.0}}"#, x))
            .collect();
        format!(
            r#"{{"handedness":"Left","score":0.9,"landmarks":[{}]}}"#,
            lms.join(",")
        )
    }

    #[test]
    fn test_parse_no_hands() {
        let hands = parse_response(r#"{"hands":[]}"#, 2).unwrap();
        assert!(hands.is_empty());
    }

    #[test]
    fn test_parse_two_hands() {
        let line = format!(r#"{{"hands":[{},{}]}}"#, hand_json(21, 0.25), hand_json(21, 0.75));
        let hands = parse_response(&line, 2).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].handedness, "Left");
        assert!((hands[0].score - 0.9).abs() < 1e-6);
        assert_eq!(hands[0].landmarks[20].x, 0.25);
        assert_eq!(hands[1].landmarks[0].x, 0.75);
    }

    #[test]
    fn test_parse_caps_at_max_hands() {
        let line = format!(
            r#"{{"hands":[{},{},{}]}}"#,
            hand_json(21, 0.1),
            hand_json(21, 0.2),
            hand_json(21, 0.3)
        );
        let hands = parse_response(&line, 2).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[1].landmarks[0].x, 0.2);
    }

    #[test]
    fn test_parse_drops_incomplete_hand() {
        let line = format!(r#"{{"hands":[{},{}]}}"#, hand_json(5, 0.1), hand_json(21, 0.2));
        let hands = parse_response(&line, 2).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].landmarks[0].x, 0.2);
    }

    #[test]
    fn test_parse_reported_error() {
        let err = parse_response(r#"{"hands":[],"error":"bad shape"}"#, 2).unwrap_err();
        assert!(matches!(err, DetectorError::Reported(msg) if msg == "bad shape"));
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_response("not json", 2).unwrap_err();
        assert!(matches!(err, DetectorError::Malformed(_)));
    }

    #[test]
    fn test_spawn_missing_interpreter() {
        let err = MediaPipeDetector::spawn("definitely-not-a-python-xyz", &HandConfig::default())
            .unwrap_err();
        assert!(matches!(err, DetectorError::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_rejects_silent_helper() {
        // `true` ignores its arguments and exits without printing READY
        let err = MediaPipeDetector::spawn("true", &HandConfig::default()).unwrap_err();
        assert!(matches!(err, DetectorError::Closed));
    }
}
