//! On-screen output of annotated frames.

use std::time::Duration;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::camera::{to_display_buffer, Frame};

/// Errors from the display window.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to open window: {0}")]
    OpenFailed(String),

    #[error("Failed to update window: {0}")]
    UpdateFailed(String),

    #[error("Window already closed")]
    Closed,
}

/// What the user did since the last frame was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput {
    /// Nothing that stops the loop
    None,
    /// The quit key (`q`) was pressed
    Quit,
    /// The window was closed
    WindowClosed,
}

/// Anything that can show a frame and report key presses.
pub trait DisplaySink {
    /// Render `frame`. Blocks for at most one refresh interval.
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Check for the quit key or a closed window.
    fn poll_input(&mut self) -> UserInput;

    /// Close the window. Calling it again is a no-op.
    fn close(&mut self);
}

/// A single titled framebuffer window.
///
/// The window is created lazily on the first frame so it can take the
/// frame's size.
pub struct WindowDisplay {
    title: String,
    window: Option<Window>,
    buffer: Vec<u32>,
    closed: bool,
    refresh: Duration,
}

impl std::fmt::Debug for WindowDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowDisplay")
            .field("title", &self.title)
            .field("open", &self.window.is_some())
            .finish_non_exhaustive()
    }
}

impl WindowDisplay {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
            buffer: Vec::new(),
            closed: false,
            refresh: Duration::from_millis(1),
        }
    }

    fn window_for(&mut self, width: usize, height: usize) -> Result<&mut Window, DisplayError> {
        let recreate = match &self.window {
            Some(w) => w.get_size() != (width, height),
            None => true,
        };
        if recreate {
            let mut window = Window::new(
                &self.title,
                width,
                height,
                WindowOptions {
                    resize: false,
                    ..WindowOptions::default()
                },
            )
            .map_err(|e| DisplayError::OpenFailed(e.to_string()))?;
            window.limit_update_rate(Some(self.refresh));
            log::info!("Opened window '{}' ({}x{})", self.title, width, height);
            self.window = Some(window);
        }
        self.window.as_mut().ok_or(DisplayError::Closed)
    }
}

impl DisplaySink for WindowDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if self.closed {
            return Err(DisplayError::Closed);
        }
        let (width, height) = (frame.width as usize, frame.height as usize);

        let mut buffer = std::mem::take(&mut self.buffer);
        to_display_buffer(frame, &mut buffer);
        let result = self
            .window_for(width, height)
            .and_then(|window| {
                window
                    .update_with_buffer(&buffer, width, height)
                    .map_err(|e| DisplayError::UpdateFailed(e.to_string()))
            });
        self.buffer = buffer;
        result
    }

    fn poll_input(&mut self) -> UserInput {
        let Some(window) = &self.window else {
            return UserInput::None;
        };
        if !window.is_open() {
            return UserInput::WindowClosed;
        }
        if window.is_key_pressed(Key::Q, KeyRepeat::No) {
            return UserInput::Quit;
        }
        UserInput::None
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.window.take().is_some() {
            log::info!("Closed window '{}'", self.title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_before_first_frame_is_none() {
        let mut display = WindowDisplay::new("test");
        assert_eq!(display.poll_input(), UserInput::None);
    }

    #[test]
    fn test_show_after_close_fails() {
        let mut display = WindowDisplay::new("test");
        display.close();
        display.close();
        let err = display.show(&Frame::blank(2, 2)).unwrap_err();
        assert!(matches!(err, DisplayError::Closed));
    }
}
