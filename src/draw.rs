//! Raster primitives drawn straight into a [`Frame`].
//!
//! Everything clips silently at the frame edges, so callers never have to
//! bounds-check before drawing.

use crate::camera::Frame;

/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width-1] x [0, height-1]`.
    pub fn clamped(self, width: u32, height: u32) -> Self {
        Self {
            x: self.x.clamp(0, width.saturating_sub(1) as i32),
            y: self.y.clamp(0, height.saturating_sub(1) as i32),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// 8-bit colour in RGB order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const LIGHT_GRAY: Rgb = Rgb(224, 224, 224);
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb(r, g, b)
    }
}

/// Write one pixel, ignoring coordinates outside the frame.
pub fn set_pixel(frame: &mut Frame, x: i32, y: i32, color: Rgb) {
    let Some(i) = frame.offset(x, y) else {
        return;
    };
    let Rgb(r, g, b) = color;
    frame.data[i..i + Frame::CHANNELS].copy_from_slice(&[r, g, b]);
}

/// Filled disc centred on `center`. Radius 0 is a single pixel.
///
/// Only the part of the bounding box that overlaps the frame is visited, so
/// the cost is bounded by the frame size whatever the radius.
pub fn fill_circle(frame: &mut Frame, center: Point, radius: i32, color: Rgb) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    let r = i64::from(radius.max(0));
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let x0 = (cx - r).max(0);
    let x1 = (cx + r).min(i64::from(frame.width) - 1);
    let y0 = (cy - r).max(0);
    let y1 = (cy + r).min(i64::from(frame.height) - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                set_pixel(frame, x as i32, y as i32, color);
            }
        }
    }
}

/// Square brush `thickness` pixels on a side. Even sizes lean right and down
/// of `center`.
fn stamp(frame: &mut Frame, center: Point, thickness: u32, color: Rgb) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    let t = i64::from(thickness.max(1));
    let (lo, hi) = (-((t - 1) / 2), t / 2);
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));
    let x0 = (cx + lo).max(0);
    let x1 = (cx + hi).min(i64::from(frame.width) - 1);
    let y0 = (cy + lo).max(0);
    let y1 = (cy + hi).min(i64::from(frame.height) - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            set_pixel(frame, x as i32, y as i32, color);
        }
    }
}

/// Straight line of the given stroke thickness (Bresenham, stamping a
/// square brush per step). A horizontal or vertical line is exactly
/// `thickness` pixels wide. A zero-length line draws a single stamp.
pub fn draw_line(frame: &mut Frame, from: Point, to: Point, color: Rgb, thickness: u32) {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    loop {
        stamp(frame, Point::new(x, y), thickness, color);
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Consecutive line segments through `points`.
pub fn draw_polyline(frame: &mut Frame, points: &[Point], color: Rgb, thickness: u32) {
    for pair in points.windows(2) {
        draw_line(frame, pair[0], pair[1], color, thickness);
    }
}
