//! Jittered polyline ("bolt") generation.
//!
//! A bolt is the straight line between two points cut into `segments`
//! pieces, with every interior vertex pushed by an independent uniform
//! offset in `[-jitter, jitter]` on each axis and then clamped into the
//! frame. The endpoints are never moved.

use rand::Rng;

use crate::camera::Frame;
use crate::draw::{draw_polyline, Point, Rgb};

/// How a bolt looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltStyle {
    pub color: Rgb,
    /// Number of straight pieces between start and end
    pub segments: u32,
    /// Maximum per-axis displacement of an interior vertex, in pixels
    pub jitter: i32,
    /// Stroke width in pixels
    pub thickness: u32,
}

impl Default for BoltStyle {
    fn default() -> Self {
        Self {
            color: Rgb::RED,
            segments: 10,
            jitter: 20,
            thickness: 2,
        }
    }
}

/// Vertices of a bolt from `start` to `end` inside a `width` x `height` frame.
///
/// Returns `segments + 1` points, first `start`, last `end`. With
/// `segments <= 1` there are no interior points and the result is just the
/// two endpoints.
pub fn bolt_path<R: Rng + ?Sized>(
    start: Point,
    end: Point,
    segments: u32,
    jitter: i32,
    width: u32,
    height: u32,
    rng: &mut R,
) -> Vec<Point> {
    let segments = segments.max(1);
    let jitter = jitter.saturating_abs();
    let mut points = Vec::with_capacity(segments as usize + 1);
    points.push(start);

    let dx = f64::from(end.x - start.x) / f64::from(segments);
    let dy = f64::from(end.y - start.y) / f64::from(segments);

    for i in 1..segments {
        let t = f64::from(i);
        let x = f64::from(start.x) + dx * t + f64::from(rng.gen_range(-jitter..=jitter));
        let y = f64::from(start.y) + dy * t + f64::from(rng.gen_range(-jitter..=jitter));
        points.push(Point::new(x as i32, y as i32).clamped(width, height));
    }

    points.push(end);
    points
}

/// Generate a bolt and draw it onto `frame`.
pub fn draw_bolt<R: Rng + ?Sized>(
    frame: &mut Frame,
    start: Point,
    end: Point,
    style: &BoltStyle,
    rng: &mut R,
) {
    let path = bolt_path(
        start,
        end,
        style.segments,
        style.jitter,
        frame.width,
        frame.height,
        rng,
    );
    draw_polyline(frame, &path, style.color, style.thickness);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_style() {
        let style = BoltStyle::default();
        assert_eq!(style.segments, 10);
        assert_eq!(style.jitter, 20);
        assert_eq!(style.thickness, 2);
        assert_eq!(style.color, Rgb::RED);
    }

    #[test]
    fn test_zero_jitter_is_straight_interpolation() {
        let mut rng = StdRng::seed_from_u64(1);
        let path = bolt_path(
            Point::new(0, 0),
            Point::new(100, 50),
            10,
            0,
            640,
            480,
            &mut rng,
        );
        let expected: Vec<Point> = (0..=10).map(|i| Point::new(i * 10, i * 5)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn test_truncates_fractional_steps() {
        let mut rng = StdRng::seed_from_u64(1);
        // dx = 10/3: 3.33 -> 3, 6.67 -> 6
        let path = bolt_path(Point::new(0, 0), Point::new(10, 0), 3, 0, 640, 480, &mut rng);
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(3, 0),
                Point::new(6, 0),
                Point::new(10, 0)
            ]
        );
    }

    #[test]
    fn test_zero_segments_behaves_like_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let path = bolt_path(Point::new(1, 2), Point::new(3, 4), 0, 20, 640, 480, &mut rng);
        assert_eq!(path, vec![Point::new(1, 2), Point::new(3, 4)]);
    }

    #[test]
    fn test_same_seed_same_bolt() {
        let a = bolt_path(
            Point::new(50, 50),
            Point::new(300, 200),
            10,
            20,
            640,
            480,
            &mut StdRng::seed_from_u64(42),
        );
        let b = bolt_path(
            Point::new(50, 50),
            Point::new(300, 200),
            10,
            20,
            640,
            480,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_jitter_stays_within_magnitude() {
        let mut rng = StdRng::seed_from_u64(9);
        let start = Point::new(100, 100);
        let end = Point::new(200, 300);
        for _ in 0..50 {
            let path = bolt_path(start, end, 10, 20, 640, 480, &mut rng);
            for (i, p) in path.iter().enumerate().skip(1).take(9) {
                let ix = 100 + 10 * i as i32;
                let iy = 100 + 20 * i as i32;
                assert!((p.x - ix).abs() <= 20, "x jitter too large: {:?}", p);
                assert!((p.y - iy).abs() <= 20, "y jitter too large: {:?}", p);
            }
        }
    }

    #[test]
    fn test_extreme_jitter_does_not_overflow() {
        let mut rng = StdRng::seed_from_u64(4);
        for jitter in [i32::MIN, i32::MAX] {
            let path = bolt_path(Point::new(1, 1), Point::new(30, 30), 5, jitter, 32, 32, &mut rng);
            assert_eq!(path.len(), 6);
            assert!(path.iter().all(|p| (0..32).contains(&p.x) && (0..32).contains(&p.y)));
        }
    }

    #[test]
    fn test_draw_bolt_marks_endpoints() {
        let mut frame = Frame::blank(64, 64);
        let style = BoltStyle {
            thickness: 1,
            ..BoltStyle::default()
        };
        draw_bolt(
            &mut frame,
            Point::new(5, 5),
            Point::new(60, 60),
            &style,
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(frame.rgb_at(5, 5), Some((255, 0, 0)));
        assert_eq!(frame.rgb_at(60, 60), Some((255, 0, 0)));
    }
}
