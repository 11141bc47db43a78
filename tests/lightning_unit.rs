//! Unit tests for bolt path generation.
//!
//! Paths are generated with a seeded RNG so failures reproduce.

use finger_lightning::camera::Frame;
use finger_lightning::draw::Point;
use finger_lightning::lightning::{bolt_path, draw_bolt, BoltStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

const W: u32 = 640;
const H: u32 = 480;

// ==================== Shape ====================

#[test]
fn test_path_keeps_endpoints_and_length() {
    let mut rng = StdRng::seed_from_u64(7);
    let cases = [
        (Point::new(10, 10), Point::new(600, 400), 10),
        (Point::new(320, 0), Point::new(0, 479), 3),
        (Point::new(639, 479), Point::new(1, 1), 25),
        (Point::new(100, 200), Point::new(101, 201), 2),
    ];

    for (start, end, segments) in cases {
        let path = bolt_path(start, end, segments, 20, W, H, &mut rng);
        assert_eq!(path.len(), segments as usize + 1);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
    }
}

#[test]
fn test_single_segment_is_straight_line() {
    let mut rng = StdRng::seed_from_u64(7);
    let start = Point::new(12, 34);
    let end = Point::new(560, 78);
    let path = bolt_path(start, end, 1, 20, W, H, &mut rng);
    assert_eq!(path, vec![start, end]);
}

#[test]
fn test_same_start_and_end_is_degenerate() {
    let mut rng = StdRng::seed_from_u64(7);
    let p = Point::new(200, 200);
    let path = bolt_path(p, p, 10, 20, W, H, &mut rng);
    assert_eq!(path.len(), 11);
    for v in &path {
        assert!((v.x - p.x).abs() <= 20 && (v.y - p.y).abs() <= 20);
    }

    // And drawing it must not panic
    let mut frame = Frame::blank(W, H);
    draw_bolt(&mut frame, p, p, &BoltStyle::default(), &mut rng);
    assert_eq!(frame.rgb_at(200, 200), Some((255, 0, 0)));
}

// ==================== Clamping ====================

#[test]
fn test_interior_vertices_stay_inside_frame() {
    let mut rng = StdRng::seed_from_u64(11);
    // Bolts hugging the border, where jitter would otherwise push outside
    let edges = [
        (Point::new(0, 0), Point::new(W as i32 - 1, 0)),
        (Point::new(0, 0), Point::new(0, H as i32 - 1)),
        (Point::new(W as i32 - 1, H as i32 - 1), Point::new(0, H as i32 - 1)),
        (Point::new(W as i32 - 1, 0), Point::new(W as i32 - 1, H as i32 - 1)),
    ];

    for _ in 0..25 {
        for (start, end) in edges {
            let path = bolt_path(start, end, 10, 20, W, H, &mut rng);
            for v in &path[1..path.len() - 1] {
                assert!((0..W as i32).contains(&v.x), "x out of frame: {:?}", v);
                assert!((0..H as i32).contains(&v.y), "y out of frame: {:?}", v);
            }
        }
    }
}

#[test]
fn test_huge_jitter_is_clamped() {
    let mut rng = StdRng::seed_from_u64(5);
    let path = bolt_path(Point::new(5, 5), Point::new(10, 10), 10, 10_000, 16, 16, &mut rng);
    for v in &path {
        assert!((0..16).contains(&v.x) && (0..16).contains(&v.y), "{:?}", v);
    }
}

#[test]
fn test_one_pixel_frame_collapses_interior() {
    let mut rng = StdRng::seed_from_u64(5);
    let path = bolt_path(Point::new(0, 0), Point::new(0, 0), 10, 20, 1, 1, &mut rng);
    assert!(path.iter().all(|&v| v == Point::new(0, 0)));
}

// ==================== Randomness ====================

#[test]
fn test_different_seeds_give_different_bolts() {
    let start = Point::new(50, 50);
    let end = Point::new(550, 400);
    let a = bolt_path(start, end, 10, 20, W, H, &mut StdRng::seed_from_u64(1));
    let b = bolt_path(start, end, 10, 20, W, H, &mut StdRng::seed_from_u64(2));
    assert_ne!(a, b);
}
