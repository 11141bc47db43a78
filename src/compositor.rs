//! Per-frame annotation: skeleton overlay, fingertip markers and bolts.

use rand::Rng;

use crate::camera::Frame;
use crate::draw::{draw_line, fill_circle, Point, Rgb};
use crate::hands::{HandConfig, HandLandmarks, HAND_CONNECTIONS};
use crate::lightning::{draw_bolt, BoltStyle};

/// Look of the skeleton overlay drawn under the bolts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SkeletonStyle {
    bone_color: Rgb,
    bone_thickness: u32,
    joint_color: Rgb,
    joint_radius: i32,
}

impl Default for SkeletonStyle {
    fn default() -> Self {
        Self {
            bone_color: Rgb::LIGHT_GRAY,
            bone_thickness: 2,
            joint_color: Rgb::RED,
            joint_radius: 2,
        }
    }
}

/// Fingertip pixel positions of one hand, in configured fingertip order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FingertipSet {
    tips: Vec<(usize, Point)>,
}

impl FingertipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, landmark: usize, point: Point) {
        match self.tips.iter_mut().find(|(idx, _)| *idx == landmark) {
            Some(slot) => slot.1 = point,
            None => self.tips.push((landmark, point)),
        }
    }

    pub fn get(&self, landmark: usize) -> Option<Point> {
        self.tips
            .iter()
            .find(|(idx, _)| *idx == landmark)
            .map(|&(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.tips.iter().copied()
    }
}

impl FromIterator<(usize, Point)> for FingertipSet {
    fn from_iter<I: IntoIterator<Item = (usize, Point)>>(iter: I) -> Self {
        let mut set = FingertipSet::new();
        for (idx, p) in iter {
            set.insert(idx, p);
        }
        set
    }
}

/// A bolt between matching fingertips of the two hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossBolt {
    pub landmark: usize,
    pub from: Point,
    pub to: Point,
}

/// What one call to [`Compositor::composite`] drew.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeReport {
    /// One entry per hand, in detector order
    pub fingertips: Vec<FingertipSet>,
    /// Fingertip-to-wrist bolts drawn
    pub wrist_bolts: usize,
    /// Hand-to-hand bolts drawn (only ever with exactly two hands)
    pub cross_bolts: Vec<CrossBolt>,
}

/// Pairs of same-index fingertips across exactly two hands.
///
/// Any other hand count yields nothing; with three or more hands the
/// cross-hand step is skipped rather than picking two of them.
pub fn cross_hand_pairs(hands: &[FingertipSet], fingertips: &[usize]) -> Vec<CrossBolt> {
    let [first, second] = hands else {
        return Vec::new();
    };
    fingertips
        .iter()
        .filter_map(|&landmark| {
            Some(CrossBolt {
                landmark,
                from: first.get(landmark)?,
                to: second.get(landmark)?,
            })
        })
        .collect()
}

/// Draws the lightning effect for the hands found in one frame.
#[derive(Debug, Clone)]
pub struct Compositor {
    hands: HandConfig,
    bolt: BoltStyle,
    skeleton: SkeletonStyle,
    marker_color: Rgb,
    marker_radius: i32,
}

impl Compositor {
    pub fn new(hands: HandConfig, bolt: BoltStyle) -> Self {
        Self {
            hands,
            marker_color: bolt.color,
            bolt,
            skeleton: SkeletonStyle::default(),
            marker_radius: 10,
        }
    }

    pub fn with_marker(mut self, color: Rgb, radius: i32) -> Self {
        self.marker_color = color;
        self.marker_radius = radius;
        self
    }

    pub fn hand_config(&self) -> &HandConfig {
        &self.hands
    }

    /// Annotate `frame` in place for the detected `hands`.
    pub fn composite<R: Rng + ?Sized>(
        &self,
        frame: &mut Frame,
        hands: &[HandLandmarks],
        rng: &mut R,
    ) -> CompositeReport {
        let (width, height) = (frame.width, frame.height);
        let mut report = CompositeReport::default();

        for hand in hands {
            self.draw_skeleton(frame, hand);

            let Some(wrist) = hand.pixel(self.hands.wrist, width, height) else {
                log::warn!("Wrist landmark {} missing, skipping hand", self.hands.wrist);
                continue;
            };

            let mut tips = FingertipSet::new();
            for &idx in &self.hands.fingertips {
                let Some(tip) = hand.pixel(idx, width, height) else {
                    continue;
                };
                fill_circle(frame, tip, self.marker_radius, self.marker_color);
                draw_bolt(frame, tip, wrist, &self.bolt, rng);
                report.wrist_bolts += 1;
                tips.insert(idx, tip);
            }
            report.fingertips.push(tips);
        }

        report.cross_bolts = cross_hand_pairs(&report.fingertips, &self.hands.fingertips);
        for bolt in &report.cross_bolts {
            draw_bolt(frame, bolt.from, bolt.to, &self.bolt, rng);
        }

        report
    }

    fn draw_skeleton(&self, frame: &mut Frame, hand: &HandLandmarks) {
        let (width, height) = (frame.width, frame.height);
        for (a, b) in HAND_CONNECTIONS {
            if let (Some(pa), Some(pb)) = (hand.pixel(a, width, height), hand.pixel(b, width, height)) {
                draw_line(frame, pa, pb, self.skeleton.bone_color, self.skeleton.bone_thickness);
            }
        }
        for lm in &hand.landmarks {
            fill_circle(
                frame,
                lm.to_pixel(width, height),
                self.skeleton.joint_radius,
                self.skeleton.joint_color,
            );
        }
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(HandConfig::default(), BoltStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tips(points: &[(usize, (i32, i32))]) -> FingertipSet {
        points.iter().map(|&(i, p)| (i, Point::from(p))).collect()
    }

    #[test]
    fn test_fingertip_set_insert_replaces() {
        let mut set = FingertipSet::new();
        set.insert(4, Point::new(1, 1));
        set.insert(8, Point::new(2, 2));
        set.insert(4, Point::new(3, 3));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(4), Some(Point::new(3, 3)));
        assert_eq!(set.get(12), None);
    }

    #[test]
    fn test_cross_pairs_need_exactly_two_hands() {
        let one = tips(&[(4, (1, 1))]);
        assert!(cross_hand_pairs(&[], &[4]).is_empty());
        assert!(cross_hand_pairs(&[one.clone()], &[4]).is_empty());
        assert!(cross_hand_pairs(&[one.clone(), one.clone(), one.clone()], &[4]).is_empty());
        assert_eq!(cross_hand_pairs(&[one.clone(), one], &[4]).len(), 1);
    }

    #[test]
    fn test_cross_pairs_skip_missing_tip() {
        let a = tips(&[(4, (1, 1)), (8, (2, 2))]);
        let b = tips(&[(4, (5, 5))]);
        let pairs = cross_hand_pairs(&[a, b], &[4, 8]);
        assert_eq!(
            pairs,
            vec![CrossBolt {
                landmark: 4,
                from: Point::new(1, 1),
                to: Point::new(5, 5)
            }]
        );
    }

    #[test]
    fn test_default_marker_matches_bolt_color() {
        let c = Compositor::default();
        assert_eq!(c.marker_color, Rgb::RED);
        assert_eq!(c.marker_radius, 10);
    }
}
