//! Angle-space clipping of wall endpoints against the viewing cone.
//!
//! Works entirely in world/observer angles; the tangent projection to
//! screen columns lives in [`crate::engine::projection`].

use glam::Vec2;

use crate::world::{Angle, Observer};

/// Clips a pair of wall endpoints to the observer's field of view.
///
/// The cone is `fov` degrees wide, symmetric about the observer's heading.
#[derive(Clone, Copy, Debug)]
pub struct FovClipper {
    fov: Angle,
    half_fov: Angle,
}

impl FovClipper {
    pub fn new(fov: Angle) -> Self {
        Self {
            fov,
            half_fov: fov * 0.5,
        }
    }

    #[inline]
    pub fn fov(&self) -> Angle {
        self.fov
    }

    /// World angle from the observer to `v`.
    pub fn angle_to_vertex(observer: &Observer, v: Vec2) -> Angle {
        Angle::between(observer.pos, v)
    }

    /// Clip the wall `v1 → v2` to the cone.
    ///
    /// Returns the two clipped angles shifted by `+fov` into the
    /// forward-biased range the column projection expects, or `None` when
    /// the wall contributes nothing this frame:
    /// * its angular span opens away from the observer (back-facing or
    ///   wrapping behind), or
    /// * it lies entirely outside one cone edge.
    pub fn clip_vertices(&self, observer: &Observer, v1: Vec2, v2: Vec2) -> Option<(Angle, Angle)> {
        let v1_angle = Self::angle_to_vertex(observer, v1);
        let v2_angle = Self::angle_to_vertex(observer, v2);

        // Walls are wound v1 → v2 clockwise as seen from their front, so a
        // span this wide means we are looking at the back side.
        let span = v1_angle - v2_angle;
        if span >= self.fov * 2.0 {
            return None;
        }

        // Rotate into observer space: heading becomes 0°.
        let mut a1 = v1_angle - observer.yaw;
        let mut a2 = v2_angle - observer.yaw;

        // v1 against the left cone edge.  Shifting by half the fov turns
        // the edge test into a single `> fov` comparison with no negative
        // angles involved.
        let moved = a1 + self.half_fov;
        if moved > self.fov {
            // is the part beyond the edge the entire wall?
            if moved - self.fov >= span {
                return None;
            }
            a1 = self.half_fov;
        }

        // v2 against the right cone edge, mirrored.
        let moved = self.half_fov - a2;
        if moved > self.fov {
            a2 = -self.half_fov;
        }

        Some((a1 + self.fov, a2 + self.fov))
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn clipper() -> FovClipper {
        FovClipper::new(Angle::new(90.0))
    }

    fn observer() -> Observer {
        Observer::new(Vec2::ZERO, Angle::new(0.0))
    }

    #[test]
    fn wall_inside_cone_is_unclipped() {
        // endpoints at ±26.57°, comfortably inside a 90° cone
        let got = clipper()
            .clip_vertices(&observer(), vec2(10.0, 5.0), vec2(10.0, -5.0))
            .unwrap();
        assert!((got.0.deg() - (90.0 + 26.565)).abs() < 0.01);
        assert!((got.1.deg() - (90.0 - 26.565)).abs() < 0.01);
    }

    #[test]
    fn back_facing_wall_is_rejected() {
        // same wall seen from behind: v1/v2 swap winding
        let got = clipper().clip_vertices(&observer(), vec2(-10.0, 5.0), vec2(-10.0, -5.0));
        assert!(got.is_none());
    }

    #[test]
    fn wall_fully_outside_left_edge_is_rejected() {
        // both endpoints far to the left of the cone
        let got = clipper().clip_vertices(&observer(), vec2(-5.0, 10.0), vec2(5.0, 10.0));
        assert!(got.is_none());
    }

    #[test]
    fn wall_crossing_left_edge_clips_v1() {
        // v1 at 87° (outside), v2 at −26.57° (inside)
        let got = clipper()
            .clip_vertices(&observer(), vec2(1.0, 19.0), vec2(10.0, -5.0))
            .unwrap();
        assert!((got.0.deg() - 135.0).abs() < 0.01); // pinned to the left edge
        assert!((got.1.deg() - (90.0 - 26.565)).abs() < 0.01);
    }

    #[test]
    fn wall_crossing_right_edge_clips_v2() {
        let got = clipper()
            .clip_vertices(&observer(), vec2(10.0, 5.0), vec2(1.0, -19.0))
            .unwrap();
        assert!((got.0.deg() - (90.0 + 26.565)).abs() < 0.01);
        assert!((got.1.deg() - 45.0).abs() < 0.01); // pinned to the right edge
    }

    #[test]
    fn wall_spanning_whole_cone_clips_both() {
        let got = clipper()
            .clip_vertices(&observer(), vec2(1.0, 50.0), vec2(1.0, -50.0))
            .unwrap();
        assert!((got.0.deg() - 135.0).abs() < 0.01);
        assert!((got.1.deg() - 45.0).abs() < 0.01);
    }

    #[test]
    fn rotated_observer_sees_the_same_relative_wall() {
        let obs = Observer::new(Vec2::ZERO, Angle::new(90.0));
        let got = clipper()
            .clip_vertices(&obs, vec2(-5.0, 10.0), vec2(5.0, 10.0))
            .unwrap();
        assert!((got.0.deg() - (90.0 + 26.565)).abs() < 0.01);
        assert!((got.1.deg() - (90.0 - 26.565)).abs() < 0.01);
    }
}
