use glam::{Vec2, vec2};

use crate::world::angle::Angle;

/// First-person view-point in world space.
///
/// Only heading is simulated; the renderer projects walls as full-height
/// columns, so there is no pitch and no eye height.
#[derive(Clone, Copy, Debug)]
pub struct Observer {
    pub pos: Vec2,
    pub yaw: Angle,
}

impl Observer {
    pub fn new(pos: Vec2, yaw: Angle) -> Self {
        Self { pos, yaw }
    }

    /// Unit vector pointing where the observer looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        self.yaw.unit_vec()
    }

    /// Unit vector pointing to the observer's right.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        let f = self.forward();
        vec2(f.y, -f.x)
    }

    /// Move by `forward` units along the view direction and `side` units
    /// of strafe.
    pub fn step(&mut self, forward: f32, side: f32) {
        let f = self.forward();
        let r = self.right();
        self.pos += f * forward + r * side;
    }

    /// Rotate the heading (positive = turn left).
    pub fn turn(&mut self, delta_deg: f32) {
        self.yaw = self.yaw + delta_deg;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_right_are_orthonormal() {
        let obs = Observer::new(Vec2::ZERO, Angle::new(17.0));
        let f = obs.forward();
        let r = obs.right();
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
    }

    #[test]
    fn step_moves_along_heading() {
        let mut obs = Observer::new(Vec2::ZERO, Angle::new(90.0));
        obs.step(10.0, 0.0);
        assert!((obs.pos - vec2(0.0, 10.0)).length() < 1e-4);
        obs.step(0.0, 2.0); // strafe right while facing north = move east
        assert!((obs.pos - vec2(2.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn turn_wraps() {
        let mut obs = Observer::new(Vec2::ZERO, Angle::new(350.0));
        obs.turn(20.0);
        assert!((obs.yaw.deg() - 10.0).abs() < 1e-4);
    }
}
