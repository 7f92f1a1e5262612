use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use glam::{Vec2, vec2};

/// World angle in degrees, kept normalized to `[0, 360)`.
///
/// Every constructor and arithmetic operator re-normalizes with
/// `rem_euclid`, so a value read back out of an `Angle` is always in
/// range.  Comparisons are plain comparisons of the normalized degree
/// value, which is exactly what the FOV clipper relies on after each rotate /
/// shift step.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f32);

impl Angle {
    pub fn new(deg: f32) -> Self {
        Self(deg.rem_euclid(360.0))
    }

    #[inline]
    pub fn deg(self) -> f32 {
        self.0
    }

    pub fn from_radians(rad: f32) -> Self {
        Self::new(rad.to_degrees())
    }

    #[inline]
    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Angle of the ray `from → to` in world space.
    pub fn between(from: Vec2, to: Vec2) -> Self {
        let d = to - from;
        Self::from_radians(d.y.atan2(d.x))
    }

    /// Unit direction vector (0° = +X, counter-clockwise positive).
    pub fn unit_vec(self) -> Vec2 {
        let r = self.to_radians();
        vec2(r.cos(), r.sin())
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.0 + rhs.0)
    }
}

impl Add<f32> for Angle {
    type Output = Angle;
    fn add(self, rhs: f32) -> Angle {
        Angle::new(self.0 + rhs)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.0 - rhs.0)
    }
}

impl Sub<f32> for Angle {
    type Output = Angle;
    fn sub(self, rhs: f32) -> Angle {
        Angle::new(self.0 - rhs)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle::new(-self.0)
    }
}

impl Mul<f32> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f32) -> Angle {
        Angle::new(self.0 * rhs)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        *self = *self + rhs;
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Angle) {
        *self = *self - rhs;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn constructors_normalize() {
        assert_eq!(Angle::new(370.0).deg(), 10.0);
        assert_eq!(Angle::new(-45.0).deg(), 315.0);
        assert_eq!(Angle::new(720.0).deg(), 0.0);
    }

    #[test]
    fn arithmetic_wraps() {
        let a = Angle::new(350.0) + Angle::new(20.0);
        assert_eq!(a.deg(), 10.0);
        let b = Angle::new(10.0) - Angle::new(20.0);
        assert_eq!(b.deg(), 350.0);
        assert_eq!((-Angle::new(45.0)).deg(), 315.0);
        assert_eq!((Angle::new(90.0) * 2.0).deg(), 180.0);
    }

    #[test]
    fn comparisons_use_normalized_value() {
        assert!(Angle::new(350.0) > Angle::new(10.0));
        assert!(Angle::new(-10.0) > Angle::new(90.0)); // -10 normalizes to 350
    }

    #[test]
    fn radian_round_trip() {
        let a = Angle::from_radians(FRAC_PI_2);
        assert!((a.deg() - 90.0).abs() < 1e-4);
        assert!((a.to_radians() - FRAC_PI_2).abs() < 1e-6);
        // negative radians land in the upper half of the circle
        let b = Angle::from_radians(-FRAC_PI_2);
        assert!((b.deg() - 270.0).abs() < 1e-4);
    }

    #[test]
    fn between_points() {
        let a = Angle::between(vec2(0.0, 0.0), vec2(10.0, 10.0));
        assert!((a.deg() - 45.0).abs() < 1e-4);
        let b = Angle::between(vec2(5.0, 5.0), vec2(-5.0, 5.0));
        assert!((b.to_radians() - PI).abs() < 1e-5);
    }

    #[test]
    fn unit_vec_matches_angle() {
        let v = Angle::new(90.0).unit_vec();
        assert!((v - vec2(0.0, 1.0)).length() < 1e-5);
    }
}
