//! Angle → screen-column projection.

use crate::engine::types::Screen;
use crate::world::Angle;

/// Map a clipped wall angle to an integer screen column.
///
/// `angle` is the forward-biased value produced by the FOV clipper: the
/// cone's left edge sits at `1.5 × fov`, its center at `fov`, its right
/// edge at `0.5 × fov`.  The mapping is a tangent (planar) projection onto
/// a flat screen, *not* a linear angular one: equal angular steps near the
/// cone edges cover more columns, which is what correct perspective
/// foreshortening looks like.
pub fn angle_to_column(angle: Angle, fov: Angle, screen: &Screen) -> i32 {
    let half_w = screen.half_w;
    if angle > fov {
        // left half of the cone
        let from_center = angle - fov;
        (half_w - from_center.to_radians().tan() * half_w) as i32
    } else {
        // right half
        let from_center = fov - angle;
        (half_w + from_center.to_radians().tan() * half_w) as i32
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
