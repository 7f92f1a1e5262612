use glam::{Vec2, vec2};
use thiserror::Error;

/// Which side of a directed segment carries the solid interior.
///
/// All closed polygons in this engine are wound so the solid side is the
/// *back* of each edge; the flag is kept per line so split fragments can
/// inherit it unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Back,
    Front,
}

/// Result of classifying one line against another's infinite line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineSide {
    Behind,
    Front,
    Spanning,
    Coplanar,
}

/// Errors raised while building lines from raw polygon vertices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon edge {0} has zero length")]
    ZeroLengthEdge(usize),
}

/// Directed wall segment `start → end` in world coordinates.
///
/// Immutable once constructed; splitting produces two *new* lines.
/// Midpoint and the per-side unit normals are precomputed because the
/// demo viewers draw them constantly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineDef {
    pub start: Vec2,
    pub end: Vec2,
    pub facing: Facing,
    pub mid: Vec2,
    /// Unit normal pointing into the front half-plane.
    pub normal_front: Vec2,
    /// Unit normal pointing into the back half-plane.
    pub normal_back: Vec2,
}

impl LineDef {
    fn from_points(start: Vec2, end: Vec2, facing: Facing) -> Self {
        let dir = (end - start).normalize_or_zero();
        let normal_front = vec2(dir.y, -dir.x);
        Self {
            start,
            end,
            facing,
            mid: (start + end) * 0.5,
            normal_front,
            normal_back: -normal_front,
        }
    }

    /// First edge of a polygon.
    pub fn as_root(x1: f32, y1: f32, x2: f32, y2: f32, facing: Facing) -> Self {
        Self::from_points(vec2(x1, y1), vec2(x2, y2), facing)
    }

    /// Next edge, starting where `prev` ended.
    pub fn as_child(prev: &LineDef, x2: f32, y2: f32, facing: Facing) -> Self {
        Self::from_points(prev.end, vec2(x2, y2), facing)
    }

    /// Closing edge, from `prev`'s end back to the polygon's first vertex.
    pub fn as_leaf(prev: &LineDef, first: &LineDef, facing: Facing) -> Self {
        Self::from_points(prev.end, first.start, facing)
    }

    /// Build a closed polygon as a chain of lines, one per edge.
    ///
    /// Consecutive duplicate vertices (including last == first) are
    /// rejected here so the partitioning maths never sees a zero-length
    /// edge.
    pub fn polygon(points: &[Vec2], facing: Facing) -> Result<Vec<LineDef>, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[0] == pair[1] {
                return Err(GeometryError::ZeroLengthEdge(i));
            }
        }
        if points[points.len() - 1] == points[0] {
            return Err(GeometryError::ZeroLengthEdge(points.len() - 1));
        }

        let root = LineDef::as_root(
            points[0].x,
            points[0].y,
            points[1].x,
            points[1].y,
            facing,
        );
        let mut lines = vec![root];
        let mut prev = root;
        for p in &points[2..] {
            prev = LineDef::as_child(&prev, p.x, p.y, facing);
            lines.push(prev);
        }
        lines.push(LineDef::as_leaf(&prev, &root, facing));
        Ok(lines)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    /// Signed side test against this line's infinite extension.
    /// Positive = front half-plane, negative = back, zero = on the line.
    #[inline]
    pub fn point_side(&self, p: Vec2) -> f32 {
        let d = self.end - self.start;
        (p.x - self.start.x) * d.y - (p.y - self.start.y) * d.x
    }

    /// Classify `other` against this line.
    ///
    /// Endpoints exactly on the line lean toward whichever side the other
    /// endpoint is on; only a fully collinear segment is `Coplanar`.
    pub fn classify(&self, other: &LineDef) -> LineSide {
        let d1 = self.point_side(other.start);
        let d2 = self.point_side(other.end);

        if d1 == 0.0 && d2 == 0.0 {
            LineSide::Coplanar
        } else if d1 <= 0.0 && d2 <= 0.0 {
            LineSide::Behind
        } else if d1 >= 0.0 && d2 >= 0.0 {
            LineSide::Front
        } else {
            LineSide::Spanning
        }
    }

    /// Split a spanning `other` at this line's infinite extension.
    ///
    /// Returns `(behind, front)`; both halves inherit `other.facing` and
    /// their shared endpoint lies exactly on this line (up to float
    /// precision).  A split point coincident with one of `other`'s
    /// endpoints yields a zero-length half, which is tolerated.
    pub fn split(&self, other: &LineDef) -> (LineDef, LineDef) {
        let d1 = self.point_side(other.start);
        let d2 = self.point_side(other.end);
        let t = d1 / (d1 - d2);
        let ip = other.start + (other.end - other.start) * t;

        if d1 < 0.0 {
            (
                LineDef::from_points(other.start, ip, other.facing),
                LineDef::from_points(ip, other.end, other.facing),
            )
        } else {
            (
                LineDef::from_points(ip, other.end, other.facing),
                LineDef::from_points(other.start, ip, other.facing),
            )
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
