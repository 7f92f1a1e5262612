//! Runtime level geometry and its front-to-back BSP traversal.
//!
//! The renderer consumes this structure read-only: vertices, linedefs,
//! SEGs grouped into subsectors, and the pre-partitioned node tree.  The
//! one capability the first-person renderer actually depends on is
//! [`Level::visit_subsectors`]: *visit every subsector leaf in strict
//! front-to-back order relative to an observer point*.

use std::ops::Range;

use bitflags::bitflags;
use glam::Vec2;
use thiserror::Error;

pub type SubsectorId = u16;
pub type LinedefId = u16;
pub type SegmentId = u16;
pub type VertexId = u16;

/// High bit of a node child marks it as a subsector leaf.
pub const SUBSECTOR_BIT: u16 = 0x8000;
pub const CHILD_MASK: u16 = 0x7FFF;

bitflags! {
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LinedefFlags: u16 {
        const IMPASSABLE = 0x0001;
        const TWO_SIDED  = 0x0004;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub pos: Vec2,
}

#[derive(Clone, Debug)]
pub struct Linedef {
    pub v1: VertexId,
    pub v2: VertexId,
    pub flags: LinedefFlags,
}

impl Linedef {
    /// One-sided walls are solid; two-sided ones are passages.
    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.flags.contains(LinedefFlags::TWO_SIDED)
    }
}

/// Directed wall fragment; v1 → v2 winding encodes which way it faces.
#[derive(Clone, Debug)]
pub struct Seg {
    pub v1: VertexId,
    pub v2: VertexId,
    pub linedef: LinedefId,
}

#[derive(Clone, Debug)]
pub struct Subsector {
    pub first_seg: SegmentId,
    pub seg_count: u16,
}

/// Partition node of the pre-built level tree.
/// Children 0/1 are the front/back side of the splitter `(x,y) + t(dx,dy)`.
#[derive(Clone, Debug)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub child: [u16; 2],
}

impl Node {
    /// 0 = *front* of splitter, 1 = *back*.
    #[inline(always)]
    pub fn point_side(&self, p: Vec2) -> usize {
        let d = (p.x - self.x) * self.dy - (p.y - self.y) * self.dx;
        if d >= 0.0 { 0 } else { 1 }
    }
}

/// Errors detected by [`Level::validate`].
///
/// Degenerate geometry (zero-length SEGs above all) is rejected here, at
/// the input boundary; the renderer itself never re-checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level has no subsectors")]
    NoSubsectors,

    #[error("linedef {0} references vertex {1} out of range")]
    LinedefVertexOutOfRange(usize, VertexId),

    #[error("seg {0} references vertex {1} out of range")]
    SegVertexOutOfRange(usize, VertexId),

    #[error("seg {0} references linedef {1} out of range")]
    SegLinedefOutOfRange(usize, LinedefId),

    #[error("seg {0} has zero length")]
    ZeroLengthSeg(usize),

    #[error("subsector {0} seg range out of bounds")]
    SubsectorOutOfRange(usize),

    #[error("node {0} child {1} out of range")]
    NodeChildOutOfRange(usize, u16),
}

/// Runtime snapshot of one map (immutable after construction).
#[derive(Debug, Default)]
pub struct Level {
    pub vertices: Vec<Vertex>,
    pub linedefs: Vec<Linedef>,
    pub segs: Vec<Seg>,
    pub subsectors: Vec<Subsector>,
    pub nodes: Vec<Node>,
}

impl Level {
    /// Index of the BSP root (`nodes.len() - 1`, Doom convention).
    #[inline(always)]
    pub fn bsp_root(&self) -> u16 {
        assert!(!self.nodes.is_empty());
        (self.nodes.len() - 1) as u16
    }

    /// SEG index range of one subsector.
    #[inline]
    pub fn segs_of_subsector(&self, ss: SubsectorId) -> Range<usize> {
        let ss = &self.subsectors[ss as usize];
        let first = ss.first_seg as usize;
        first..first + ss.seg_count as usize
    }

    /// World endpoints of one SEG.
    #[inline]
    pub fn seg_vertices(&self, seg: &Seg) -> (Vec2, Vec2) {
        (
            self.vertices[seg.v1 as usize].pos,
            self.vertices[seg.v2 as usize].pos,
        )
    }

    /// Walk the node tree and hand every subsector to `visitor` in strict
    /// front-to-back order relative to `p`.
    ///
    /// A level without nodes is a single convex region; its subsectors are
    /// visited in listed order, which the level author is trusted to have
    /// arranged near-to-far.
    pub fn visit_subsectors(&self, p: Vec2, visitor: &mut impl FnMut(SubsectorId)) {
        if self.nodes.is_empty() {
            for ss in 0..self.subsectors.len() {
                visitor(ss as SubsectorId);
            }
            return;
        }
        self.walk(self.bsp_root(), p, visitor);
    }

    fn walk(&self, child: u16, p: Vec2, visitor: &mut impl FnMut(SubsectorId)) {
        if child & SUBSECTOR_BIT != 0 {
            visitor(child & CHILD_MASK);
            return;
        }

        let node = &self.nodes[child as usize];
        let front = node.point_side(p);

        // near side first, then the far side
        self.walk(node.child[front], p, visitor);
        self.walk(node.child[front ^ 1], p, visitor);
    }

    /// Structural validation of every cross-reference plus the degenerate
    /// geometry the rendering maths cannot tolerate.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.subsectors.is_empty() {
            return Err(LevelError::NoSubsectors);
        }

        let nv = self.vertices.len();
        for (i, ld) in self.linedefs.iter().enumerate() {
            for v in [ld.v1, ld.v2] {
                if v as usize >= nv {
                    return Err(LevelError::LinedefVertexOutOfRange(i, v));
                }
            }
        }

        for (i, seg) in self.segs.iter().enumerate() {
            for v in [seg.v1, seg.v2] {
                if v as usize >= nv {
                    return Err(LevelError::SegVertexOutOfRange(i, v));
                }
            }
            if seg.linedef as usize >= self.linedefs.len() {
                return Err(LevelError::SegLinedefOutOfRange(i, seg.linedef));
            }
            let (a, b) = self.seg_vertices(seg);
            if a == b {
                return Err(LevelError::ZeroLengthSeg(i));
            }
        }

        for (i, ss) in self.subsectors.iter().enumerate() {
            let end = ss.first_seg as usize + ss.seg_count as usize;
            if ss.seg_count == 0 || end > self.segs.len() {
                return Err(LevelError::SubsectorOutOfRange(i));
            }
        }

        for (i, node) in self.nodes.iter().enumerate() {
            for c in node.child {
                if c & SUBSECTOR_BIT != 0 {
                    if (c & CHILD_MASK) as usize >= self.subsectors.len() {
                        return Err(LevelError::NodeChildOutOfRange(i, c));
                    }
                } else if c as usize >= self.nodes.len() {
                    return Err(LevelError::NodeChildOutOfRange(i, c));
                }
            }
        }

        Ok(())
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    /// Two side-by-side subsectors split by the vertical line x = 0.
    fn two_room_level() -> Level {
        let vertices = vec![
            Vertex { pos: vec2(-10.0, 0.0) },
            Vertex { pos: vec2(-10.0, 10.0) },
            Vertex { pos: vec2(10.0, 0.0) },
            Vertex { pos: vec2(10.0, 10.0) },
        ];
        let linedefs = vec![
            Linedef { v1: 0, v2: 1, flags: LinedefFlags::IMPASSABLE },
            Linedef { v1: 2, v2: 3, flags: LinedefFlags::IMPASSABLE },
        ];
        let segs = vec![
            Seg { v1: 0, v2: 1, linedef: 0 },
            Seg { v1: 2, v2: 3, linedef: 1 },
        ];
        let subsectors = vec![
            Subsector { first_seg: 0, seg_count: 1 },
            Subsector { first_seg: 1, seg_count: 1 },
        ];
        // splitter x = 0 pointing north: front (side 0) is +X
        let nodes = vec![Node {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 1.0,
            child: [SUBSECTOR_BIT | 1, SUBSECTOR_BIT | 0],
        }];
        Level {
            vertices,
            linedefs,
            segs,
            subsectors,
            nodes,
        }
    }

    #[test]
    fn traversal_is_near_side_first() {
        let level = two_room_level();

        let mut order = Vec::new();
        level.visit_subsectors(vec2(5.0, 5.0), &mut |ss| order.push(ss));
        assert_eq!(order, vec![1, 0]); // east observer sees east room first

        order.clear();
        level.visit_subsectors(vec2(-5.0, 5.0), &mut |ss| order.push(ss));
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn nodeless_level_visits_listed_order() {
        let mut level = two_room_level();
        level.nodes.clear();
        let mut order = Vec::new();
        level.visit_subsectors(vec2(0.0, 0.0), &mut |ss| order.push(ss));
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn node_point_side_convention() {
        let level = two_room_level();
        let node = &level.nodes[0];
        assert_eq!(node.point_side(vec2(5.0, 3.0)), 0);
        assert_eq!(node.point_side(vec2(-5.0, 3.0)), 1);
        // on the splitter counts as front
        assert_eq!(node.point_side(vec2(0.0, 3.0)), 0);
    }

    #[test]
    fn validate_accepts_good_level() {
        assert_eq!(two_room_level().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_references() {
        let mut level = two_room_level();
        level.segs[0].v2 = 99;
        assert_eq!(
            level.validate(),
            Err(LevelError::SegVertexOutOfRange(0, 99))
        );

        let mut level = two_room_level();
        level.segs[1].v2 = level.segs[1].v1;
        assert_eq!(level.validate(), Err(LevelError::ZeroLengthSeg(1)));

        let mut level = two_room_level();
        level.subsectors[1].seg_count = 5;
        assert_eq!(level.validate(), Err(LevelError::SubsectorOutOfRange(1)));

        let mut level = two_room_level();
        level.nodes[0].child[0] = SUBSECTOR_BIT | 7;
        assert_eq!(
            level.validate(),
            Err(LevelError::NodeChildOutOfRange(0, SUBSECTOR_BIT | 7))
        );

        let mut level = two_room_level();
        level.subsectors.clear();
        assert_eq!(level.validate(), Err(LevelError::NoSubsectors));
    }
}
