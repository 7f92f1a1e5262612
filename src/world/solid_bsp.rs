//! ----------------------------------------------------------------------------
//! **Solid BSP tree**
//!
//! Recursively partitions a set of directed [`LineDef`]s into a binary tree
//! whose leaves tag plane regions as *solid* or *empty*:
//!
//! * lines behind (or collinear with) a splitter go to the back subtree,
//!   lines in front to the front subtree, spanning lines are split in two
//! * a branch that runs out of lines on its **front** side is open space,
//!   on its **back** side solid interior, matching polygons wound with
//!   their solid side on the back of every edge
//!
//! The tree is an arena of nodes addressed by index: no owning pointers, no
//! cycles, and child links are plain `Option<NodeId>`.  Built once, then
//! read-only (point containment queries and draw traversal).
//! ----------------------------------------------------------------------------

use glam::Vec2;
use smallvec::SmallVec;

use crate::world::linedef::{LineDef, LineSide};

pub type NodeId = usize;

/// Working list for one partition level; small rooms never spill to the heap.
type PartitionList = SmallVec<[LineDef; 8]>;

#[derive(Debug)]
pub struct SolidNode {
    /// Partition line; `None` exactly for leaves.
    pub splitter: Option<LineDef>,
    pub front: Option<NodeId>,
    pub back: Option<NodeId>,
    pub is_leaf: bool,
    /// Meaningful only when `is_leaf`.
    pub is_solid: bool,
}

#[derive(Debug)]
pub struct SolidBsp {
    nodes: Vec<SolidNode>,
    root: NodeId,
}

impl SolidBsp {
    /// Build the tree from the initial line set.
    ///
    /// An empty input produces a single empty leaf: with no geometry at all
    /// the whole plane is treated as open space.
    pub fn build(lines: Vec<LineDef>) -> Self {
        let mut tree = SolidBsp {
            nodes: Vec::new(),
            root: 0,
        };
        if lines.is_empty() {
            tree.root = tree.push_leaf(false);
        } else {
            tree.root = tree.build_node(lines.into_iter().collect());
        }
        tree
    }

    fn push_leaf(&mut self, is_solid: bool) -> NodeId {
        self.nodes.push(SolidNode {
            splitter: None,
            front: None,
            back: None,
            is_leaf: true,
            is_solid,
        });
        self.nodes.len() - 1
    }

    fn build_node(&mut self, lines: PartitionList) -> NodeId {
        // Naive splitter pick: first line of the list.  Tree *quality*
        // depends on this choice, correctness does not.
        let splitter = lines[0];

        let mut front_list = PartitionList::new();
        let mut back_list = PartitionList::new();
        for line in &lines[1..] {
            match splitter.classify(line) {
                LineSide::Behind | LineSide::Coplanar => back_list.push(*line),
                LineSide::Front => front_list.push(*line),
                LineSide::Spanning => {
                    let (behind, front) = splitter.split(line);
                    back_list.push(behind);
                    front_list.push(front);
                }
            }
        }

        // Each recursion sees strictly fewer lines than its parent (the
        // splitter itself is consumed), so this terminates.
        let front = if front_list.is_empty() {
            self.push_leaf(false)
        } else {
            self.build_node(front_list)
        };
        let back = if back_list.is_empty() {
            self.push_leaf(true)
        } else {
            self.build_node(back_list)
        };

        self.nodes.push(SolidNode {
            splitter: Some(splitter),
            front: Some(front),
            back: Some(back),
            is_leaf: false,
            is_solid: false,
        });
        self.nodes.len() - 1
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SolidNode {
        &self.nodes[id]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when `p` lies in open space.
    ///
    /// Points exactly on a splitter descend to its front side.
    pub fn in_empty(&self, p: Vec2) -> bool {
        let mut id = self.root;
        loop {
            let node = &self.nodes[id];
            let Some(splitter) = &node.splitter else {
                return !node.is_solid;
            };
            id = if splitter.point_side(p) >= 0.0 {
                node.front.expect("internal node has a front child")
            } else {
                node.back.expect("internal node has a back child")
            };
        }
    }

    /// Visit every internal node's splitter, back subtree before front.
    pub fn walk_splitters(&self, f: &mut impl FnMut(&LineDef)) {
        self.walk(self.root, f);
    }

    fn walk(&self, id: NodeId, f: &mut impl FnMut(&LineDef)) {
        let node = &self.nodes[id];
        if let Some(back) = node.back {
            self.walk(back, f);
        }
        if let Some(splitter) = &node.splitter {
            f(splitter);
        }
        if let Some(front) = node.front {
            self.walk(front, f);
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::linedef::Facing;
    use glam::vec2;

    /// Counter-clockwise square, interior on the back of every edge.
    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<LineDef> {
        LineDef::polygon(
            &[vec2(x0, y0), vec2(x1, y0), vec2(x1, y1), vec2(x0, y1)],
            Facing::Back,
        )
        .unwrap()
    }

    #[test]
    fn empty_input_is_open_plane() {
        let bsp = SolidBsp::build(Vec::new());
        assert_eq!(bsp.len(), 1);
        assert!(bsp.node(bsp.root()).is_leaf);
        assert!(bsp.in_empty(vec2(123.0, -456.0)));
    }

    #[test]
    fn square_tree_shape() {
        let bsp = SolidBsp::build(square(0.0, 0.0, 10.0, 10.0));

        let internal = bsp.nodes.iter().filter(|n| !n.is_leaf).count();
        let solid = bsp.nodes.iter().filter(|n| n.is_leaf && n.is_solid).count();
        let empty = bsp
            .nodes
            .iter()
            .filter(|n| n.is_leaf && !n.is_solid)
            .count();

        // one internal node per edge; every front branch dies immediately
        // (empty leaf) and only the innermost back branch is solid
        assert_eq!(internal, 4);
        assert_eq!(solid, 1);
        assert_eq!(empty, 4);
    }

    #[test]
    fn square_containment() {
        let bsp = SolidBsp::build(square(0.0, 0.0, 10.0, 10.0));

        assert!(!bsp.in_empty(vec2(5.0, 5.0))); // center is solid
        assert!(bsp.in_empty(vec2(20.0, 20.0)));
        assert!(bsp.in_empty(vec2(-1.0, 5.0)));
        assert!(!bsp.in_empty(vec2(9.9, 9.9)));
    }

    #[test]
    fn single_wall_separates_sides() {
        let wall = LineDef::as_root(0.0, 0.0, 10.0, 0.0, Facing::Back);
        let bsp = SolidBsp::build(vec![wall]);

        // two points straddling an unsplit wall always disagree
        assert_ne!(
            bsp.in_empty(vec2(5.0, -1.0)),
            bsp.in_empty(vec2(5.0, 1.0))
        );
        // front side (south of an east-directed wall) is the open one
        assert!(bsp.in_empty(vec2(5.0, -1.0)));
    }

    #[test]
    fn spanning_line_is_split_during_build() {
        let splitter = LineDef::as_root(0.0, 0.0, 10.0, 0.0, Facing::Back);
        let crossing = LineDef::as_root(5.0, -4.0, 5.0, 4.0, Facing::Back);
        let bsp = SolidBsp::build(vec![splitter, crossing]);

        // splitter + two halves = 3 internal nodes
        let internal = bsp.nodes.iter().filter(|n| !n.is_leaf).count();
        assert_eq!(internal, 3);
    }

    #[test]
    fn walk_covers_every_splitter_once() {
        let bsp = SolidBsp::build(square(0.0, 0.0, 10.0, 10.0));
        let mut seen = Vec::new();
        bsp.walk_splitters(&mut |l| seen.push(l.mid));
        assert_eq!(seen.len(), 4);
        seen.sort_by(|a, b| (a.x, a.y).partial_cmp(&(b.x, b.y)).unwrap());
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
