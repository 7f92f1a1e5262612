mod angle;
mod level;
mod linedef;
mod observer;
mod solid_bsp;

pub use angle::Angle;
pub use level::{
    CHILD_MASK, Level, LevelError, Linedef, LinedefFlags, LinedefId, Node, SUBSECTOR_BIT, Seg,
    SegmentId, Subsector, SubsectorId, Vertex, VertexId,
};
pub use linedef::{Facing, GeometryError, LineDef, LineSide};
pub use observer::Observer;
pub use solid_bsp::{NodeId, SolidBsp, SolidNode};
