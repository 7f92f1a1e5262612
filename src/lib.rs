//! Solid-BSP first-person wall renderer.
//!
//! Two halves, deliberately independent:
//!
//! * [`world`]: map geometry, including directed wall lines, the solid/empty BSP
//!   built from them, the runtime level structures and the observer.
//! * [`engine`]: the per-frame pipeline to clip walls to the viewing cone,
//!   project the clipped angles to screen columns, and resolve visibility
//!   with a 1-D occlusion list so every column is painted exactly once.
//!
//! No depth buffer anywhere: walls are handed to the engine front-to-back
//! and the occlusion list makes the first claim on a column the final one.

pub mod engine;
pub mod world;
