//! The per-frame rendering pipeline: FOV clipping, column projection and
//! the screen-space occlusion list, tied together by [`fps::FpsRenderer`].

pub mod fov;
pub mod fps;
pub mod occlusion;
pub mod projection;
pub mod types;

pub use fov::FovClipper;
pub use fps::{DrawFragment, FpsRenderer, SegInspect};
pub use occlusion::{ClipRange, SolidSegs};
pub use projection::angle_to_column;
pub use types::Screen;
