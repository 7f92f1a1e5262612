//! ----------------------------------------------------------------------------
//! **First-person renderer**
//!
//! Per frame, for every solid SEG of every subsector (handed over in
//! front-to-back order by [`Level::visit_subsectors`]):
//!
//! 1. clip its endpoints to the viewing cone ([`FovClipper`]),
//! 2. project the clipped angles to screen columns,
//! 3. run the column range through the occlusion list ([`SolidSegs`]),
//! 4. forward every fragment that survives to the draw callback.
//!
//! Front-to-back order is the *caller's* contract (via the level's node
//! tree); it is what makes "first claim wins" equal "nearest wall wins".
//! Nothing here detects a violation; the output is just silently wrong.
//! ----------------------------------------------------------------------------

use std::collections::HashMap;

use glam::Vec2;

use crate::{
    engine::{fov::FovClipper, occlusion::SolidSegs, projection::angle_to_column, types::Screen},
    world::{Angle, Level, Observer, SegmentId},
};

/// Visible-fragment sink: `(seg, first column, last column)`, inclusive.
pub type DrawFragment<'a> = &'a mut dyn FnMut(SegmentId, i32, i32);

/// Optional per-SEG hook, fired once for every SEG that survives FOV
/// clipping.  Handy for overlay viewers that highlight what is visible.
pub type SegInspect<'a> = &'a mut dyn FnMut(SegmentId, Vec2, Vec2);

pub struct FpsRenderer<'a> {
    level: &'a Level,
    screen: Screen,
    clipper: FovClipper,
    solid_segs: SolidSegs,
    /// Final `(start, end)` column pair per SEG, rebuilt every frame.
    clippings: HashMap<SegmentId, (i32, i32)>,
}

impl<'a> FpsRenderer<'a> {
    pub fn new(level: &'a Level, fov: Angle, w: usize, h: usize) -> Self {
        Self {
            level,
            screen: Screen::new(w, h),
            clipper: FovClipper::new(fov),
            solid_segs: SolidSegs::new(w),
            clippings: HashMap::new(),
        }
    }

    #[inline]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Column assignments of the last rendered frame.
    pub fn clippings(&self) -> &HashMap<SegmentId, (i32, i32)> {
        &self.clippings
    }

    /// Render one frame, handing every visible fragment to `draw`.
    pub fn render(&mut self, observer: &Observer, draw: DrawFragment<'_>) {
        self.render_inspect(observer, draw, None);
    }

    /// Like [`render`](Self::render), with the optional SEG hook attached.
    pub fn render_inspect(
        &mut self,
        observer: &Observer,
        draw: DrawFragment<'_>,
        mut inspect: Option<SegInspect<'_>>,
    ) {
        self.solid_segs.reset();
        self.clippings.clear();

        let level = self.level;
        level.visit_subsectors(observer.pos, &mut |ss| {
            self.draw_subsector(ss, observer, &mut *draw, &mut inspect);
        });
    }

    fn draw_subsector(
        &mut self,
        ss: u16,
        observer: &Observer,
        draw: DrawFragment<'_>,
        inspect: &mut Option<SegInspect<'_>>,
    ) {
        for seg_idx in self.level.segs_of_subsector(ss) {
            let seg = &self.level.segs[seg_idx];
            if !self.level.linedefs[seg.linedef as usize].is_solid() {
                continue;
            }

            let (v1, v2) = self.level.seg_vertices(seg);
            let Some((a1, a2)) = self.clipper.clip_vertices(observer, v1, v2) else {
                continue;
            };

            let seg_id = seg_idx as SegmentId;
            if let Some(hook) = inspect.as_mut() {
                hook(seg_id, v1, v2);
            }

            let x1 = angle_to_column(a1, self.clipper.fov(), &self.screen);
            let x2 = angle_to_column(a2, self.clipper.fov(), &self.screen);

            let Self {
                solid_segs,
                clippings,
                ..
            } = self;
            solid_segs.clip_wall(x1, x2, &mut |xs, xe| {
                clippings.insert(seg_id, (xs, xe));
                draw(seg_id, xs, xe);
            });
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
