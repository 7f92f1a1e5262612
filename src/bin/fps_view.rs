//! First-person walk around a hard-coded demo map.
//!
//! ```bash
//! cargo run --release --bin fps_view
//! ```
//!
//! WASD moves, left/right arrows turn, Escape quits.  Every wall fragment
//! is painted as a flat-colored full-height column strip, which makes the
//! occlusion splits directly visible on screen.

use anyhow::Context;
use clap::Parser;
use glam::{Vec2, vec2};
use minifb::{Key, Window, WindowOptions};

use solidview_rs::{
    engine::FpsRenderer,
    world::{
        Angle, Facing, Level, LineDef, Linedef, LinedefFlags, Observer, Seg, SolidBsp, Subsector,
        Vertex,
    },
};

#[derive(Parser, Debug)]
#[command(name = "fps_view", about = "Solid-BSP first-person wall renderer")]
struct Opts {
    /// Window width in pixels.
    #[arg(long, default_value_t = 960)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Horizontal field of view in degrees.
    #[arg(long, default_value_t = 90.0)]
    fov: f32,
}

const MOVE_SPEED: f32 = 4.0; // map units per frame
const TURN_SPEED: f32 = 3.0; // degrees per frame

const CEILING: u32 = 0x00_20_20_28;
const FLOOR: u32 = 0x00_30_2a_24;

/// One flat color per wall, reused modulo the palette size.
const PALETTE: [u32; 8] = [
    0x00_b0_50_50,
    0x00_50_b0_50,
    0x00_50_50_b0,
    0x00_b0_b0_50,
    0x00_b0_50_b0,
    0x00_50_b0_b0,
    0x00_c0_80_40,
    0x00_80_80_80,
];

/// Square room from (64,64) to (448,448) with a 64×64 pillar in the middle.
///
/// One subsector and no node tree; the pillar SEGs are listed first so the
/// listed order is front-to-back from anywhere the observer can stand.
fn demo_level() -> Level {
    let mut level = Level::default();
    let mut push_wall = |level: &mut Level, a: Vec2, b: Vec2| {
        let v1 = level.vertices.len() as u16;
        level.vertices.push(Vertex { pos: a });
        level.vertices.push(Vertex { pos: b });
        let ld = level.linedefs.len() as u16;
        level.linedefs.push(Linedef {
            v1,
            v2: v1 + 1,
            flags: LinedefFlags::IMPASSABLE,
        });
        level.segs.push(Seg {
            v1,
            v2: v1 + 1,
            linedef: ld,
        });
    };

    // pillar, wound to face outward
    push_wall(&mut level, vec2(224.0, 224.0), vec2(288.0, 224.0));
    push_wall(&mut level, vec2(288.0, 224.0), vec2(288.0, 288.0));
    push_wall(&mut level, vec2(288.0, 288.0), vec2(224.0, 288.0));
    push_wall(&mut level, vec2(224.0, 288.0), vec2(224.0, 224.0));
    // room boundary, wound to face inward
    push_wall(&mut level, vec2(448.0, 64.0), vec2(64.0, 64.0));
    push_wall(&mut level, vec2(64.0, 64.0), vec2(64.0, 448.0));
    push_wall(&mut level, vec2(64.0, 448.0), vec2(448.0, 448.0));
    push_wall(&mut level, vec2(448.0, 448.0), vec2(448.0, 64.0));

    level.subsectors.push(Subsector {
        first_seg: 0,
        seg_count: 8,
    });
    level
}

/// Collision geometry for the same map: open space is the room interior
/// minus the pillar.
fn demo_collision() -> anyhow::Result<SolidBsp> {
    // room wound with open space on the front of every edge; the outside
    // world is the solid back side
    let mut lines = LineDef::polygon(
        &[
            vec2(448.0, 64.0),
            vec2(64.0, 64.0),
            vec2(64.0, 448.0),
            vec2(448.0, 448.0),
        ],
        Facing::Back,
    )
    .context("room polygon")?;
    // pillar wound the other way round, so its interior is the solid side
    lines.extend(
        LineDef::polygon(
            &[
                vec2(224.0, 224.0),
                vec2(288.0, 224.0),
                vec2(288.0, 288.0),
                vec2(224.0, 288.0),
            ],
            Facing::Back,
        )
        .context("pillar polygon")?,
    );
    Ok(SolidBsp::build(lines))
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let (w, h) = (opts.width, opts.height);

    let level = demo_level();
    level.validate().context("demo level is inconsistent")?;
    let collision = demo_collision()?;

    let mut renderer = FpsRenderer::new(&level, Angle::new(opts.fov), w, h);
    let mut observer = Observer::new(vec2(144.0, 144.0), Angle::new(45.0));

    let mut window = Window::new(
        "solidview - fps_view",
        w,
        h,
        WindowOptions::default(),
    )?;
    window.set_target_fps(60);

    let mut buffer = vec![0u32; w * h];

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut forward = 0.0;
        let mut side = 0.0;
        if window.is_key_down(Key::W) {
            forward += MOVE_SPEED;
        }
        if window.is_key_down(Key::S) {
            forward -= MOVE_SPEED;
        }
        if window.is_key_down(Key::D) {
            side += MOVE_SPEED;
        }
        if window.is_key_down(Key::A) {
            side -= MOVE_SPEED;
        }
        if window.is_key_down(Key::Left) {
            observer.turn(TURN_SPEED);
        }
        if window.is_key_down(Key::Right) {
            observer.turn(-TURN_SPEED);
        }

        // move, then undo if the new spot is inside a wall
        let before = observer.pos;
        observer.step(forward, side);
        if !collision.in_empty(observer.pos) {
            observer.pos = before;
        }

        for (i, px) in buffer.iter_mut().enumerate() {
            *px = if i / w < h / 2 { CEILING } else { FLOOR };
        }

        renderer.render(&observer, &mut |seg, x1, x2| {
            let color = PALETTE[seg as usize % PALETTE.len()];
            let lo = x1.max(0);
            let hi = x2.min(w as i32 - 1);
            if hi < lo {
                return;
            }
            let (lo, hi) = (lo as usize, hi as usize);
            for x in lo..=hi {
                for y in 0..h {
                    buffer[y * w + x] = color;
                }
            }
        });

        window.update_with_buffer(&buffer, w, h)?;
    }

    Ok(())
}
