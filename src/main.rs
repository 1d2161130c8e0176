//! Tilestep entry point
//!
//! Headless demo: builds a map, spawns a keyboard-style actor next to an AI
//! wanderer, and drives the fixed-timestep loop with scripted input while
//! logging what the renderer would draw.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use glam::Vec2;
    use tilestep::consts::TILE_SIZE;
    use tilestep::sim::{advance, interpolate, render_alpha, Controller, World};
    use tilestep::{loader, Tuning};

    env_logger::init();
    log::info!("Tilestep demo starting...");

    // Positional map image plus a few options
    let mut map_path: Option<PathBuf> = None;
    let mut tuning_path: Option<PathBuf> = None;
    let mut seed: u64 = 42;
    let mut frames: u32 = 600;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tuning" => tuning_path = args.next().map(PathBuf::from),
            "--seed" => {
                if let Some(v) = args.next() {
                    seed = v.parse().unwrap_or(seed);
                }
            }
            "--frames" => {
                if let Some(v) = args.next() {
                    frames = v.parse().unwrap_or(frames);
                }
            }
            _ => map_path = Some(PathBuf::from(arg)),
        }
    }

    let grid = match map_path {
        Some(path) => match loader::load_grid(&path) {
            Ok(grid) => grid,
            Err(err) => {
                log::error!("Failed to load map {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => demo_grid(),
    };

    let tuning = match tuning_path {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    // A renderer would bake these once per map
    let variants = grid.shadow_variants();
    log::info!(
        "Map {}x{} tiles, {} solid",
        grid.width(),
        grid.height(),
        variants.iter().flatten().count()
    );

    let view_size = Vec2::new(640.0, 360.0);
    let mut world = World::new(grid, tuning, view_size, seed);
    let player = world.spawn(
        Vec2::new(6.0 * TILE_SIZE as f32, 600.0),
        Controller::input(),
    );
    world.spawn(
        Vec2::new(30.0 * TILE_SIZE as f32, 600.0),
        Controller::ai(),
    );
    world.camera.target = player;

    let rounding = world.tuning.interp_rounding;
    for frame in 0..frames {
        let input = scripted_input(frame);
        advance(&mut world, &input, 1.0 / 60.0);

        // Interpolated positions are what a renderer would draw
        let alpha = render_alpha(&world);
        if frame % 60 == 0 {
            let cam = interpolate(
                world.camera.prev.position,
                world.camera.cur.position,
                alpha,
                rounding,
            );
            for (i, actor) in world.actors.iter().enumerate() {
                let pos = interpolate(actor.prev.position, actor.cur.position, alpha, rounding);
                log::info!(
                    "frame {frame}: actor {i} at {pos} frame {} angle {} flags {:?}",
                    actor.anim.frame,
                    actor.anim.angle,
                    actor.flags
                );
            }
            log::info!("frame {frame}: camera at {cam}");
        }
    }

    log::info!(
        "Done: {} ticks over {} frames, sim clock {:.2}s",
        world.tick_count,
        frames,
        world.time
    );
}

/// Keyboard-shaped input on a loop: walk right, hop, walk back, kick
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(frame: u32) -> tilestep::sim::TickInput {
    let phase = frame % 360;
    tilestep::sim::TickInput {
        left: (180..300).contains(&phase),
        right: phase < 120,
        jump: phase == 120 || phase == 300,
        kick: phase == 150,
    }
}

/// Built-in 40x24 map with a floor, border walls and a few platforms
#[cfg(not(target_arch = "wasm32"))]
fn demo_grid() -> tilestep::TileGrid {
    use tilestep::consts::TILE_SIZE;

    let mut grid = tilestep::TileGrid::new(40, 24, TILE_SIZE);
    for x in 0..40 {
        grid.set_solid(x, 22, true);
        grid.set_solid(x, 23, true);
    }
    for y in 0..24 {
        grid.set_solid(0, y, true);
        grid.set_solid(39, y, true);
    }
    for x in 8..14 {
        grid.set_solid(x, 18, true);
    }
    for x in 18..24 {
        grid.set_solid(x, 15, true);
    }
    for x in 28..34 {
        grid.set_solid(x, 12, true);
    }
    for y in 19..22 {
        grid.set_solid(20, y, true);
    }
    grid
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is wasm-friendly but the demo binary is native only
}
