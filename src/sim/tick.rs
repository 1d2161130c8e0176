//! Fixed timestep simulation tick
//!
//! `advance` drains wall-clock time into fixed steps and leaves the
//! remainder for render interpolation. One `tick` runs every controller,
//! integrates the actors, resolves them against the grid, then picks
//! animation frames and moves the camera. All of it is deterministic for
//! a given seed and input sequence.

use glam::Vec2;

use crate::consts::{MAX_FRAME_TIME, SIM_DT};
use crate::sim::anim;
use crate::sim::collision::resolve_actor;
use crate::sim::controller::WalkDir;
use crate::sim::state::{Facing, World};
use crate::tuning::InterpRounding;

/// Held-keys snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Walk left
    pub left: bool,
    /// Walk right; wins when both directions are held
    pub right: bool,
    /// Jump when grounded
    pub jump: bool,
    /// Kick; fires on the rising edge only
    pub kick: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    // Intent and integration, one actor at a time so a delivered kick is
    // visible to later actors in the same tick
    for i in 0..world.actors.len() {
        step_actor(world, i, input, dt);
    }

    // Swept collision, then frame selection on the corrected state
    for i in 0..world.actors.len() {
        resolve_actor(&mut world.actors[i], &world.grid);
        let walk_period = world.tuning.walk_anim_period;
        anim::select_frame(&mut world.actors[i], walk_period, dt);
    }

    // Camera chases its target actor
    if let Some(target) = world.actors.get(world.camera.target) {
        let target_pos = target.cur.position;
        let map_px = Vec2::new(world.grid.width_px() as f32, world.grid.height_px() as f32);
        world
            .camera
            .follow(target_pos, world.view_size, map_px, &world.tuning, dt);
    }

    world.time += dt as f64;
    world.tick_count += 1;
}

/// Run one actor's controller, kick bookkeeping and integration
fn step_actor(world: &mut World, i: usize, input: &TickInput, dt: f32) {
    // Does this actor's probe touch anyone else's right now?
    let overlapping = {
        let me = world.actors[i].probe_box();
        world
            .actors
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && me.intersects(&other.probe_box()))
    };

    let World {
        actors,
        rng,
        tuning,
        time,
        ..
    } = world;
    let time = *time;

    let actor = &mut actors[i];
    actor.prev = actor.cur;

    let kicked = actor.kick.is_kicked(tuning.kick_duration);
    let mut kick_attempt = false;

    if !kicked {
        let intent = actor.controller.decide(
            actor.flags,
            actor.kick.kicking,
            overlapping,
            input,
            rng,
            tuning,
            dt,
        );

        actor.anim.angle = 0.0;
        actor.cur.velocity.x = 0.0;

        if actor.flags.bottom() && intent.jump {
            actor.cur.velocity.y = -tuning.jump_impulse;
        }

        // the kicking pose holds a grounded actor in place
        if !actor.kick.kicking || !actor.flags.bottom() {
            match intent.walk {
                WalkDir::Left => {
                    actor.facing = Facing::Left;
                    actor.cur.velocity.x = -tuning.walk_speed;
                }
                WalkDir::Right => {
                    actor.facing = Facing::Right;
                    actor.cur.velocity.x = tuning.walk_speed;
                }
                WalkDir::None => {}
            }
        }

        if intent.kick {
            actor.kick.kicking = true;
            actor.kick.kick_started = time;
            kick_attempt = true;
        }
    } else {
        // kicked: tilt against the flight direction, drag along the ground
        actor.anim.angle = if actor.kick.kicked_vel.x > 0.0 {
            -10.0
        } else {
            10.0
        };
        if actor.flags.bottom() {
            actor.kick.kicked_vel.x *= tuning.kick_ground_friction;
        }
    }

    // Deliver the kick to every actor the kicker's probe overlaps
    if kick_attempt {
        let kicker_box = actors[i].probe_box();
        let kicker_facing = actors[i].facing;
        for j in 0..actors.len() {
            if j != i && kicker_box.intersects(&actors[j].probe_box()) {
                log::debug!("actor {i} kicked actor {j}");
                actors[j].receive_kick(kicker_facing, tuning);
            }
        }
    }

    let actor = &mut actors[i];

    // A wall strike ends the kicked flight
    if actor.flags.left() || actor.flags.right() {
        actor.kick.kicked_timer = tuning.kick_duration + 1.0;
    }

    if actor.kick.kicking && actor.flags.bottom() {
        actor.cur.velocity = Vec2::ZERO;
    }

    if actor.kick.kicking && time - actor.kick.kick_started > 0.1 {
        actor.kick.kicking = false;
    }

    // Kicked velocity overrides intent until the timer runs out
    if actor.kick.kicked_timer < tuning.kick_duration {
        actor.kick.kicking = false;
        if actor.kick.pending_impulse {
            actor.cur.velocity.y = actor.kick.kicked_vel.y;
            actor.kick.pending_impulse = false;
        }
        actor.cur.velocity.x = actor.kick.kicked_vel.x;
        actor.kick.kicked_timer += dt;
    }

    // Semi-implicit Euler
    actor.cur.velocity += actor.accel * dt;
    actor.cur.position += actor.cur.velocity * dt;
}

/// Feed a frame's wall-clock time into the accumulator and run as many
/// fixed steps as it covers. Returns the number of steps taken.
pub fn advance(world: &mut World, input: &TickInput, frame_time: f64) -> u32 {
    let frame_time = frame_time.min(MAX_FRAME_TIME);
    world.accumulator += frame_time;

    let mut steps = 0;
    while world.accumulator >= SIM_DT as f64 {
        tick(world, input, SIM_DT);
        world.accumulator -= SIM_DT as f64;
        steps += 1;
    }
    steps
}

/// Fraction of the next tick already elapsed, in `[0, 1)` after `advance`
#[inline]
pub fn render_alpha(world: &World) -> f32 {
    (world.accumulator / SIM_DT as f64) as f32
}

/// Blend a previous/current position pair for rendering and snap the
/// result to whole pixels
pub fn interpolate(prev: Vec2, cur: Vec2, alpha: f32, rounding: InterpRounding) -> Vec2 {
    let blended = cur * alpha + prev * (1.0 - alpha);
    Vec2::new(rounding.apply(blended.x), rounding.apply(blended.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::IRect;
    use crate::grid::TileGrid;
    use crate::sim::Controller;
    use crate::tuning::Tuning;

    const PROBE: IRect = IRect {
        x: 0,
        y: 0,
        width: 32,
        height: 77,
    };

    const VIEW: Vec2 = Vec2::new(320.0, 240.0);

    /// 20x20 map with a solid floor across row 10 (top edge at y=320).
    /// An actor with `PROBE` rests there at y=243.
    fn ground_grid() -> TileGrid {
        let mut grid = TileGrid::new(20, 20, 32);
        for x in 0..20 {
            grid.set_solid(x, 10, true);
        }
        grid
    }

    fn world_on_ground() -> World {
        World::new(ground_grid(), Tuning::default(), VIEW, 42)
    }

    #[test]
    fn test_falling_actor_settles_on_ground() {
        let mut world = world_on_ground();
        world.spawn_with_probe(Vec2::new(100.0, 100.0), PROBE, Controller::input());

        let input = TickInput::default();
        for _ in 0..200 {
            tick(&mut world, &input, SIM_DT);
        }

        let actor = &world.actors[0];
        assert_eq!(actor.cur.position.y, 243.0);
        assert_eq!(actor.cur.position.x, 100.0);
        assert_eq!(actor.cur.velocity.y, 0.0);
        assert!(actor.flags.bottom());
        assert_eq!(actor.anim.frame, 0);
        assert_eq!(world.tick_count, 200);
        assert!((world.time - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_jump_rises_then_lands_back() {
        let mut world = world_on_ground();
        world.spawn_with_probe(Vec2::new(100.0, 100.0), PROBE, Controller::input());

        let idle = TickInput::default();
        for _ in 0..200 {
            tick(&mut world, &idle, SIM_DT);
        }

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &jump, SIM_DT);
        {
            let actor = &world.actors[0];
            assert!(actor.cur.velocity.y < 0.0);
            assert!(!actor.flags.bottom());
            assert_eq!(actor.anim.frame, 1);
        }

        let mut landed = false;
        for _ in 0..200 {
            tick(&mut world, &idle, SIM_DT);
            if world.actors[0].flags.bottom() {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(world.actors[0].cur.position.y, 243.0);
    }

    #[test]
    fn test_walk_right_moves_at_walk_speed() {
        let mut world = world_on_ground();
        world.spawn_with_probe(Vec2::new(100.0, 100.0), PROBE, Controller::input());

        let idle = TickInput::default();
        for _ in 0..200 {
            tick(&mut world, &idle, SIM_DT);
        }

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut world, &right, SIM_DT);
        }

        let actor = &world.actors[0];
        // 250 px/s for a tenth of a second
        assert_eq!(actor.cur.position.x, 125.0);
        assert_eq!(actor.cur.position.y, 243.0);
        assert_eq!(actor.facing, Facing::Right);
        assert!(actor.flags.bottom());
        assert!(actor.anim.frame == 1 || actor.anim.frame == 2);
    }

    #[test]
    fn test_walking_into_wall_pins_at_corner() {
        let mut grid = ground_grid();
        for y in 7..10 {
            grid.set_solid(10, y, true);
        }
        let mut world = World::new(grid, Tuning::default(), VIEW, 42);
        world.spawn_with_probe(Vec2::new(250.0, 100.0), PROBE, Controller::input());

        let idle = TickInput::default();
        for _ in 0..200 {
            tick(&mut world, &idle, SIM_DT);
        }
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut world, &right, SIM_DT);
        }

        let actor = &world.actors[0];
        assert_eq!(actor.cur.position.x, 288.0);
        assert_eq!(actor.cur.position.y, 243.0);
        assert!(actor.flags.right());
        assert!(actor.flags.bottom());
    }

    #[test]
    fn test_kick_launches_overlapping_victim() {
        let mut world = world_on_ground();
        world.spawn_with_probe(Vec2::new(260.0, 100.0), PROBE, Controller::input());
        world.spawn_with_probe(Vec2::new(285.0, 100.0), PROBE, Controller::input());

        let idle = TickInput::default();
        for _ in 0..200 {
            tick(&mut world, &idle, SIM_DT);
        }
        assert_eq!(world.actors[0].cur.position.y, 243.0);
        assert_eq!(world.actors[1].cur.position.y, 243.0);

        let kick = TickInput {
            kick: true,
            ..Default::default()
        };
        tick(&mut world, &kick, SIM_DT);

        let duration = world.tuning.kick_duration;
        let kicker = &world.actors[0];
        let victim = &world.actors[1];
        assert!(kicker.kick.kicking);
        assert_eq!(kicker.anim.frame, 3);
        assert!(victim.kick.is_kicked(duration));
        assert!(!victim.kick.kicking);
        assert!(!victim.kick.pending_impulse);
        // the kicker faces left by default, so the victim flies left and
        // up; ground friction already nibbled the first tick
        assert!(victim.cur.velocity.x < -290.0 && victim.cur.velocity.x > -300.0);
        assert!(victim.cur.velocity.y < -400.0);
        assert_eq!(victim.anim.angle, 10.0);
        assert_eq!(victim.anim.frame, 1);

        let x_before = world.actors[1].cur.position.x;
        for _ in 0..20 {
            tick(&mut world, &idle, SIM_DT);
        }
        assert!(world.actors[1].cur.position.x < x_before - 50.0);
    }

    #[test]
    fn test_wall_strike_ends_kicked_flight() {
        let mut grid = ground_grid();
        for y in 0..10 {
            grid.set_solid(2, y, true);
        }
        let mut world = World::new(grid, Tuning::default(), VIEW, 42);
        world.spawn_with_probe(Vec2::new(260.0, 100.0), PROBE, Controller::input());
        world.spawn_with_probe(Vec2::new(285.0, 100.0), PROBE, Controller::input());

        let idle = TickInput::default();
        for _ in 0..200 {
            tick(&mut world, &idle, SIM_DT);
        }
        let kick = TickInput {
            kick: true,
            ..Default::default()
        };
        tick(&mut world, &kick, SIM_DT);
        assert!(world.actors[1].kick.is_kicked(world.tuning.kick_duration));

        // fly left until the wall column stops the victim
        let mut struck = false;
        for _ in 0..300 {
            tick(&mut world, &idle, SIM_DT);
            if world.actors[1].flags.left() {
                struck = true;
                break;
            }
        }
        assert!(struck);
        assert_eq!(world.actors[1].cur.position.x, 96.0);
        assert_eq!(world.actors[1].cur.velocity.x, 0.0);

        // the strike expires the kicked state on the following tick
        tick(&mut world, &idle, SIM_DT);
        assert!(!world.actors[1].kick.is_kicked(world.tuning.kick_duration));
        assert_eq!(world.actors[1].cur.position.x, 96.0);
    }

    #[test]
    fn test_kick_pose_roots_grounded_kicker() {
        let mut world = world_on_ground();
        world.spawn_with_probe(Vec2::new(100.0, 100.0), PROBE, Controller::input());

        let idle = TickInput::default();
        for _ in 0..200 {
            tick(&mut world, &idle, SIM_DT);
        }

        // kick with a direction held: the pose wins while it lasts
        let kick_and_right = TickInput {
            right: true,
            kick: true,
            ..Default::default()
        };
        tick(&mut world, &kick_and_right, SIM_DT);
        assert!(world.actors[0].kick.kicking);
        assert_eq!(world.actors[0].cur.position.x, 100.0);

        for _ in 0..5 {
            tick(&mut world, &kick_and_right, SIM_DT);
        }
        assert!(world.actors[0].kick.kicking);
        assert_eq!(world.actors[0].cur.position.x, 100.0);

        // once the pose times out the held key moves the actor again
        for _ in 0..20 {
            tick(&mut world, &kick_and_right, SIM_DT);
        }
        assert!(!world.actors[0].kick.kicking);
        assert!(world.actors[0].cur.position.x > 100.0);
    }

    #[test]
    fn test_determinism_same_seed_same_trajectory() {
        let mut grid = ground_grid();
        for y in 0..10 {
            grid.set_solid(0, y, true);
            grid.set_solid(19, y, true);
        }
        let mut w1 = World::new(grid.clone(), Tuning::default(), VIEW, 7);
        let mut w2 = World::new(grid, Tuning::default(), VIEW, 7);
        for w in [&mut w1, &mut w2] {
            w.spawn(Vec2::new(160.0, 200.0), Controller::input());
            w.spawn(Vec2::new(400.0, 200.0), Controller::ai());
        }

        for i in 0..500u32 {
            let input = TickInput {
                left: (200..300).contains(&i),
                right: i < 150,
                jump: i % 97 == 0,
                kick: i % 63 == 0,
            };
            tick(&mut w1, &input, SIM_DT);
            tick(&mut w2, &input, SIM_DT);
        }

        assert_eq!(w1.tick_count, w2.tick_count);
        assert_eq!(w1.rng, w2.rng);
        for (a, b) in w1.actors.iter().zip(&w2.actors) {
            assert_eq!(a.cur.position, b.cur.position);
            assert_eq!(a.cur.velocity, b.cur.velocity);
            assert_eq!(a.flags, b.flags);
            assert_eq!(a.anim.frame, b.anim.frame);
        }
        assert_eq!(w1.camera.cur.position, w2.camera.cur.position);
    }

    #[test]
    fn test_advance_caps_runaway_frames() {
        let mut world = world_on_ground();
        world.spawn_with_probe(Vec2::new(100.0, 100.0), PROBE, Controller::input());

        // a five second stall only pays for a quarter second of sim
        let steps = advance(&mut world, &TickInput::default(), 5.0);
        assert_eq!(steps, 25);
        assert!(world.accumulator >= 0.0);
        assert!(world.accumulator < SIM_DT as f64);
        assert!(render_alpha(&world) >= 0.0);
        assert!(render_alpha(&world) < 1.0);
    }

    #[test]
    fn test_advance_accumulates_small_frames() {
        let mut world = world_on_ground();
        world.spawn_with_probe(Vec2::new(100.0, 100.0), PROBE, Controller::input());

        let mut total = 0;
        for _ in 0..10 {
            total += advance(&mut world, &TickInput::default(), 1.0 / 60.0);
        }
        assert_eq!(total as u64, world.tick_count);
        // ten 60 Hz frames cover about a sixth of a second
        assert!((15..=17).contains(&total));
        assert!(world.accumulator < SIM_DT as f64);
    }

    #[test]
    fn test_interpolate_blends_and_snaps() {
        let prev = Vec2::new(10.25, 20.75);
        let cur = Vec2::new(13.25, 22.75);

        assert_eq!(
            interpolate(prev, cur, 0.0, InterpRounding::Floor),
            Vec2::new(10.0, 20.0)
        );
        assert_eq!(
            interpolate(prev, cur, 1.0, InterpRounding::Floor),
            Vec2::new(13.0, 22.0)
        );
        assert_eq!(
            interpolate(prev, cur, 0.5, InterpRounding::Floor),
            Vec2::new(11.0, 21.0)
        );
        assert_eq!(
            interpolate(prev, cur, 0.5, InterpRounding::Round),
            Vec2::new(12.0, 22.0)
        );
    }

    #[test]
    fn test_interpolation_honors_tuned_rounding() {
        // a tuning file can flip the snap policy and the blend must follow
        let tuning: Tuning = serde_json::from_str(r#"{"interp_rounding": "round"}"#).unwrap();
        let world = World::new(ground_grid(), tuning, VIEW, 42);

        let prev = Vec2::new(10.25, 20.75);
        let cur = Vec2::new(13.25, 22.75);
        assert_eq!(
            interpolate(prev, cur, 0.5, world.tuning.interp_rounding),
            Vec2::new(12.0, 22.0)
        );
        assert_ne!(
            world.tuning.interp_rounding,
            Tuning::default().interp_rounding
        );
    }

    #[test]
    fn test_camera_tracks_target_actor() {
        let mut world = world_on_ground();
        world.spawn_with_probe(Vec2::new(400.0, 100.0), PROBE, Controller::input());

        for _ in 0..400 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }

        let cam = world.camera.cur.position;
        assert!((cam.x - 400.0).abs() <= 8.0);
        assert!((cam.y - 243.0).abs() <= 8.0);
        // the spring rests inside the deadzone
        assert_eq!(world.camera.cur.velocity, Vec2::ZERO);
    }
}
