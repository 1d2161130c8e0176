//! Simulation state: actors, their collision flags, and the world that
//! owns them

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::geom::{IRect, Rect};
use crate::grid::TileGrid;
use crate::sim::anim::AnimState;
use crate::sim::camera::Camera;
use crate::sim::controller::Controller;
use crate::tuning::Tuning;

bitflags::bitflags! {
    /// Sides of an actor's probe that touched solid tiles during the last
    /// resolution
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CollisionFlags: u8 {
        const TOP = 0x01;
        const BOTTOM = 0x02;
        const LEFT = 0x04;
        const RIGHT = 0x08;
    }
}

impl CollisionFlags {
    #[inline]
    pub fn top(self) -> bool {
        self.contains(Self::TOP)
    }

    #[inline]
    pub fn bottom(self) -> bool {
        self.contains(Self::BOTTOM)
    }

    #[inline]
    pub fn left(self) -> bool {
        self.contains(Self::LEFT)
    }

    #[inline]
    pub fn right(self) -> bool {
        self.contains(Self::RIGHT)
    }

    #[inline]
    pub fn any(self) -> bool {
        !self.is_empty()
    }
}

/// Position and velocity, double-buffered per actor so rendering can
/// interpolate between ticks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl KinematicState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }
}

/// Horizontal facing. The character art faces left, so facing right renders
/// mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn sign_x(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// True when the sprite renders horizontally mirrored
    #[inline]
    pub fn flipped(self) -> bool {
        self == Facing::Right
    }
}

/// Kick interaction state, covering both delivering and receiving
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickState {
    /// Seconds spent kicked; past the kick duration means not kicked
    pub kicked_timer: f32,
    /// The vertical kick velocity has not been applied yet
    pub pending_impulse: bool,
    /// Velocity imparted by the kicker
    pub kicked_vel: Vec2,
    /// The kicking pose is active
    pub kicking: bool,
    /// Simulation time when the kicking pose began
    pub kick_started: f64,
}

impl KickState {
    /// Fresh state, not kicked and not kicking
    pub fn idle(kick_duration: f32) -> Self {
        Self {
            kicked_timer: kick_duration + 1.0,
            pending_impulse: false,
            kicked_vel: Vec2::ZERO,
            kicking: false,
            kick_started: -1.0,
        }
    }

    #[inline]
    pub fn is_kicked(&self, kick_duration: f32) -> bool {
        self.kicked_timer <= kick_duration
    }
}

/// Collision probe for the standard 52x80 character sprite: anchored at the
/// feet, inset 10 px from the sprite's left edge and 2 px from its top
pub const CHARACTER_PROBE: IRect = IRect {
    x: -16,
    y: -77,
    width: 32,
    height: 77,
};

/// One simulated character
#[derive(Debug, Clone)]
pub struct Actor {
    /// State at the start of the tick, kept for render interpolation
    pub prev: KinematicState,
    /// State being advanced
    pub cur: KinematicState,
    /// Constant acceleration; gravity in practice
    pub accel: Vec2,
    pub flags: CollisionFlags,
    pub facing: Facing,
    /// Collision probe as an offset box around the position anchor
    pub probe: IRect,
    pub controller: Controller,
    pub kick: KickState,
    pub anim: AnimState,
}

impl Actor {
    pub fn new(position: Vec2, probe: IRect, controller: Controller, tuning: &Tuning) -> Self {
        let state = KinematicState::at(position);
        Self {
            prev: state,
            cur: state,
            accel: Vec2::new(0.0, tuning.gravity),
            flags: CollisionFlags::empty(),
            facing: Facing::default(),
            probe,
            controller,
            kick: KickState::idle(tuning.kick_duration),
            anim: AnimState::default(),
        }
    }

    /// Probe rectangle in world space at the current position
    #[inline]
    pub fn probe_box(&self) -> Rect {
        self.probe.at(self.cur.position)
    }

    /// Become kicked by an actor facing `kicker_facing`
    pub fn receive_kick(&mut self, kicker_facing: Facing, tuning: &Tuning) {
        self.kick.pending_impulse = true;
        self.kick.kicked_timer = 0.0;
        self.kick.kicked_vel = Vec2::new(
            tuning.kick_velocity.x * kicker_facing.sign_x(),
            tuning.kick_velocity.y,
        );
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub grid: TileGrid,
    pub tuning: Tuning,
    pub actors: Vec<Actor>,
    pub camera: Camera,
    /// View size in pixels; bounds the camera, not the actors
    pub view_size: Vec2,
    pub rng: Pcg32,
    pub seed: u64,
    /// Simulation clock, advanced by dt every tick
    pub time: f64,
    pub tick_count: u64,
    /// Wall-clock time not yet consumed by fixed steps
    pub accumulator: f64,
}

impl World {
    pub fn new(grid: TileGrid, tuning: Tuning, view_size: Vec2, seed: u64) -> Self {
        log::info!(
            "New world: {}x{} tiles, view {}x{}, seed {}",
            grid.width(),
            grid.height(),
            view_size.x,
            view_size.y,
            seed
        );
        Self {
            grid,
            tuning,
            actors: Vec::new(),
            camera: Camera::default(),
            view_size,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            time: 0.0,
            tick_count: 0,
            accumulator: 0.0,
        }
    }

    /// Spawn a character-sized actor, returning its index
    pub fn spawn(&mut self, position: Vec2, controller: Controller) -> usize {
        self.spawn_with_probe(position, CHARACTER_PROBE, controller)
    }

    /// Spawn with a custom probe box, returning the actor index
    pub fn spawn_with_probe(
        &mut self,
        position: Vec2,
        probe: IRect,
        controller: Controller,
    ) -> usize {
        let actor = Actor::new(position, probe, controller, &self.tuning);
        self.actors.push(actor);
        self.actors.len() - 1
    }
}
