//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable actor order (spawn order, never reordered)
//! - No rendering or platform dependencies

pub mod anim;
pub mod camera;
pub mod collision;
pub mod controller;
pub mod state;
pub mod tick;

pub use anim::AnimState;
pub use camera::Camera;
pub use collision::{resolve_actor, sweep_probe};
pub use controller::{AiState, Controller, Intent, WalkDir};
pub use state::{
    Actor, CollisionFlags, Facing, KickState, KinematicState, World, CHARACTER_PROBE,
};
pub use tick::{advance, interpolate, render_alpha, tick, TickInput};
