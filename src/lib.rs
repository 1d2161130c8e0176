//! Tilestep - a tile-grid platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, swept collision, actors)
//! - `geom`: Rectangle and axis primitives shared by sim and grid
//! - `grid`: Solid-tile map with coarse-then-exact overlap queries
//! - `loader`: PNG map decoding, one image pixel per tile
//! - `tuning`: Data-driven movement and gameplay balance

pub mod geom;
pub mod grid;
pub mod loader;
pub mod sim;
pub mod tuning;

pub use grid::TileGrid;
pub use tuning::{InterpRounding, Tuning};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (100 Hz)
    pub const SIM_DT: f32 = 0.01;
    /// Cap on wall-clock time drained per frame, to prevent spiral of death
    pub const MAX_FRAME_TIME: f64 = 0.25;
    /// Edge length of one map tile in pixels
    pub const TILE_SIZE: i32 = 32;
}
