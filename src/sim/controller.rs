//! Actor intent
//!
//! Controllers turn observations into a per-tick [`Intent`]. The input
//! controller follows the keys snapshot fed into the tick; the AI controller
//! wanders on a fixed cadence, jumps off walls, and occasionally kicks.
//! Neither runs while its actor is kicked, so AI timers freeze mid-flight.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::state::CollisionFlags;
use crate::sim::tick::TickInput;
use crate::tuning::Tuning;

/// Desired horizontal motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkDir {
    #[default]
    None,
    Left,
    Right,
}

/// What an actor wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub walk: WalkDir,
    pub jump: bool,
    pub kick: bool,
}

/// Edge tracker for the input-driven controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    /// The kick key was down last tick; kicks fire on the rising edge only
    kick_held: bool,
}

/// Wander state for the AI controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AiState {
    /// Seconds since the last decision roll
    pub decision_timer: f32,
    pub walk_dir: WalkDir,
    /// A wall strike armed a jump for the next grounded tick
    pub will_jump: bool,
    pub will_jump_dir: WalkDir,
    /// Latched on any contact; forces a walk re-roll at the next decision
    pub collided: bool,
}

/// Decides per-tick intent for one actor
#[derive(Debug, Clone, PartialEq)]
pub enum Controller {
    /// Follows the keys snapshot
    Input(InputState),
    /// Seeded wanderer
    Ai(AiState),
}

impl Controller {
    pub fn input() -> Self {
        Controller::Input(InputState::default())
    }

    pub fn ai() -> Self {
        Controller::Ai(AiState::default())
    }

    /// Produce this tick's intent.
    ///
    /// `flags` are last tick's collision sides, `kicking` is the actor's
    /// active kicking pose, `overlapping` is whether its probe currently
    /// touches another actor's.
    pub fn decide(
        &mut self,
        flags: CollisionFlags,
        kicking: bool,
        overlapping: bool,
        input: &TickInput,
        rng: &mut Pcg32,
        tuning: &Tuning,
        dt: f32,
    ) -> Intent {
        match self {
            Controller::Input(state) => {
                let mut intent = Intent::default();
                if input.right {
                    intent.walk = WalkDir::Right;
                } else if input.left {
                    intent.walk = WalkDir::Left;
                }
                intent.jump = input.jump;
                intent.kick = input.kick && !state.kick_held;
                state.kick_held = input.kick;
                intent
            }
            Controller::Ai(ai) => ai.decide(flags, kicking, overlapping, rng, tuning, dt),
        }
    }
}

impl AiState {
    fn decide(
        &mut self,
        flags: CollisionFlags,
        kicking: bool,
        overlapping: bool,
        rng: &mut Pcg32,
        tuning: &Tuning,
        dt: f32,
    ) -> Intent {
        let mut intent = Intent::default();

        if flags.any() {
            self.collided = true;
        }

        // rare kick when brushing against someone
        let kick_now = overlapping && rng.random_range(0..100) < 1;
        intent.kick = kick_now;

        // a wall strike arms a jump, usually pushing back into the wall
        if flags.right() {
            self.will_jump = true;
            self.will_jump_dir = if rng.random_range(0..10) < 7 {
                WalkDir::Right
            } else {
                WalkDir::Left
            };
        } else if flags.left() {
            self.will_jump = true;
            self.will_jump_dir = if rng.random_range(0..10) < 7 {
                WalkDir::Left
            } else {
                WalkDir::Right
            };
        }

        if self.decision_timer >= tuning.ai_decision_period && !(kicking || kick_now) {
            self.decision_timer = 0.0;

            if flags.bottom() && rng.random_range(0..100) < 20 {
                intent.jump = true;
            }

            if self.walk_dir == WalkDir::None || self.collided || rng.random_range(0..100) < 10 {
                self.walk_dir = match rng.random_range(0..3) {
                    0 => WalkDir::Right,
                    1 => WalkDir::Left,
                    _ => WalkDir::None,
                };
            }
        }

        self.decision_timer += dt;

        if flags.bottom() && self.will_jump {
            self.will_jump = false;
            intent.jump = true;
            self.walk_dir = self.will_jump_dir;
            self.decision_timer = 0.0;
        }

        intent.walk = self.walk_dir;
        intent
    }
}
