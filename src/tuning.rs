//! Data-driven movement and gameplay balance
//!
//! Defaults are the reference feel. The demo binary can override them from a
//! JSON file; missing fields keep their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rounding applied to interpolated render positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpRounding {
    /// Floor each component. Slow steady motion lands on a pixel one frame
    /// late rather than jittering between neighbors.
    #[default]
    Floor,
    /// Round half away from zero
    Round,
}

impl InterpRounding {
    #[inline]
    pub fn apply(self, v: f32) -> f32 {
        match self {
            InterpRounding::Floor => v.floor(),
            InterpRounding::Round => v.round(),
        }
    }
}

/// Movement and gameplay numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal walk speed, px/s
    pub walk_speed: f32,
    /// Upward velocity applied on jump, px/s
    pub jump_impulse: f32,
    /// Downward acceleration, px/s²
    pub gravity: f32,
    /// Velocity given to a kicked actor; the x sign follows the kicker's
    /// facing
    pub kick_velocity: Vec2,
    /// How long an actor stays kicked, seconds
    pub kick_duration: f32,
    /// Per-tick decay factor on kicked horizontal velocity while grounded
    pub kick_ground_friction: f32,
    /// Camera spring gain, 1/s
    pub camera_stiffness: f32,
    /// Camera spring velocities under this magnitude are zeroed, px/s
    pub camera_deadzone: f32,
    /// Seconds between AI decision rolls
    pub ai_decision_period: f32,
    /// Seconds per walk-cycle animation frame
    pub walk_anim_period: f32,
    /// Rounding for interpolated render positions
    pub interp_rounding: InterpRounding,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            walk_speed: 250.0,
            jump_impulse: 550.0,
            gravity: 9.8 * 150.0,
            kick_velocity: Vec2::new(300.0, -500.0),
            kick_duration: 1.5,
            kick_ground_friction: 0.99,
            camera_stiffness: 2.5,
            camera_deadzone: 20.0,
            ai_decision_period: 1.0,
            walk_anim_period: 0.1,
            interp_rounding: InterpRounding::default(),
        }
    }
}

impl Tuning {
    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_feel() {
        let t = Tuning::default();
        assert_eq!(t.walk_speed, 250.0);
        assert_eq!(t.jump_impulse, 550.0);
        assert_eq!(t.gravity, 1470.0);
        assert_eq!(t.kick_velocity, Vec2::new(300.0, -500.0));
        assert_eq!(t.interp_rounding, InterpRounding::Floor);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"walk_speed": 300.0}"#).unwrap();
        assert_eq!(t.walk_speed, 300.0);
        assert_eq!(t.jump_impulse, 550.0);
        assert_eq!(t.gravity, 1470.0);
    }

    #[test]
    fn test_rounding_policy_json_names() {
        let t: Tuning = serde_json::from_str(r#"{"interp_rounding": "round"}"#).unwrap();
        assert_eq!(t.interp_rounding, InterpRounding::Round);
    }

    #[test]
    fn test_rounding_apply() {
        assert_eq!(InterpRounding::Floor.apply(2.7), 2.0);
        assert_eq!(InterpRounding::Floor.apply(-0.3), -1.0);
        assert_eq!(InterpRounding::Round.apply(2.5), 3.0);
        assert_eq!(InterpRounding::Round.apply(-0.5), -1.0);
        assert_eq!(InterpRounding::Round.apply(2.4), 2.0);
    }
}
