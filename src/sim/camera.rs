//! Camera follow
//!
//! The camera seeks its target with a proportional spring, clamped so the
//! view never leaves the map. It keeps the same previous/current state pair
//! as actors and is interpolated the same way at render time.

use glam::Vec2;

use crate::sim::state::KinematicState;
use crate::tuning::Tuning;

/// Scrolling camera centered on a tracked actor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub prev: KinematicState,
    pub cur: KinematicState,
    /// Index of the actor being tracked
    pub target: usize,
}

impl Camera {
    /// Seek `target` for one fixed step.
    ///
    /// Both the objective and the camera itself are clamped to
    /// `[view/2, map - view/2]` per axis, max applied before min so the far
    /// bound wins when the map is smaller than the view. Velocities below
    /// the deadzone are dropped to keep the resting camera pixel-stable.
    pub fn follow(&mut self, target: Vec2, view_size: Vec2, map_px: Vec2, tuning: &Tuning, dt: f32) {
        self.prev = self.cur;

        let min = view_size / 2.0;
        let max = map_px - view_size / 2.0;

        let objective = Vec2::new(
            target.x.max(min.x).min(max.x),
            target.y.max(min.y).min(max.y),
        );
        self.cur.position.x = self.cur.position.x.max(min.x).min(max.x);
        self.cur.position.y = self.cur.position.y.max(min.y).min(max.y);

        self.cur.velocity = (objective - self.cur.position) * tuning.camera_stiffness;
        if self.cur.velocity.x.abs() < tuning.camera_deadzone {
            self.cur.velocity.x = 0.0;
        }
        if self.cur.velocity.y.abs() < tuning.camera_deadzone {
            self.cur.velocity.y = 0.0;
        }

        self.cur.position += self.cur.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Vec2 = Vec2::new(640.0, 480.0);
    const MAP: Vec2 = Vec2::new(1280.0, 768.0);
    const DT: f32 = 0.01;

    #[test]
    fn test_deadzone_holds_camera_still() {
        let mut cam = Camera::default();
        cam.cur.position = Vec2::new(400.0, 300.0);

        cam.follow(Vec2::new(405.0, 300.0), VIEW, MAP, &Tuning::default(), DT);
        assert_eq!(cam.cur.position, Vec2::new(400.0, 300.0));
        assert_eq!(cam.cur.velocity, Vec2::ZERO);
        assert_eq!(cam.prev.position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_spring_moves_toward_target() {
        let mut cam = Camera::default();
        cam.cur.position = Vec2::new(400.0, 300.0);

        cam.follow(Vec2::new(500.0, 300.0), VIEW, MAP, &Tuning::default(), DT);
        assert!((cam.cur.position.x - 402.5).abs() < 1e-3);
        assert_eq!(cam.cur.position.y, 300.0);
        assert_eq!(cam.prev.position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_objective_and_camera_are_clamped_to_map() {
        let mut cam = Camera::default();
        cam.cur.position = Vec2::new(-50.0, 1000.0);

        cam.follow(Vec2::ZERO, VIEW, MAP, &Tuning::default(), DT);
        // x snaps to the near edge and rests there
        assert_eq!(cam.cur.position.x, 320.0);
        assert_eq!(cam.cur.velocity.x, 0.0);
        // y is pulled down from the far edge toward the objective
        assert!((cam.cur.position.y - 520.8).abs() < 1e-3);
        assert!(cam.cur.velocity.y < 0.0);
    }

    #[test]
    fn test_map_smaller_than_view_pins_to_far_bound() {
        let mut cam = Camera::default();
        cam.cur.position = Vec2::new(200.0, 200.0);
        let map = Vec2::new(320.0, 320.0);

        cam.follow(Vec2::new(9000.0, 9000.0), VIEW, map, &Tuning::default(), DT);
        assert_eq!(cam.cur.position, Vec2::new(0.0, 80.0));
        assert_eq!(cam.cur.velocity, Vec2::ZERO);
    }
}
