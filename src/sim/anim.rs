//! Animation frame selection
//!
//! Runs after collision resolution so it sees the corrected velocity and
//! contact flags. Frames are sprite sheet indices: 0 standing, 1 airborne,
//! 2 walking, 3 kicking. The walk cycle alternates 2 and 1 on a timer.

use crate::sim::state::Actor;

/// Animation output for one actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimState {
    /// Sprite frame index
    pub frame: u32,
    /// Time into the walk cycle, -1 while the cycle is not running
    pub timer: f32,
    /// Render tilt in degrees, nonzero while kicked
    pub angle: f32,
}

impl Default for AnimState {
    fn default() -> Self {
        Self {
            frame: 0,
            timer: -1.0,
            angle: 0.0,
        }
    }
}

/// Pick this tick's frame for one resolved actor
pub fn select_frame(actor: &mut Actor, walk_period: f32, dt: f32) {
    let anim = &mut actor.anim;

    if actor.cur.velocity.x == 0.0 && actor.flags.bottom() {
        anim.frame = 0;
        anim.timer = -1.0;
    } else if !actor.flags.bottom() {
        anim.frame = 1;
        anim.timer = -1.0;
    } else {
        // grounded and moving: run the walk cycle
        if anim.timer == -1.0 {
            anim.frame = 2;
            anim.timer = 0.0;
        }
        anim.timer += dt;
        if anim.timer >= walk_period {
            anim.frame += 1;
            if anim.frame > 2 {
                anim.frame = 1;
            }
            anim.timer = 0.0;
        }
    }

    // the kicking pose overrides everything
    if actor.kick.kicking {
        anim.frame = 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::IRect;
    use crate::sim::state::CollisionFlags;
    use crate::sim::Controller;
    use crate::tuning::Tuning;
    use glam::Vec2;

    const PERIOD: f32 = 0.1;
    const DT: f32 = 0.01;

    fn actor() -> Actor {
        Actor::new(
            Vec2::new(100.0, 100.0),
            IRect::new(0, 0, 32, 77),
            Controller::input(),
            &Tuning::default(),
        )
    }

    #[test]
    fn test_standing_still_uses_frame_zero() {
        let mut a = actor();
        a.flags = CollisionFlags::BOTTOM;
        select_frame(&mut a, PERIOD, DT);
        assert_eq!(a.anim.frame, 0);
        assert_eq!(a.anim.timer, -1.0);
    }

    #[test]
    fn test_airborne_uses_frame_one() {
        let mut a = actor();
        a.cur.velocity = Vec2::new(250.0, -100.0);
        select_frame(&mut a, PERIOD, DT);
        assert_eq!(a.anim.frame, 1);
    }

    #[test]
    fn test_walk_cycle_alternates() {
        let mut a = actor();
        a.flags = CollisionFlags::BOTTOM;
        a.cur.velocity.x = 250.0;

        // the cycle opens on frame 2
        select_frame(&mut a, PERIOD, DT);
        assert_eq!(a.anim.frame, 2);

        // and flips between 2 and 1 every period from then on
        let mut seen = vec![a.anim.frame];
        for _ in 0..45 {
            select_frame(&mut a, PERIOD, DT);
            if seen.last() != Some(&a.anim.frame) {
                seen.push(a.anim.frame);
            }
        }
        assert!(seen.len() >= 4, "cycle never advanced: {seen:?}");
        for pair in seen.windows(2) {
            assert!(pair == [2, 1] || pair == [1, 2], "bad cycle: {seen:?}");
        }
    }

    #[test]
    fn test_stopping_resets_the_cycle() {
        let mut a = actor();
        a.flags = CollisionFlags::BOTTOM;
        a.cur.velocity.x = 250.0;
        for _ in 0..5 {
            select_frame(&mut a, PERIOD, DT);
        }
        assert!(a.anim.timer >= 0.0);

        a.cur.velocity.x = 0.0;
        select_frame(&mut a, PERIOD, DT);
        assert_eq!(a.anim.frame, 0);
        assert_eq!(a.anim.timer, -1.0);
    }

    #[test]
    fn test_kicking_pose_overrides() {
        let mut a = actor();
        a.flags = CollisionFlags::BOTTOM;
        a.kick.kicking = true;
        select_frame(&mut a, PERIOD, DT);
        assert_eq!(a.anim.frame, 3);
    }
}
