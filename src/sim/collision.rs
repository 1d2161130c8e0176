//! Swept tile collision
//!
//! The tricky part of the sim: an actor must never pass through a tile no
//! matter how far one tick moves it. The sweep walks integer pixel positions
//! from the previous state toward the current one along the faster axis,
//! carrying the slower axis along proportionally, and tests the probe
//! rectangle at every step. The first blocked step is backed up one fast-axis
//! pixel; if the probe still overlaps, the slower axis caused the contact.
//! The blocked axis gets its position clamped to the last clear integer and
//! its velocity zeroed; corner contacts settle over two passes.

use glam::{IVec2, Vec2};

use crate::geom::{Axis, IRect};
use crate::grid::TileGrid;
use crate::sim::state::{Actor, CollisionFlags, KinematicState};

fn side_of(axis: Axis, positive: bool) -> CollisionFlags {
    match (axis, positive) {
        (Axis::X, true) => CollisionFlags::RIGHT,
        (Axis::X, false) => CollisionFlags::LEFT,
        (Axis::Y, true) => CollisionFlags::BOTTOM,
        (Axis::Y, false) => CollisionFlags::TOP,
    }
}

/// One swept pass of `probe` from `prev` to `cur` against the grid.
///
/// On contact, sets the side flag, zeroes the blocked axis velocity, clamps
/// the blocked axis position in both states to the last clear integer, and
/// returns true. Both states are taken `&mut` so a second pass continues
/// from the corrected coordinates; pass a scratch copy of the stored
/// previous state if it must survive for interpolation.
pub fn sweep_probe(
    prev: &mut KinematicState,
    cur: &mut KinematicState,
    probe: IRect,
    grid: &TileGrid,
    flags: &mut CollisionFlags,
) -> bool {
    let mut p1 = IVec2::ZERO;
    let mut p2 = IVec2::ZERO;

    // Integer endpoints, rounded conservatively outward along the motion
    for axis in [Axis::X, Axis::Y] {
        let i = axis.index();
        if cur.position[i] > prev.position[i] {
            p1[i] = prev.position[i].floor() as i32;
            p2[i] = cur.position[i].ceil() as i32;
        } else {
            p1[i] = prev.position[i].ceil() as i32;
            p2[i] = cur.position[i].floor() as i32;
        }
    }

    if p1 == p2 {
        return false;
    }

    // Cheap rejection: the whole motion fits inside the union of the two
    // endpoint probes
    let swept = probe.translate(p1).union(&probe.translate(p2));
    if !grid.overlaps_solid(&swept) {
        return false;
    }

    // Ties go to y, so vertical resolution wins for diagonal falls
    let fast = if cur.velocity.x.abs() > cur.velocity.y.abs() {
        Axis::X
    } else {
        Axis::Y
    };
    let slow = fast.other();
    let fi = fast.index();
    let si = slow.index();

    let dm: i32 = if p2[fi] > p1[fi] { 1 } else { -1 };
    let fast_speed = cur.velocity[fi].abs();
    let ds = if fast_speed > 0.0 {
        cur.velocity[si] / fast_speed
    } else {
        0.0
    };
    let slow_step = |offset: f32| -> i32 {
        if ds > 0.0 {
            offset.ceil() as i32
        } else {
            offset.floor() as i32
        }
    };

    let mut offset_slow = p1[si] as f32;
    let mut p = p1;
    let mut last_clear = p;

    // Skip the first step; the previous position is known clear
    offset_slow += ds;
    p[si] = slow_step(offset_slow);
    p[fi] += dm;

    let steps = (p2[fi] - p1[fi]).abs();
    for _ in 0..steps {
        if grid.overlaps_solid(&probe.translate(p)) {
            // Back the fast axis up one step. Still blocked means the slow
            // axis drifted into something.
            p[fi] = last_clear[fi];
            let slow_caused = grid.overlaps_solid(&probe.translate(p));

            let (axis, positive, ai) = if slow_caused {
                (slow, cur.velocity[si] > 0.0, si)
            } else {
                (fast, dm > 0, fi)
            };
            flags.insert(side_of(axis, positive));

            let clamped = last_clear[ai] as f32;
            cur.velocity[ai] = 0.0;
            prev.position[ai] = clamped;
            cur.position[ai] = clamped;
            return true;
        }

        last_clear = p;
        if ds != 0.0 {
            offset_slow += ds;
            p[si] = slow_step(offset_slow);
        }
        p[fi] += dm;
    }

    false
}

/// Reset an actor's flags and resolve its motion against the grid.
///
/// Runs a first sweep if the actor is moving at all, and a second if the
/// first both collided and left some velocity, so a corner contact resolves
/// the remaining axis. The sweeps clamp a scratch copy of the previous
/// state; the stored one keeps its value for render interpolation.
pub fn resolve_actor(actor: &mut Actor, grid: &TileGrid) {
    actor.flags = CollisionFlags::empty();
    let mut scratch = actor.prev;

    if actor.cur.velocity != Vec2::ZERO {
        sweep_probe(
            &mut scratch,
            &mut actor.cur,
            actor.probe,
            grid,
            &mut actor.flags,
        );
    }

    if actor.flags.any() && actor.cur.velocity != Vec2::ZERO {
        sweep_probe(
            &mut scratch,
            &mut actor.cur,
            actor.probe,
            grid,
            &mut actor.flags,
        );
    }
}
