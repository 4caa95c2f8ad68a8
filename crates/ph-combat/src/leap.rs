//! Jump kinematics for the hop-back and leap animation events.

use ph_core::{Angles, Vec3};

/// Height the creature is lifted off the ground before a leap so the host
/// does not immediately re-ground it.
pub const LEAP_LIFT: f32 = 1.0;

const HOP_BACK_SPEED: f32 = 200.0;
const HOP_BACK_HEIGHT: f32 = 36.0;
const LEAP_MIN_HEIGHT: f32 = 16.0;
const LEAP_MAX_HEIGHT: f32 = 120.0;
const LEAP_MAX_SPEED: f32 = 650.0;
const BLIND_HOP_SPEED: f32 = 350.0;

/// Backwards hop: `forward × -200` plus the vertical speed that clears 36 units.
pub fn hop_back_velocity(angles: Angles, gravity: f32) -> Vec3 {
    let mut v = angles.forward() * -HOP_BACK_SPEED;
    v.z += (2.0 * gravity.max(0.0) * HOP_BACK_HEIGHT).sqrt();
    v
}

/// Ballistic leap from `origin` toward `enemy_eye`.
///
/// The apex height is the eye height above `origin`, clamped to `[16, 120]`;
/// horizontal speed is scaled so the leap arrives at the apex, and the whole
/// vector is capped at 650 u/s.  Without an enemy the creature hops blindly
/// along its facing.  `gravity` is floored at 1.
pub fn leap_velocity(origin: Vec3, angles: Angles, enemy_eye: Option<Vec3>, gravity: f32) -> Vec3 {
    let Some(eye) = enemy_eye else {
        let (forward, _, up) = angles.basis();
        return Vec3::new(forward.x, forward.y, up.z) * BLIND_HOP_SPEED;
    };

    let gravity = gravity.max(1.0);
    let height = (eye.z - origin.z).clamp(LEAP_MIN_HEIGHT, LEAP_MAX_HEIGHT);
    let speed = (2.0 * gravity * height).sqrt();
    let time = speed / gravity;

    let mut v = (eye - origin) / time;
    v.z = speed;

    let len = v.length();
    if len > LEAP_MAX_SPEED {
        v = v * (LEAP_MAX_SPEED / len);
    }
    v
}
