//! Position integration and reflection against the visible bounds.
//!
//! Two traversal modes share [`MotionState`]:
//!
//! - **Bounce**: velocity integration, then per-axis clamping. An axis that
//!   crossed its bound lands exactly on the bound and its velocity is re-signed
//!   to point back inside. Speed magnitudes never change on a bounce.
//! - **Float**: position is a triangle wave of elapsed time, so each axis
//!   crosses bound-to-bound in exactly its configured number of seconds no
//!   matter how often the host ticks.

#[cfg(test)]
#[path = "motion_test.rs"]
mod motion_test;

use rand::Rng;

use crate::camera::{Vec3, VisibleBounds};
use crate::consts::{BASE_SPEED, DEPTH_BOUND, DEPTH_SPEED_SCALE, RESET_SPREAD};

/// Which axes reflected during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Bounce {
    #[must_use]
    pub fn any(self) -> bool {
        self.x || self.y || self.z
    }
}

/// Mutable simulation state for one preview session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub position: Vec3,
    /// World units per second at speed factor 1.
    pub velocity: Vec3,
    /// Triangle-wave phase per planar axis for float mode, in `[0, 2)`.
    pub float_phase: (f64, f64),
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::new(BASE_SPEED, BASE_SPEED * 0.75, BASE_SPEED * 0.5),
            float_phase: (0.0, 0.0),
        }
    }
}

impl MotionState {
    #[must_use]
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity, float_phase: (0.0, 0.0) }
    }

    /// Random start: anywhere in the reset box, random planar heading at
    /// [`BASE_SPEED`], random depth drift.
    pub fn randomized<R: Rng>(rng: &mut R) -> Self {
        let [sx, sy, sz] = RESET_SPREAD;
        let position = Vec3::new(
            rng.random_range(-sx..=sx),
            rng.random_range(-sy..=sy),
            rng.random_range(-sz..=sz),
        );
        let heading = rng.random_range(0.0..std::f64::consts::TAU);
        let velocity = Vec3::new(
            heading.cos() * BASE_SPEED,
            heading.sin() * BASE_SPEED,
            rng.random_range(-BASE_SPEED / 2.0..=BASE_SPEED / 2.0),
        );
        let float_phase = (rng.random_range(0.0..2.0), rng.random_range(0.0..2.0));
        Self { position, velocity, float_phase }
    }

    /// Advance the position by `dt` seconds without any bounds check.
    pub fn integrate(&mut self, speed_factor: f64, dt: f64) {
        let step = speed_factor * dt;
        self.position.x += self.velocity.x * step;
        self.position.y += self.velocity.y * step;
        self.position.z += self.velocity.z * step * DEPTH_SPEED_SCALE;
    }

    /// Clamp each axis into `[-bound, bound]`, re-signing the velocity of
    /// every axis that was outside.
    pub fn reflect(&mut self, bounds: VisibleBounds) -> Bounce {
        Bounce {
            x: reflect_axis(&mut self.position.x, &mut self.velocity.x, bounds.x),
            y: reflect_axis(&mut self.position.y, &mut self.velocity.y, bounds.y),
            z: reflect_axis(&mut self.position.z, &mut self.velocity.z, bounds.z),
        }
    }

    /// One bounce-mode tick.
    ///
    /// `bounds_at` gives the planar bounds at a depth. It is asked at the
    /// depth the object ends up at, clamped to the depth range, so the
    /// planar containment holds after the depth reflection too.
    pub fn step<F>(&mut self, speed_factor: f64, dt: f64, bounds_at: F) -> Bounce
    where
        F: FnOnce(f64) -> VisibleBounds,
    {
        self.integrate(speed_factor, dt);
        let depth = self.position.z.clamp(-DEPTH_BOUND, DEPTH_BOUND);
        self.reflect(bounds_at(depth))
    }

    /// Float-mode position at `elapsed` seconds into the session.
    ///
    /// Updates and returns `position`; `z` is pinned to the focal plane.
    pub fn float_to(&mut self, elapsed: f64, traverse_secs: (f64, f64), bounds: VisibleBounds) -> Vec3 {
        let (secs_x, secs_y) = traverse_secs;
        let (phase_x, phase_y) = self.float_phase;
        self.position = Vec3::new(
            sweep(bounds.x, triangle_wave(elapsed / secs_x + phase_x)),
            sweep(bounds.y, triangle_wave(elapsed / secs_y + phase_y)),
            0.0,
        );
        self.position
    }
}

fn reflect_axis(position: &mut f64, velocity: &mut f64, bound: f64) -> bool {
    if *position > bound {
        *position = bound;
        *velocity = -velocity.abs();
        true
    } else if *position < -bound {
        *position = -bound;
        *velocity = velocity.abs();
        true
    } else {
        false
    }
}

/// Map `t` in `[0, 1]` onto `[-bound, bound]`.
fn sweep(bound: f64, t: f64) -> f64 {
    -bound + 2.0 * bound * t
}

/// Triangle wave with period 2: rises `0 → 1` over `[0, 1]`, falls back over `[1, 2]`.
#[must_use]
pub fn triangle_wave(u: f64) -> f64 {
    let p = u.rem_euclid(2.0);
    if p <= 1.0 { p } else { 2.0 - p }
}
