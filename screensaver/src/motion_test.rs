#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn bounds() -> VisibleBounds {
    VisibleBounds::new(60.0, 40.0, 30.0)
}

// =============================================================
// Integration
// =============================================================

#[test]
fn integrate_scales_by_speed_and_dt() {
    let mut state = MotionState::new(Vec3::ZERO, Vec3::new(2.0, -4.0, 8.0));
    state.integrate(5.0, 0.5);
    assert!(approx_eq(state.position.x, 5.0));
    assert!(approx_eq(state.position.y, -10.0));
    // Depth moves at half rate.
    assert!(approx_eq(state.position.z, 10.0));
}

#[test]
fn integrate_is_tick_rate_independent() {
    let mut coarse = MotionState::new(Vec3::ZERO, Vec3::new(3.0, 1.0, 0.0));
    let mut fine = coarse;
    coarse.integrate(2.0, 1.0);
    for _ in 0..60 {
        fine.integrate(2.0, 1.0 / 60.0);
    }
    assert!((coarse.position.x - fine.position.x).abs() < 1e-9);
    assert!((coarse.position.y - fine.position.y).abs() < 1e-9);
}

#[test]
fn step_inside_bounds_does_not_bounce() {
    let mut state = MotionState::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
    let bounce = state.step(1.0, 1.0, |_| bounds());
    assert!(!bounce.any());
    assert_eq!(state.velocity, Vec3::new(1.0, 1.0, 1.0));
}

// =============================================================
// Reflection
// =============================================================

#[test]
fn crossing_positive_bound_lands_on_bound_and_flips_sign() {
    let mut state = MotionState::new(Vec3::new(59.0, 0.0, 0.0), Vec3::new(6.0, 0.0, 0.0));
    let bounce = state.step(1.0, 1.0, |_| bounds());
    assert!(bounce.x);
    assert_eq!(state.position.x, 60.0);
    assert_eq!(state.velocity.x, -6.0);
}

#[test]
fn crossing_negative_bound_lands_on_bound_and_flips_sign() {
    let mut state = MotionState::new(Vec3::new(0.0, -39.5, 0.0), Vec3::new(0.0, -2.0, 0.0));
    let bounce = state.step(1.0, 1.0, |_| bounds());
    assert!(bounce.y);
    assert!(!bounce.x);
    assert_eq!(state.position.y, -40.0);
    assert_eq!(state.velocity.y, 2.0);
}

#[test]
fn depth_reflects_against_fixed_range() {
    let mut state = MotionState::new(Vec3::new(0.0, 0.0, 29.0), Vec3::new(0.0, 0.0, 10.0));
    let bounce = state.step(1.0, 1.0, |_| bounds());
    assert!(bounce.z);
    assert_eq!(state.position.z, 30.0);
    assert_eq!(state.velocity.z, -10.0);
}

#[test]
fn reflect_re_signs_instead_of_negating() {
    // Already heading back inside after the bounds shrank: keep heading inside.
    let mut state = MotionState::new(Vec3::new(70.0, 0.0, 0.0), Vec3::new(-3.0, 0.0, 0.0));
    state.reflect(bounds());
    assert_eq!(state.position.x, 60.0);
    assert_eq!(state.velocity.x, -3.0);
}

#[test]
fn bounce_conserves_speed_magnitude() {
    let mut state = MotionState::new(Vec3::ZERO, Vec3::new(4.5, -3.25, 1.5));
    for _ in 0..10_000 {
        state.step(5.0, 1.0 / 60.0, |_| bounds());
        assert_eq!(state.velocity.x.abs(), 4.5);
        assert_eq!(state.velocity.y.abs(), 3.25);
        assert_eq!(state.velocity.z.abs(), 1.5);
    }
}

#[test]
fn position_stays_within_bounds_for_any_tick_count() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut state = MotionState::randomized(&mut rng);
    for n in 0..5_000 {
        let dt = rng.random_range(0.0..0.1);
        state.step(10.0, dt, |_| bounds());
        assert!(bounds().contains(state.position), "tick {n}: {:?}", state.position);
    }
}

#[test]
fn huge_dt_still_lands_inside() {
    let mut state = MotionState::new(Vec3::ZERO, Vec3::new(6.0, 6.0, 6.0));
    state.step(10.0, 600.0, |_| bounds());
    assert!(bounds().contains(state.position));
}

#[test]
fn degenerate_bounds_oscillate_without_panicking() {
    let narrow = VisibleBounds::new(-2.0, 40.0, 30.0);
    let mut state = MotionState::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
    let mut seen = Vec::new();
    for _ in 0..4 {
        let bounce = state.step(1.0, 0.1, |_| narrow);
        assert!(bounce.x);
        assert_eq!(state.position.x.abs(), 2.0);
        seen.push(state.position.x);
    }
    assert!(seen.contains(&2.0) && seen.contains(&-2.0));
}

#[test]
fn step_asks_bounds_at_clamped_final_depth() {
    let mut state = MotionState::new(Vec3::new(0.0, 0.0, 29.0), Vec3::new(0.0, 0.0, 10.0));
    let mut asked = None;
    state.step(1.0, 1.0, |depth| {
        asked = Some(depth);
        bounds()
    });
    assert_eq!(asked, Some(30.0));
}

// =============================================================
// Reset
// =============================================================

#[test]
fn randomized_is_reproducible_for_same_seed() {
    let a = MotionState::randomized(&mut SmallRng::seed_from_u64(42));
    let b = MotionState::randomized(&mut SmallRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn randomized_stays_in_reset_box_with_base_speed() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..200 {
        let state = MotionState::randomized(&mut rng);
        assert!(state.position.x.abs() <= 30.0);
        assert!(state.position.y.abs() <= 20.0);
        assert!(state.position.z.abs() <= 15.0);
        let planar = state.velocity.x.hypot(state.velocity.y);
        assert!((planar - BASE_SPEED).abs() < 1e-9);
        assert!(state.velocity.z.abs() <= BASE_SPEED / 2.0);
        assert!((0.0..2.0).contains(&state.float_phase.0));
    }
}

// =============================================================
// Float mode
// =============================================================

#[test]
fn triangle_wave_shape() {
    assert_eq!(triangle_wave(0.0), 0.0);
    assert_eq!(triangle_wave(0.5), 0.5);
    assert_eq!(triangle_wave(1.0), 1.0);
    assert_eq!(triangle_wave(1.5), 0.5);
    assert_eq!(triangle_wave(2.0), 0.0);
    assert_eq!(triangle_wave(-0.5), 0.5);
}

#[test]
fn float_crosses_full_width_in_configured_seconds() {
    let mut state = MotionState::default();
    let b = bounds();
    let start = state.float_to(0.0, (22.0, 27.0), b);
    assert_eq!(start.x, -60.0);
    assert_eq!(start.y, -40.0);

    let across = state.float_to(22.0, (22.0, 27.0), b);
    assert!(approx_eq(across.x, 60.0));

    let down = state.float_to(27.0, (22.0, 27.0), b);
    assert!(approx_eq(down.y, 40.0));

    let back = state.float_to(44.0, (22.0, 27.0), b);
    assert!(approx_eq(back.x, -60.0));
}

#[test]
fn float_position_is_a_function_of_time_only() {
    let b = bounds();
    let mut ticked = MotionState::default();
    for i in 0..=600 {
        ticked.float_to(f64::from(i) / 60.0, (5.0, 7.0), b);
    }
    let mut direct = MotionState::default();
    let jumped = direct.float_to(10.0, (5.0, 7.0), b);
    assert_eq!(ticked.position, jumped);
}

#[test]
fn float_respects_phase_and_bounds() {
    let mut state = MotionState { float_phase: (1.0, 0.5), ..MotionState::default() };
    let p = state.float_to(0.0, (10.0, 10.0), bounds());
    assert_eq!(p.x, 60.0);
    assert!(approx_eq(p.y, 0.0));
    assert_eq!(p.z, 0.0);
}
