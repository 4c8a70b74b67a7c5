//! Rotation styles: named orientation presets driven by elapsed time.
//!
//! A configured [`RotationStyle`] may be `Random`; it is resolved to a
//! [`ConcreteStyle`] once, when a preview session starts, and stays fixed for
//! that session. Orientation is then a pure function of the concrete style,
//! the configured amplitudes and frequencies, and seconds since session start.

#[cfg(test)]
#[path = "rotation_test.rs"]
mod rotation_test;

use std::f64::consts::TAU;

use rand::Rng;
use serde::Serialize;

use crate::camera::Vec3;
use crate::config::{Configuration, RotationStyle};
use crate::consts::{IDLE_SPIN_RAD_PER_SEC, WOBBLE_PHASE_OFFSET};

/// Euler angles in radians, applied X then Y then Z.
pub type Orientation = Vec3;

/// A rotation style with `Random` already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcreteStyle {
    /// Slow idle spin about Y so the text never sits perfectly still.
    None,
    /// Base tumble on X and Y plus sinusoidal nodding, Y leading X by π/3.
    Wobble,
    /// X and Y rock with the same frequency and opposite sign.
    SeeSaw,
    /// Continuous turn about Y with a rocking roll about Z.
    Spin,
}

impl ConcreteStyle {
    pub const ALL: [Self; 4] = [Self::None, Self::Wobble, Self::SeeSaw, Self::Spin];

    #[must_use]
    pub fn as_style(self) -> RotationStyle {
        match self {
            Self::None => RotationStyle::None,
            Self::Wobble => RotationStyle::Wobble,
            Self::SeeSaw => RotationStyle::SeeSaw,
            Self::Spin => RotationStyle::Spin,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.as_style().as_str()
    }
}

impl RotationStyle {
    /// The concrete style, or `None` for `Random`.
    #[must_use]
    pub fn concrete(self) -> Option<ConcreteStyle> {
        match self {
            Self::None => Some(ConcreteStyle::None),
            Self::Wobble => Some(ConcreteStyle::Wobble),
            Self::SeeSaw => Some(ConcreteStyle::SeeSaw),
            Self::Spin => Some(ConcreteStyle::Spin),
            Self::Random => None,
        }
    }

    /// Resolve `Random` by drawing uniformly from the concrete styles.
    pub fn resolve<R: Rng>(self, rng: &mut R) -> ConcreteStyle {
        self.concrete()
            .unwrap_or_else(|| ConcreteStyle::ALL[rng.random_range(0..ConcreteStyle::ALL.len())])
    }
}

/// The configuration fields the rotation functions read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationParams {
    pub period_secs: f64,
    pub amplitude_deg: f64,
    pub freq_x: f64,
    pub freq_y: f64,
    pub see_saw_freq: f64,
}

impl From<&Configuration> for RotationParams {
    fn from(cfg: &Configuration) -> Self {
        Self {
            period_secs: cfg.rotation_period_secs,
            amplitude_deg: cfg.wobble_amplitude_deg,
            freq_x: cfg.wobble_freq_x,
            freq_y: cfg.wobble_freq_y,
            see_saw_freq: cfg.see_saw_freq,
        }
    }
}

/// Orientation of the text `t` seconds into the session.
#[must_use]
pub fn orientation(style: ConcreteStyle, params: &RotationParams, t: f64) -> Orientation {
    match style {
        ConcreteStyle::None => idle(t),
        ConcreteStyle::Wobble => wobble(params, t),
        ConcreteStyle::SeeSaw => see_saw(params, t),
        ConcreteStyle::Spin => spin(params, t),
    }
}

fn idle(t: f64) -> Orientation {
    Vec3::new(0.0, IDLE_SPIN_RAD_PER_SEC * t, 0.0)
}

fn wobble(p: &RotationParams, t: f64) -> Orientation {
    let base_x = 360.0 / p.period_secs;
    let base_y = 720.0 / p.period_secs;
    let x = base_x * t + p.amplitude_deg * (TAU * p.freq_x * t).sin();
    let y = base_y * t + p.amplitude_deg * (TAU * p.freq_y * t + WOBBLE_PHASE_OFFSET).sin();
    Vec3::new(x.to_radians(), y.to_radians(), 0.0)
}

fn see_saw(p: &RotationParams, t: f64) -> Orientation {
    let swing = p.amplitude_deg.to_radians() * (TAU * p.see_saw_freq * t).sin();
    Vec3::new(swing, -swing, 0.0)
}

fn spin(p: &RotationParams, t: f64) -> Orientation {
    let turn = (360.0 / p.period_secs * t).to_radians();
    let roll = p.amplitude_deg.to_radians() * (TAU * p.see_saw_freq * t).sin();
    Vec3::new(0.0, turn, roll)
}
