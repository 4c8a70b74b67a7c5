//! The typed configuration of one screensaver instance.
//!
//! DESIGN
//! ======
//! Every user-tunable parameter lives in [`Configuration`]. Values are checked
//! once, at the boundary (codec, form, CLI flags), so the motion and rotation
//! engines only ever see finite, in-range numbers.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Serialize;

use crate::color::{GradientId, Rgb};
use crate::consts::{
    BEVEL_SIZE_RATIO, BEVEL_THICKNESS_RATIO, CLOCK_SENTINEL, DEFAULT_TEXT, FONT_PX_PER_WORLD, MAX_DEPTH_RATIO,
    MIN_DEPTH_RATIO, RESOLUTION_MAX,
};

/// Error for a single configuration field that failed to parse or validate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("`{key}`: {value:?} is not a number")]
    NotANumber { key: &'static str, value: String },
    #[error("`{key}`: {value} is out of range")]
    OutOfRange { key: &'static str, value: f64 },
    #[error("`{key}`: unknown value {value:?}")]
    UnknownValue { key: &'static str, value: String },
    #[error("`{key}`: {value:?} is not a #rrggbb color")]
    InvalidColor { key: &'static str, value: String },
}

/// What the extruded text says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DisplayText {
    /// Fixed user text. May be empty; empty renders as [`DEFAULT_TEXT`].
    Literal(String),
    /// The local wall-clock time, regenerated every second.
    Clock,
}

impl DisplayText {
    /// Parse the `text` query value; [`CLOCK_SENTINEL`] selects the clock.
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        if raw == CLOCK_SENTINEL { Self::Clock } else { Self::Literal(raw.to_owned()) }
    }

    /// The `text` query value.
    #[must_use]
    pub fn to_query(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Clock => CLOCK_SENTINEL,
        }
    }

    #[must_use]
    pub fn is_clock(&self) -> bool {
        matches!(self, Self::Clock)
    }

    /// Literal text with the empty-string fallback applied. `None` for the clock.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) if text.is_empty() => Some(DEFAULT_TEXT),
            Self::Literal(text) => Some(text),
            Self::Clock => None,
        }
    }
}

/// Named rotation presets as selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationStyle {
    None,
    #[default]
    Wobble,
    SeeSaw,
    Spin,
    /// Pick one of the other four when a preview starts.
    Random,
}

impl RotationStyle {
    pub const ALL: [Self; 5] = [Self::None, Self::Wobble, Self::SeeSaw, Self::Spin, Self::Random];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Wobble => "wobble",
            Self::SeeSaw => "see-saw",
            Self::Spin => "spin",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

/// How the text moves around the frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionMode {
    /// Velocity integration with reflection at the visible bounds.
    #[default]
    Bounce,
    /// Time-driven edge-to-edge traversal with fixed crossing times.
    Float,
}

impl MotionMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Float => "float",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "bounce" => Some(Self::Bounce),
            "float" => Some(Self::Float),
            _ => None,
        }
    }
}

/// Extrusion thickness source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Extrusion {
    /// Resolution slider value in `0..=100`, scaled against the text size.
    Resolution(f64),
    /// Absolute depth in world units.
    Absolute(f64),
}

impl Default for Extrusion {
    fn default() -> Self {
        Self::Resolution(50.0)
    }
}

impl Extrusion {
    /// Extrusion depth in world units for glyphs of `world_size` height.
    #[must_use]
    pub fn depth(self, world_size: f64) -> f64 {
        match self {
            Self::Resolution(resolution) => {
                let t = (resolution / RESOLUTION_MAX).clamp(0.0, 1.0);
                world_size * (MIN_DEPTH_RATIO + (MAX_DEPTH_RATIO - MIN_DEPTH_RATIO) * t)
            }
            Self::Absolute(depth) => depth,
        }
    }
}

/// The complete, serializable description of one screensaver instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    pub display_text: DisplayText,
    pub font_size_px: f64,
    pub face_color: Rgb,
    pub background_color: Rgb,
    pub extrusion: Extrusion,
    pub speed_factor: f64,
    pub rotation_style: RotationStyle,
    /// Seconds per base revolution for the wobble and spin styles.
    pub rotation_period_secs: f64,
    pub wobble_amplitude_deg: f64,
    pub wobble_freq_x: f64,
    pub wobble_freq_y: f64,
    pub see_saw_freq: f64,
    pub motion_mode: MotionMode,
    pub horizontal_traverse_secs: f64,
    pub vertical_traverse_secs: f64,
    /// Textured mode when set; solid `face_color` otherwise.
    pub gradient: Option<GradientId>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            display_text: DisplayText::Literal(DEFAULT_TEXT.to_owned()),
            font_size_px: 42.0,
            face_color: Rgb::new(0xff, 0x60, 0x60),
            background_color: Rgb::BLACK,
            extrusion: Extrusion::default(),
            speed_factor: 5.0,
            rotation_style: RotationStyle::default(),
            rotation_period_secs: 18.0,
            wobble_amplitude_deg: 8.0,
            wobble_freq_x: 0.23,
            wobble_freq_y: 0.17,
            see_saw_freq: 0.45,
            motion_mode: MotionMode::default(),
            horizontal_traverse_secs: 22.0,
            vertical_traverse_secs: 27.0,
            gradient: None,
        }
    }
}

impl Configuration {
    /// Glyph height in world units.
    #[must_use]
    pub fn world_text_size(&self) -> f64 {
        self.font_size_px / FONT_PX_PER_WORLD
    }

    #[must_use]
    pub fn extrusion_depth(&self) -> f64 {
        self.extrusion.depth(self.world_text_size())
    }

    #[must_use]
    pub fn bevel_thickness(&self) -> f64 {
        self.world_text_size() * BEVEL_THICKNESS_RATIO
    }

    #[must_use]
    pub fn bevel_size(&self) -> f64 {
        self.world_text_size() * BEVEL_SIZE_RATIO
    }

    /// Whether switching from `self` to `next` changes the text geometry.
    #[must_use]
    pub fn geometry_differs(&self, next: &Self) -> bool {
        self.display_text != next.display_text
            || self.font_size_px != next.font_size_px
            || self.extrusion != next.extrusion
    }

    /// Whether switching from `self` to `next` changes the materials or background.
    #[must_use]
    pub fn appearance_differs(&self, next: &Self) -> bool {
        self.face_color != next.face_color
            || self.gradient != next.gradient
            || self.background_color != next.background_color
    }

    /// Replace every out-of-range or non-finite field with its default.
    ///
    /// Returns the sanitized configuration together with the errors for the
    /// fields that were replaced.
    #[must_use]
    pub fn validated(mut self) -> (Self, Vec<FieldError>) {
        let defaults = Self::default();
        let mut errors = Vec::new();
        let mut fix = |value: &mut f64, fallback: f64, check: fn(&'static str, f64) -> Result<f64, FieldError>, key| {
            if let Err(err) = check(key, *value) {
                errors.push(err);
                *value = fallback;
            }
        };

        fix(&mut self.font_size_px, defaults.font_size_px, positive, "size");
        fix(&mut self.speed_factor, defaults.speed_factor, positive, "speed");
        fix(&mut self.rotation_period_secs, defaults.rotation_period_secs, positive, "rot");
        fix(&mut self.wobble_amplitude_deg, defaults.wobble_amplitude_deg, finite, "wobbleAmp");
        fix(&mut self.wobble_freq_x, defaults.wobble_freq_x, finite, "wobbleHzX");
        fix(&mut self.wobble_freq_y, defaults.wobble_freq_y, finite, "wobbleHzY");
        fix(&mut self.see_saw_freq, defaults.see_saw_freq, finite, "seeSawHz");
        fix(&mut self.horizontal_traverse_secs, defaults.horizontal_traverse_secs, positive, "mx");
        fix(&mut self.vertical_traverse_secs, defaults.vertical_traverse_secs, positive, "my");

        match &mut self.extrusion {
            Extrusion::Resolution(value) => fix(value, 50.0, resolution, "resolution"),
            Extrusion::Absolute(value) => {
                if let Err(err) = non_negative("depth", *value) {
                    errors.push(err);
                    self.extrusion = defaults.extrusion;
                }
            }
        }

        (self, errors)
    }
}

// ── Field checks ────────────────────────────────────────────────

/// Parse a trimmed decimal number, the way the browser's `Number(...)` reads
/// slider values. Empty and non-finite input is rejected.
pub fn parse_number(key: &'static str, raw: &str) -> Result<f64, FieldError> {
    let parsed = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| FieldError::NotANumber { key, value: raw.to_owned() })?;
    finite(key, parsed)
}

pub fn finite(key: &'static str, value: f64) -> Result<f64, FieldError> {
    if value.is_finite() { Ok(value) } else { Err(FieldError::OutOfRange { key, value }) }
}

pub fn positive(key: &'static str, value: f64) -> Result<f64, FieldError> {
    if value.is_finite() && value > 0.0 { Ok(value) } else { Err(FieldError::OutOfRange { key, value }) }
}

pub fn non_negative(key: &'static str, value: f64) -> Result<f64, FieldError> {
    if value.is_finite() && value >= 0.0 { Ok(value) } else { Err(FieldError::OutOfRange { key, value }) }
}

pub fn resolution(key: &'static str, value: f64) -> Result<f64, FieldError> {
    if (0.0..=RESOLUTION_MAX).contains(&value) { Ok(value) } else { Err(FieldError::OutOfRange { key, value }) }
}
