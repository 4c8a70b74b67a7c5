//! Desktop settings dialog, projected to and from [`Configuration`].
//!
//! DESIGN
//! ======
//! The dialog's controls hold raw widget values (slider integers, radio
//! choices, the color picker string). [`FormState`] mirrors those widgets so
//! the DOM layer only copies values in and out; the conversion to a typed
//! configuration, with validation, happens here.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde::Serialize;

use crate::color::{GradientId, Rgb};
use crate::config::{Configuration, DisplayText, Extrusion, FieldError, RotationStyle};

pub const SIZE_RANGE: (u32, u32) = (10, 100);
pub const SPEED_RANGE: (u32, u32) = (1, 10);
pub const RESOLUTION_RANGE: (u32, u32) = (0, 100);

/// The text/time radio pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    #[default]
    Text,
    Time,
}

/// The solid/textured radio pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Solid,
    Textured,
}

/// Raw values of the settings dialog widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub text_input: String,
    pub source: TextSource,
    pub size_slider: u32,
    pub speed_slider: u32,
    pub resolution_slider: u32,
    pub spin_style: RotationStyle,
    pub color_picker: String,
    pub surface: Surface,
    pub gradient: Option<GradientId>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::from_config(&Configuration::default())
    }
}

impl FormState {
    /// Widget values showing `cfg`. Numbers snap to the nearest slider stop.
    #[must_use]
    pub fn from_config(cfg: &Configuration) -> Self {
        let (text_input, source) = match &cfg.display_text {
            DisplayText::Literal(text) => (text.clone(), TextSource::Text),
            DisplayText::Clock => (String::new(), TextSource::Time),
        };
        let resolution = match cfg.extrusion {
            Extrusion::Resolution(value) => value,
            Extrusion::Absolute(depth) => {
                let world = cfg.world_text_size();
                if world > 0.0 { resolution_for_ratio(depth / world) } else { 50.0 }
            }
        };
        Self {
            text_input,
            source,
            size_slider: snap(cfg.font_size_px, SIZE_RANGE),
            speed_slider: snap(cfg.speed_factor, SPEED_RANGE),
            resolution_slider: snap(resolution, RESOLUTION_RANGE),
            spin_style: cfg.rotation_style,
            color_picker: cfg.face_color.to_hex(),
            surface: if cfg.gradient.is_some() { Surface::Textured } else { Surface::Solid },
            gradient: cfg.gradient,
        }
    }

    /// Apply the widget values over `base`; fields the dialog doesn't show
    /// are kept from `base`. Invalid widget values fall back to defaults.
    #[must_use]
    pub fn to_config(&self, base: &Configuration) -> (Configuration, Vec<FieldError>) {
        let mut errors = Vec::new();
        let face_color = self.color_picker.parse::<Rgb>().unwrap_or_else(|_| {
            errors.push(FieldError::InvalidColor { key: "color", value: self.color_picker.clone() });
            Configuration::default().face_color
        });
        let cfg = Configuration {
            display_text: match self.source {
                TextSource::Text => DisplayText::Literal(self.text_input.clone()),
                TextSource::Time => DisplayText::Clock,
            },
            font_size_px: f64::from(self.size_slider),
            speed_factor: f64::from(self.speed_slider),
            extrusion: Extrusion::Resolution(f64::from(self.resolution_slider)),
            rotation_style: self.spin_style,
            face_color,
            gradient: match self.surface {
                Surface::Solid => None,
                Surface::Textured => self.gradient,
            },
            ..base.clone()
        };
        let (cfg, mut invalid) = cfg.validated();
        errors.append(&mut invalid);
        (cfg, errors)
    }
}

fn snap(value: f64, (lo, hi): (u32, u32)) -> u32 {
    let rounded = value.round().clamp(f64::from(lo), f64::from(hi));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let stop = rounded as u32;
    stop
}

/// Inverse of the resolution → depth ratio mapping.
fn resolution_for_ratio(ratio: f64) -> f64 {
    use crate::consts::{MAX_DEPTH_RATIO, MIN_DEPTH_RATIO, RESOLUTION_MAX};
    (ratio - MIN_DEPTH_RATIO) / (MAX_DEPTH_RATIO - MIN_DEPTH_RATIO) * RESOLUTION_MAX
}

/// Windows and overlays of the desktop mockup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesktopState {
    pub form: FormState,
    /// Chrome hidden, preview full-bleed; entered by loading with a query.
    pub headless: bool,
    pub preview_open: bool,
    pub texture_window_open: bool,
    /// Gradient highlighted in the texture window, not yet applied.
    pub pending_gradient: Option<GradientId>,
    /// Last generated share URL.
    pub url_output: String,
}

impl DesktopState {
    #[must_use]
    pub fn new(cfg: &Configuration, headless: bool) -> Self {
        Self { form: FormState::from_config(cfg), headless, preview_open: headless, ..Self::default() }
    }

    /// Whether the desktop icons, dialog and taskbar are drawn.
    #[must_use]
    pub fn chrome_visible(&self) -> bool {
        !self.headless
    }

    pub fn open_texture_window(&mut self) {
        self.texture_window_open = true;
        self.pending_gradient = self.form.gradient;
    }

    pub fn select_gradient(&mut self, gradient: GradientId) {
        self.pending_gradient = Some(gradient);
    }

    /// OK in the texture window: switch to textured mode when a gradient was picked.
    /// Returns whether the form changed.
    pub fn apply_texture(&mut self) -> bool {
        self.texture_window_open = false;
        let Some(gradient) = self.pending_gradient else {
            return false;
        };
        let changed = self.form.surface != Surface::Textured || self.form.gradient != Some(gradient);
        self.form.surface = Surface::Textured;
        self.form.gradient = Some(gradient);
        changed
    }

    pub fn close_texture_window(&mut self) {
        self.texture_window_open = false;
        self.pending_gradient = None;
    }
}
