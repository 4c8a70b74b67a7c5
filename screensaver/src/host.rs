//! WebAssembly surface for the page script.
//!
//! [`Screensaver`] wraps [`EngineCore`] with the browser pieces it needs: a
//! seeded RNG, the local clock, and `localStorage`. The page script owns the
//! WebGL scene; each animation frame it calls [`Screensaver::tick`], applies
//! the returned transform, then drains and applies the JSON actions.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;

use crate::camera::{Camera, Vec3};
use crate::clock::ClockTime;
use crate::codec::Query;
use crate::color::GradientId;
use crate::config::RotationStyle;
use crate::engine::{Action, EngineCore, TickInput};
use crate::form::{DesktopState, FormState, Surface, TextSource};
use crate::storage;

/// Install the console logger and panic hook. Safe to call more than once.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}

#[wasm_bindgen]
pub struct Screensaver {
    core: EngineCore,
    desktop: DesktopState,
    rng: SmallRng,
}

impl Default for Screensaver {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Screensaver {
    /// Configure from the stored blob and the page's query string.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        let stored = storage::load();
        let core = EngineCore::from_sources(stored.as_deref(), &storage::location_search());
        let desktop = DesktopState::new(&core.config, core.headless);
        Self { core, desktop, rng: SmallRng::seed_from_u64(js_sys::Math::random().to_bits()) }
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn headless(&self) -> bool {
        self.core.headless
    }

    /// Whether the page should draw the desktop icons, dialog and taskbar.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn chrome_visible(&self) -> bool {
        self.desktop.chrome_visible()
    }

    pub fn font_loaded(&mut self) {
        self.core.font_loaded(&mut self.rng);
        self.desktop.preview_open = self.core.session.is_some();
    }

    pub fn font_failed(&mut self, reason: &str) {
        self.core.font_failed(reason);
    }

    /// Apply settings given as a query string over the current configuration.
    pub fn apply_query(&mut self, query: &str) {
        self.core.apply_query(&Query::parse(query), &mut self.rng);
        self.desktop.form = FormState::from_config(&self.core.config);
    }

    /// Apply the settings dialog's widget values.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_dialog(
        &mut self,
        text: String,
        use_time: bool,
        size: u32,
        speed: u32,
        resolution: u32,
        spin: &str,
        color: String,
        textured: bool,
        gradient: Option<String>,
    ) {
        self.desktop.form = FormState {
            text_input: text,
            source: if use_time { TextSource::Time } else { TextSource::Text },
            size_slider: size,
            speed_slider: speed,
            resolution_slider: resolution,
            spin_style: RotationStyle::parse(spin).unwrap_or_default(),
            color_picker: color,
            surface: if textured { Surface::Textured } else { Surface::Solid },
            gradient: gradient.as_deref().and_then(GradientId::parse),
        };
        self.apply_form();
    }

    /// Dialog widget values as JSON, for filling in the form.
    #[must_use]
    pub fn dialog_json(&self) -> String {
        to_json(&self.desktop.form)
    }

    pub fn open_texture_window(&mut self) {
        self.desktop.open_texture_window();
    }

    pub fn select_gradient(&mut self, name: &str) {
        match GradientId::parse(name) {
            Some(gradient) => self.desktop.select_gradient(gradient),
            None => log::warn!("unknown gradient `{name}`"),
        }
    }

    /// OK in the texture window. Returns whether the look changed.
    pub fn apply_texture(&mut self) -> bool {
        let changed = self.desktop.apply_texture();
        if changed {
            self.apply_form();
        }
        changed
    }

    pub fn close_texture_window(&mut self) {
        self.desktop.close_texture_window();
    }

    pub fn save(&mut self) {
        self.core.save();
    }

    pub fn reset_to_defaults(&mut self) {
        self.core.reset_to_defaults(&mut self.rng);
        self.desktop.form = FormState::from_config(&self.core.config);
    }

    pub fn open_preview(&mut self) {
        self.core.open_preview(&mut self.rng);
        self.desktop.preview_open = true;
    }

    pub fn close_preview(&mut self) {
        self.core.close_preview();
        self.desktop.preview_open = false;
    }

    pub fn reset_position(&mut self) {
        self.core.reset_position(&mut self.rng);
    }

    /// Advance one frame for a `width` × `height` viewport.
    ///
    /// Returns `[x, y, z, rx, ry, rz]`, or an empty array when nothing moved.
    pub fn tick(&mut self, now_ms: f64, width: f64, height: f64, half_x: f64, half_y: f64, half_z: f64) -> Vec<f64> {
        let input = TickInput {
            now_ms,
            camera: Camera::for_viewport(width, height),
            half_extent: Vec3::new(half_x, half_y, half_z),
            clock: self.core.config.display_text.is_clock().then(local_clock),
        };
        match self.core.tick(&input) {
            Some(frame) => [frame.position.to_array(), frame.orientation.to_array()].concat(),
            None => Vec::new(),
        }
    }

    /// Share link for the current page; also kept for the dialog's URL box.
    pub fn share_url(&mut self) -> String {
        let url = self.core.share_url(&storage::location_base());
        self.desktop.url_output.clone_from(&url);
        url
    }

    /// Taskbar clock, e.g. `3:07 PM`.
    #[must_use]
    pub fn taskbar_clock(&self) -> String {
        local_clock().taskbar_text()
    }

    /// Current configuration as JSON, for filling in the dialog.
    #[must_use]
    pub fn config_json(&self) -> String {
        to_json(&self.core.config)
    }

    /// Carry out storage actions here; return the scene actions as a JSON array.
    pub fn drain_actions(&mut self) -> String {
        let mut scene = Vec::new();
        for action in self.core.drain_actions() {
            match action {
                Action::SaveConfig { json } => storage::save(&json),
                Action::ClearSavedConfig => storage::clear(),
                other => scene.push(other),
            }
        }
        to_json(&scene)
    }
}

impl Screensaver {
    fn apply_form(&mut self) {
        let (cfg, errors) = self.desktop.form.to_config(&self.core.config);
        for err in errors {
            log::warn!("dialog: {err}; using default");
        }
        self.core.apply_config(cfg, &mut self.rng);
    }
}

fn local_clock() -> ClockTime {
    let now = js_sys::Date::new_0();
    let part = |v: u32| u8::try_from(v).unwrap_or_default();
    ClockTime::new(part(now.get_hours()), part(now.get_minutes()), part(now.get_seconds()))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            log::error!("serialize failed: {err}");
            String::from("null")
        }
    }
}
