use rand::Rng;
use serde::Serialize;

use crate::camera::{Camera, Vec3};
use crate::clock::{ClockTime, ClockWatcher};
use crate::codec::{self, KEY_SPIN, Query};
use crate::color::{GradientId, Rgb};
use crate::config::{Configuration, DisplayText, MotionMode, RotationStyle};
use crate::limiter::FrameLimiter;
use crate::motion::MotionState;
use crate::rotation::{self, ConcreteStyle, Orientation, RotationParams};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side faces render at this fraction of the face color.
const SIDE_SHADE: f64 = 0.55;

/// Actions queued for the host to carry out against the scene and the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Rebuild the extruded text mesh.
    RegenerateText { text: String, size: f64, depth: f64, bevel_thickness: f64, bevel_size: f64 },
    /// Recolor the face and side materials. A gradient comes with its top and bottom stops.
    SetMaterial { face: Rgb, side: Rgb, gradient: Option<GradientId>, stops: Option<[Rgb; 2]> },
    SetBackground { color: Rgb },
    /// Show or hide the desktop chrome.
    SetChromeVisible { visible: bool },
    /// Persist this JSON under the storage key.
    SaveConfig { json: String },
    /// Remove the stored configuration.
    ClearSavedConfig,
}

/// Font loading state. The engine stays idle until the font is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetState {
    #[default]
    Loading,
    Ready,
    /// Terminal for this page load; the preview never animates.
    Failed,
}

/// Per-tick inputs supplied by the host.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Monotonic timestamp, e.g. the `requestAnimationFrame` argument.
    pub now_ms: f64,
    pub camera: Camera,
    /// Half the rendered text's bounding box.
    pub half_extent: Vec3,
    /// Local time, needed only in clock mode.
    pub clock: Option<ClockTime>,
}

/// Transform to apply to the text mesh this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub position: Vec3,
    pub orientation: Orientation,
}

/// State of one open preview. Discarded when the preview closes.
#[derive(Debug, Clone)]
pub struct Session {
    pub style: ConcreteStyle,
    pub motion: MotionState,
    started_ms: Option<f64>,
    limiter: FrameLimiter,
    clock: ClockWatcher,
    rotation: RotationPhase,
}

/// Where the rotation formula's clock starts within the session.
///
/// After a rotation change the formula restarts at `origin_secs`, shifted by
/// `offset` so the first new orientation equals the last one shown.
#[derive(Debug, Clone, Copy, Default)]
struct RotationPhase {
    origin_secs: f64,
    offset: Orientation,
    last: Orientation,
    last_secs: f64,
}

impl RotationPhase {
    fn orientation(&mut self, style: ConcreteStyle, params: &RotationParams, elapsed: f64) -> Orientation {
        let local = rotation::orientation(style, params, elapsed - self.origin_secs);
        self.last = self.offset + local;
        self.last_secs = elapsed;
        self.last
    }

    fn rebase(&mut self, style: ConcreteStyle, params: &RotationParams) {
        self.origin_secs = self.last_secs;
        self.offset = self.last - rotation::orientation(style, params, 0.0);
    }
}

impl Session {
    fn new(style: ConcreteStyle, motion: MotionState, fps_cap: f64) -> Self {
        Self {
            style,
            motion,
            started_ms: None,
            limiter: FrameLimiter::new(fps_cap),
            clock: ClockWatcher::new(),
            rotation: RotationPhase::default(),
        }
    }

    /// Seconds since the first admitted tick.
    #[must_use]
    pub fn elapsed_secs(&self, now_ms: f64) -> f64 {
        self.started_ms.map_or(0.0, |start| ((now_ms - start) / 1000.0).max(0.0))
    }
}

/// Core engine state: everything that does not touch the browser.
///
/// The host feeds it configuration changes and ticks, applies the returned
/// [`Frame`]s to its mesh, and drains queued [`Action`]s.
pub struct EngineCore {
    pub config: Configuration,
    pub session: Option<Session>,
    pub asset: AssetState,
    pub headless: bool,
    pub fps_cap: f64,
    actions: Vec<Action>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Configuration::default(), false)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: Configuration, headless: bool) -> Self {
        let (config, errors) = config.validated();
        for err in errors {
            log::warn!("config: {err}; using default");
        }
        Self {
            config,
            session: None,
            asset: AssetState::Loading,
            headless,
            fps_cap: crate::consts::TARGET_FPS,
            actions: Vec::new(),
        }
    }

    /// Build from the raw stored blob and the page's query string.
    ///
    /// Precedence: defaults, then storage, then URL. Any query makes the page headless.
    #[must_use]
    pub fn from_sources(stored: Option<&str>, url_query: &str) -> Self {
        let stored = codec::decode_stored(stored);
        let url = Query::parse(url_query);
        let headless = codec::is_headless(url_query);
        let config = codec::decode(&Configuration::default(), stored.as_ref(), Some(&url));
        let mut core = Self::new(config, headless);
        if headless {
            log::info!("headless mode: {}", url.to_query_string());
            core.actions.push(Action::SetChromeVisible { visible: false });
        }
        core
    }

    // --- Assets ---

    /// The font is ready. A headless page has no dialog, so its preview opens now.
    pub fn font_loaded<R: Rng>(&mut self, rng: &mut R) {
        self.asset = AssetState::Ready;
        log::info!("font ready");
        if self.headless && self.session.is_none() {
            self.open_preview(rng);
        } else {
            self.queue_geometry();
        }
        self.queue_appearance();
    }

    pub fn font_failed(&mut self, reason: &str) {
        self.asset = AssetState::Failed;
        log::error!("font failed to load: {reason}");
    }

    // --- Configuration ---

    /// Replace the configuration, queueing whatever the host must rebuild.
    ///
    /// A changed rotation style is re-resolved for the open session; an
    /// unchanged one keeps the session's resolved style. Any rotation change
    /// continues from the orientation currently on screen.
    pub fn apply_config<R: Rng>(&mut self, next: Configuration, rng: &mut R) {
        let (next, errors) = next.validated();
        for err in errors {
            log::warn!("config: {err}; using default");
        }
        let prev = std::mem::replace(&mut self.config, next);

        if let Some(session) = &mut self.session {
            let style_changed = prev.rotation_style != self.config.rotation_style;
            if style_changed {
                session.style = self.config.rotation_style.resolve(rng);
                log::debug!("rotation style resolved to {}", session.style.as_str());
            }
            let params = RotationParams::from(&self.config);
            let shown = session.started_ms.is_some();
            if shown && (style_changed || RotationParams::from(&prev) != params) {
                session.rotation.rebase(session.style, &params);
            }
        }
        if prev.geometry_differs(&self.config) {
            self.queue_geometry();
        }
        if prev.appearance_differs(&self.config) {
            self.queue_appearance();
        }
    }

    /// Overlay a query on the current configuration. Bad fields keep their current value.
    pub fn apply_query<R: Rng>(&mut self, query: &Query, rng: &mut R) {
        let next = codec::decode(&self.config, None, Some(query));
        self.apply_config(next, rng);
    }

    /// Queue the current configuration for storage.
    pub fn save(&mut self) {
        let json = codec::encode(&self.config).to_json_string();
        self.actions.push(Action::SaveConfig { json });
    }

    /// Back to built-in defaults, clearing the stored copy.
    pub fn reset_to_defaults<R: Rng>(&mut self, rng: &mut R) {
        self.apply_config(Configuration::default(), rng);
        self.actions.push(Action::ClearSavedConfig);
    }

    // --- Preview ---

    /// Start a preview session: resolve the style, randomize the start.
    pub fn open_preview<R: Rng>(&mut self, rng: &mut R) {
        let style = self.config.rotation_style.resolve(rng);
        let motion = MotionState::randomized(rng);
        log::info!("preview opened with {} rotation", style.as_str());
        self.session = Some(Session::new(style, motion, self.fps_cap));
        self.queue_geometry();
    }

    pub fn close_preview(&mut self) {
        if self.session.take().is_some() {
            log::debug!("preview closed");
        }
    }

    /// Re-randomize position and velocity without touching the style or clock.
    pub fn reset_position<R: Rng>(&mut self, rng: &mut R) {
        if let Some(session) = &mut self.session {
            session.motion = MotionState::randomized(rng);
        }
    }

    // --- Tick ---

    /// Advance one animation frame.
    ///
    /// `None` while the font isn't ready, no preview is open, or the frame
    /// limiter skipped this tick.
    pub fn tick(&mut self, input: &TickInput) -> Option<Frame> {
        if self.asset != AssetState::Ready {
            return None;
        }
        let session = self.session.as_mut()?;
        let dt = session.limiter.admit(input.now_ms)?;
        if session.started_ms.is_none() {
            session.started_ms = Some(input.now_ms);
        }
        let elapsed = session.elapsed_secs(input.now_ms);

        let position = match self.config.motion_mode {
            MotionMode::Bounce => {
                let mut bounds = None;
                let bounce = session.motion.step(self.config.speed_factor, dt, |depth| {
                    *bounds.insert(input.camera.visible_bounds(depth, input.half_extent))
                });
                let position = session.motion.position;
                if bounce.any() {
                    log::trace!("bounce {bounce:?} at {position:?}");
                }
                if let Some(bounds) = bounds.filter(|b| !b.contains(position)) {
                    log::warn!("position {position:?} outside {bounds:?}");
                }
                position
            }
            MotionMode::Float => {
                let bounds = input.camera.visible_bounds(0.0, input.half_extent);
                let secs = (self.config.horizontal_traverse_secs, self.config.vertical_traverse_secs);
                session.motion.float_to(elapsed, secs, bounds)
            }
        };
        let orientation = session.rotation.orientation(session.style, &RotationParams::from(&self.config), elapsed);

        if self.config.display_text.is_clock() {
            if let Some(now) = input.clock {
                if session.clock.observe(now) {
                    let action = self.regenerate(now.display_text());
                    self.actions.push(action);
                }
            }
        }

        Some(Frame { position, orientation })
    }

    // --- Queries ---

    #[must_use]
    pub fn resolved_style(&self) -> Option<ConcreteStyle> {
        self.session.as_ref().map(|s| s.style)
    }

    /// Text the mesh should show, with the empty-text fallback applied.
    #[must_use]
    pub fn display_text(&self, clock: Option<ClockTime>) -> Option<String> {
        match &self.config.display_text {
            DisplayText::Literal(_) => self.config.display_text.literal().map(str::to_owned),
            DisplayText::Clock => clock.map(ClockTime::display_text),
        }
    }

    /// Query for a share link.
    ///
    /// A `random` style is pinned to the open session's resolved style, so
    /// the link reproduces what is on screen.
    #[must_use]
    pub fn share_query(&self) -> Query {
        let mut query = codec::encode(&self.config);
        if self.config.rotation_style == RotationStyle::Random {
            if let Some(style) = self.resolved_style() {
                query.set(KEY_SPIN, style.as_str());
            }
        }
        query
    }

    #[must_use]
    pub fn share_url(&self, base: &str) -> String {
        self.share_query().share_url(base)
    }

    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    // --- Internals ---

    fn regenerate(&self, text: String) -> Action {
        Action::RegenerateText {
            text,
            size: self.config.world_text_size(),
            depth: self.config.extrusion_depth(),
            bevel_thickness: self.config.bevel_thickness(),
            bevel_size: self.config.bevel_size(),
        }
    }

    fn queue_geometry(&mut self) {
        if self.asset != AssetState::Ready {
            return;
        }
        match self.config.display_text.literal() {
            Some(text) => {
                let action = self.regenerate(text.to_owned());
                self.actions.push(action);
            }
            // Clock text is produced on the next tick that carries a time.
            None => {
                if let Some(session) = &mut self.session {
                    session.clock.reset();
                }
            }
        }
    }

    fn queue_appearance(&mut self) {
        let face = self.config.face_color;
        let gradient = self.config.gradient;
        let stops = gradient.map(|g| {
            let (top, bottom) = g.stops();
            [top, bottom]
        });
        self.actions.push(Action::SetMaterial { face, side: face.darken(SIDE_SHADE), gradient, stops });
        self.actions.push(Action::SetBackground { color: self.config.background_color });
    }
}
