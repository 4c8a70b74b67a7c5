//! Shared numeric constants for the screensaver crate.

// ── Text ────────────────────────────────────────────────────────

/// Text shown when the literal text field is empty.
pub const DEFAULT_TEXT: &str = "Goblinz Rule";

/// URL value of `text` that selects the live clock.
pub const CLOCK_SENTINEL: &str = "time";

/// Font size slider units per world unit of glyph height.
pub const FONT_PX_PER_WORLD: f64 = 10.0;

/// Extrusion depth ratio (of the world text size) at resolution 0.
pub const MIN_DEPTH_RATIO: f64 = 0.1;

/// Extrusion depth ratio at resolution 100.
pub const MAX_DEPTH_RATIO: f64 = 0.7;

/// Upper end of the resolution slider.
pub const RESOLUTION_MAX: f64 = 100.0;

/// Bevel thickness as a fraction of the world text size.
pub const BEVEL_THICKNESS_RATIO: f64 = 0.05;

/// Bevel width as a fraction of the world text size.
pub const BEVEL_SIZE_RATIO: f64 = 0.03;

// ── Camera ──────────────────────────────────────────────────────

/// Vertical field of view of the preview camera, in degrees.
pub const CAMERA_FOV_DEG: f64 = 75.0;

/// Distance of the preview camera from the origin along +Z.
pub const CAMERA_Z: f64 = 100.0;

// ── Motion ──────────────────────────────────────────────────────

/// Fixed half-depth of the bounce volume.
pub const DEPTH_BOUND: f64 = 30.0;

/// Depth velocity is integrated at this fraction of the planar rate.
pub const DEPTH_SPEED_SCALE: f64 = 0.5;

/// Planar speed after a reset, in world units per second at speed factor 1.
pub const BASE_SPEED: f64 = 6.0;

/// Half-widths of the box a reset may place the object in.
pub const RESET_SPREAD: [f64; 3] = [30.0, 20.0, 15.0];

// ── Rotation ────────────────────────────────────────────────────

/// Idle spin rate for the `none` style, in radians per second.
pub const IDLE_SPIN_RAD_PER_SEC: f64 = 0.3;

/// Phase lead of the wobble Y axis over X.
pub const WOBBLE_PHASE_OFFSET: f64 = std::f64::consts::FRAC_PI_3;

// ── Scheduling ──────────────────────────────────────────────────

/// Default frame-rate cap in Hz.
pub const TARGET_FPS: f64 = 60.0;

// ── Storage ─────────────────────────────────────────────────────

/// localStorage key holding the last saved configuration.
pub const STORAGE_KEY: &str = "text3d-cfg";
