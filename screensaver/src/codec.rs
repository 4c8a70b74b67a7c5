//! Bidirectional mapping between [`Configuration`] and flat string-keyed queries.
//!
//! SYSTEM CONTEXT
//! ==============
//! The same flat form backs three surfaces: the URL query string of a share
//! link, the JSON blob kept in local storage, and the OBS headless mode. The
//! codec is pure; reading and writing the actual storage and location objects
//! is left to the host.
//!
//! Decoding is fail-soft per field: a malformed value falls back to the
//! default for that field, logs a warning, and leaves every other field alone.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde_json::{Map, Value};

use crate::color::{GradientId, Rgb};
use crate::config::{
    Configuration, DisplayText, Extrusion, FieldError, MotionMode, RotationStyle, finite, non_negative, parse_number,
    positive, resolution,
};

// ── Keys ────────────────────────────────────────────────────────

pub const KEY_TEXT: &str = "text";
pub const KEY_SIZE: &str = "size";
pub const KEY_SPEED: &str = "speed";
pub const KEY_SPIN: &str = "spin";
pub const KEY_COLOR: &str = "color";
pub const KEY_BACKGROUND: &str = "bg";
pub const KEY_RESOLUTION: &str = "resolution";
pub const KEY_DEPTH: &str = "depth";
pub const KEY_ROTATION_PERIOD: &str = "rot";
pub const KEY_WOBBLE_AMP: &str = "wobbleAmp";
pub const KEY_WOBBLE_HZ_X: &str = "wobbleHzX";
pub const KEY_WOBBLE_HZ_Y: &str = "wobbleHzY";
pub const KEY_SEE_SAW_HZ: &str = "seeSawHz";
pub const KEY_MOTION: &str = "motion";
pub const KEY_TRAVERSE_X: &str = "mx";
pub const KEY_TRAVERSE_Y: &str = "my";
pub const KEY_SURFACE: &str = "surface";
pub const KEY_GRADIENT: &str = "gradient";

const SURFACE_SOLID: &str = "solid";
const SURFACE_TEXTURED: &str = "textured";

/// An ordered, string-keyed query, the way `URLSearchParams` models one.
///
/// Lookups return the first value for a key; [`Query::set`] replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `application/x-www-form-urlencoded` string. A leading `?` is ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Parse the query part of a full URL, or a bare query string.
    #[must_use]
    pub fn from_url_or_query(raw: &str) -> Self {
        match url::Url::parse(raw) {
            Ok(parsed) => Self::parse(parsed.query().unwrap_or_default()),
            Err(_) => Self::parse(raw),
        }
    }

    /// Read the JSON object kept in storage. Non-string scalars are stringified;
    /// nested values are dropped.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let map: Map<String, Value> = serde_json::from_str(raw)?;
        let pairs = map
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k, s)),
                Value::Number(n) => Some((k, n.to_string())),
                Value::Bool(b) => Some((k, b.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            })
            .collect();
        Ok(Self { pairs })
    }

    /// JSON object form for storage.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        let map: Map<String, Value> = self
            .pairs
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map).to_string()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_owned(), value)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a form-encoded string, without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.pairs {
            serializer.append_pair(k, v);
        }
        serializer.finish()
    }

    /// Build a share URL: `base` with any existing query or fragment replaced.
    #[must_use]
    pub fn share_url(&self, base: &str) -> String {
        let base = base.split(['?', '#']).next().unwrap_or(base);
        if self.is_empty() {
            base.to_owned()
        } else {
            format!("{base}?{}", self.to_query_string())
        }
    }
}

/// Widest rounding [`format_positive`] tries before writing the value in full.
const MAX_DECIMALS: usize = 6;

/// Any non-empty query string puts the page into headless (OBS) mode.
#[must_use]
pub fn is_headless(raw_query: &str) -> bool {
    !Query::parse(raw_query).is_empty()
}

/// Merge defaults, the stored configuration, and URL overrides, in that order.
#[must_use]
pub fn decode(defaults: &Configuration, stored: Option<&Query>, url: Option<&Query>) -> Configuration {
    let mut cfg = defaults.clone();
    for source in [stored, url].into_iter().flatten() {
        for err in apply_query(&mut cfg, defaults, source) {
            log::warn!("config: {err}; using default");
        }
    }
    cfg
}

/// Decode the stored JSON blob, discarding it entirely when it doesn't parse.
#[must_use]
pub fn decode_stored(raw: Option<&str>) -> Option<Query> {
    let raw = raw?;
    match Query::from_json_str(raw) {
        Ok(query) => Some(query),
        Err(err) => {
            log::warn!("config: discarding stored configuration: {err}");
            None
        }
    }
}

/// Encode every field of `cfg` in canonical form.
#[must_use]
pub fn encode(cfg: &Configuration) -> Query {
    let mut q = Query::new();
    q.set(KEY_TEXT, cfg.display_text.to_query());
    q.set(KEY_SIZE, format_positive(cfg.font_size_px, 0));
    q.set(KEY_SPEED, format_positive(cfg.speed_factor, 0));
    q.set(KEY_SPIN, cfg.rotation_style.as_str());
    q.set(KEY_COLOR, cfg.face_color.to_hex());
    q.set(KEY_BACKGROUND, cfg.background_color.to_hex());
    match cfg.extrusion {
        Extrusion::Resolution(value) => q.set(KEY_RESOLUTION, format_number(value, 0)),
        Extrusion::Absolute(value) => q.set(KEY_DEPTH, format_number(value, 1)),
    }
    q.set(KEY_ROTATION_PERIOD, format_positive(cfg.rotation_period_secs, 1));
    q.set(KEY_WOBBLE_AMP, format_number(cfg.wobble_amplitude_deg, 1));
    q.set(KEY_WOBBLE_HZ_X, format_number(cfg.wobble_freq_x, 2));
    q.set(KEY_WOBBLE_HZ_Y, format_number(cfg.wobble_freq_y, 2));
    q.set(KEY_SEE_SAW_HZ, format_number(cfg.see_saw_freq, 2));
    q.set(KEY_MOTION, cfg.motion_mode.as_str());
    q.set(KEY_TRAVERSE_X, format_positive(cfg.horizontal_traverse_secs, 1));
    q.set(KEY_TRAVERSE_Y, format_positive(cfg.vertical_traverse_secs, 1));
    match cfg.gradient {
        Some(gradient) => {
            q.set(KEY_SURFACE, SURFACE_TEXTURED);
            q.set(KEY_GRADIENT, gradient.as_str());
        }
        None => q.set(KEY_SURFACE, SURFACE_SOLID),
    }
    q
}

/// Round to `decimals` places and drop trailing zeros.
#[must_use]
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    let trimmed = if fixed.contains('.') { fixed.trim_end_matches('0').trim_end_matches('.') } else { fixed.as_str() };
    if trimmed == "-0" { "0".to_owned() } else { trimmed.to_owned() }
}

/// Like [`format_number`], but adds places until a positive value stays positive.
///
/// Keys checked with `positive` on decode must never encode as `0`.
#[must_use]
pub fn format_positive(value: f64, decimals: usize) -> String {
    if value <= 0.0 {
        return format_number(value, decimals);
    }
    (decimals..=MAX_DECIMALS)
        .map(|places| format_number(value, places))
        .find(|text| text.parse::<f64>().is_ok_and(|v| v > 0.0))
        .unwrap_or_else(|| value.to_string())
}

/// Apply every recognized key of `query` onto `cfg`.
///
/// A field that fails to parse is reset to its value in `defaults`; the
/// returned errors describe those fields.
fn apply_query(cfg: &mut Configuration, defaults: &Configuration, query: &Query) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(raw) = query.get(KEY_TEXT) {
        cfg.display_text = DisplayText::from_query(raw);
    }

    number_field(query, KEY_SIZE, positive, &mut cfg.font_size_px, defaults.font_size_px, &mut errors);
    number_field(query, KEY_SPEED, positive, &mut cfg.speed_factor, defaults.speed_factor, &mut errors);
    number_field(
        query,
        KEY_ROTATION_PERIOD,
        positive,
        &mut cfg.rotation_period_secs,
        defaults.rotation_period_secs,
        &mut errors,
    );
    number_field(query, KEY_WOBBLE_AMP, finite, &mut cfg.wobble_amplitude_deg, defaults.wobble_amplitude_deg, &mut errors);
    number_field(query, KEY_WOBBLE_HZ_X, finite, &mut cfg.wobble_freq_x, defaults.wobble_freq_x, &mut errors);
    number_field(query, KEY_WOBBLE_HZ_Y, finite, &mut cfg.wobble_freq_y, defaults.wobble_freq_y, &mut errors);
    number_field(query, KEY_SEE_SAW_HZ, finite, &mut cfg.see_saw_freq, defaults.see_saw_freq, &mut errors);
    number_field(
        query,
        KEY_TRAVERSE_X,
        positive,
        &mut cfg.horizontal_traverse_secs,
        defaults.horizontal_traverse_secs,
        &mut errors,
    );
    number_field(
        query,
        KEY_TRAVERSE_Y,
        positive,
        &mut cfg.vertical_traverse_secs,
        defaults.vertical_traverse_secs,
        &mut errors,
    );

    if let Some(raw) = query.get(KEY_COLOR) {
        cfg.face_color = color_field(KEY_COLOR, raw, defaults.face_color, &mut errors);
    }
    if let Some(raw) = query.get(KEY_BACKGROUND) {
        cfg.background_color = color_field(KEY_BACKGROUND, raw, defaults.background_color, &mut errors);
    }

    if let Some(raw) = query.get(KEY_SPIN) {
        cfg.rotation_style = RotationStyle::parse(raw).unwrap_or_else(|| {
            errors.push(FieldError::UnknownValue { key: KEY_SPIN, value: raw.to_owned() });
            defaults.rotation_style
        });
    }
    if let Some(raw) = query.get(KEY_MOTION) {
        cfg.motion_mode = MotionMode::parse(raw).unwrap_or_else(|| {
            errors.push(FieldError::UnknownValue { key: KEY_MOTION, value: raw.to_owned() });
            defaults.motion_mode
        });
    }

    // An absolute depth is more specific than the resolution slider.
    if let Some(raw) = query.get(KEY_RESOLUTION) {
        match parse_number(KEY_RESOLUTION, raw).and_then(|v| resolution(KEY_RESOLUTION, v)) {
            Ok(value) => cfg.extrusion = Extrusion::Resolution(value),
            Err(err) => {
                errors.push(err);
                cfg.extrusion = defaults.extrusion;
            }
        }
    }
    if let Some(raw) = query.get(KEY_DEPTH) {
        match parse_number(KEY_DEPTH, raw).and_then(|v| non_negative(KEY_DEPTH, v)) {
            Ok(value) => cfg.extrusion = Extrusion::Absolute(value),
            Err(err) => {
                errors.push(err);
                cfg.extrusion = defaults.extrusion;
            }
        }
    }

    // The gradient only counts together with the textured surface flag.
    match query.get(KEY_SURFACE) {
        Some(SURFACE_SOLID) => cfg.gradient = None,
        Some(SURFACE_TEXTURED) => match query.get(KEY_GRADIENT).map(|raw| (raw, GradientId::parse(raw))) {
            Some((_, Some(gradient))) => cfg.gradient = Some(gradient),
            Some((raw, None)) => {
                errors.push(FieldError::UnknownValue { key: KEY_GRADIENT, value: raw.to_owned() });
                cfg.gradient = defaults.gradient;
            }
            None => {}
        },
        Some(other) => {
            errors.push(FieldError::UnknownValue { key: KEY_SURFACE, value: other.to_owned() });
            cfg.gradient = defaults.gradient;
        }
        None => {
            if query.get(KEY_GRADIENT).is_some() {
                log::debug!("config: `gradient` ignored without `surface=textured`");
            }
        }
    }

    errors
}

fn number_field(
    query: &Query,
    key: &'static str,
    check: fn(&'static str, f64) -> Result<f64, FieldError>,
    slot: &mut f64,
    fallback: f64,
    errors: &mut Vec<FieldError>,
) {
    let Some(raw) = query.get(key) else {
        return;
    };
    match parse_number(key, raw).and_then(|v| check(key, v)) {
        Ok(value) => *slot = value,
        Err(err) => {
            errors.push(err);
            *slot = fallback;
        }
    }
}

fn color_field(key: &'static str, raw: &str, fallback: Rgb, errors: &mut Vec<FieldError>) -> Rgb {
    match raw.parse::<Rgb>() {
        Ok(rgb) => rgb,
        Err(_) => {
            errors.push(FieldError::InvalidColor { key, value: raw.to_owned() });
            fallback
        }
    }
}
