#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_matches_desktop_reset_values() {
    let cfg = Configuration::default();
    assert_eq!(cfg.display_text, DisplayText::Literal("Goblinz Rule".to_owned()));
    assert_eq!(cfg.font_size_px, 42.0);
    assert_eq!(cfg.speed_factor, 5.0);
    assert_eq!(cfg.extrusion, Extrusion::Resolution(50.0));
    assert_eq!(cfg.rotation_style, RotationStyle::Wobble);
    assert_eq!(cfg.face_color.to_hex(), "#ff6060");
    assert_eq!(cfg.background_color, Rgb::BLACK);
    assert_eq!(cfg.motion_mode, MotionMode::Bounce);
    assert_eq!(cfg.gradient, None);
}

#[test]
fn default_passes_validation_untouched() {
    let (cfg, errors) = Configuration::default().validated();
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(cfg, Configuration::default());
}

// =============================================================
// DisplayText
// =============================================================

#[test]
fn display_text_sentinel_selects_clock() {
    assert_eq!(DisplayText::from_query("time"), DisplayText::Clock);
    assert_eq!(DisplayText::from_query("Time"), DisplayText::Literal("Time".to_owned()));
    assert_eq!(DisplayText::Clock.to_query(), "time");
}

#[test]
fn display_text_empty_literal_falls_back() {
    assert_eq!(DisplayText::Literal(String::new()).literal(), Some("Goblinz Rule"));
    assert_eq!(DisplayText::Literal("HELLO".to_owned()).literal(), Some("HELLO"));
    assert_eq!(DisplayText::Clock.literal(), None);
}

// =============================================================
// Enums
// =============================================================

#[test]
fn rotation_style_wire_names_round_trip() {
    for style in RotationStyle::ALL {
        assert_eq!(RotationStyle::parse(style.as_str()), Some(style));
    }
    assert_eq!(RotationStyle::SeeSaw.as_str(), "see-saw");
    assert_eq!(RotationStyle::parse("seesaw"), None);
}

#[test]
fn motion_mode_wire_names_round_trip() {
    assert_eq!(MotionMode::parse("bounce"), Some(MotionMode::Bounce));
    assert_eq!(MotionMode::parse(MotionMode::Float.as_str()), Some(MotionMode::Float));
    assert_eq!(MotionMode::parse("drift"), None);
}

// =============================================================
// Extrusion
// =============================================================

#[test]
fn resolution_zero_is_shallowest() {
    assert!(approx_eq(Extrusion::Resolution(0.0).depth(10.0), 1.0));
}

#[test]
fn resolution_fifty_is_default_multiplier() {
    assert!(approx_eq(Extrusion::Resolution(50.0).depth(10.0), 4.0));
}

#[test]
fn resolution_hundred_is_deepest() {
    assert!(approx_eq(Extrusion::Resolution(100.0).depth(10.0), 7.0));
}

#[test]
fn resolution_depth_is_monotonic() {
    let depths: Vec<f64> = (0..=10).map(|r| Extrusion::Resolution(f64::from(r) * 10.0).depth(4.2)).collect();
    assert!(depths.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn absolute_depth_ignores_text_size() {
    assert_eq!(Extrusion::Absolute(9.5).depth(100.0), 9.5);
}

#[test]
fn derived_geometry_scales_with_font_size() {
    let cfg = Configuration { font_size_px: 60.0, ..Configuration::default() };
    assert!(approx_eq(cfg.world_text_size(), 6.0));
    assert!(approx_eq(cfg.extrusion_depth(), 2.4));
    assert!(approx_eq(cfg.bevel_thickness(), 0.3));
    assert!(approx_eq(cfg.bevel_size(), 0.18));
}

// =============================================================
// Change detection
// =============================================================

#[test]
fn speed_change_does_not_touch_geometry() {
    let a = Configuration::default();
    let b = Configuration { speed_factor: 9.0, rotation_style: RotationStyle::Spin, ..a.clone() };
    assert!(!a.geometry_differs(&b));
    assert!(!a.appearance_differs(&b));
}

#[test]
fn text_and_extrusion_changes_touch_geometry() {
    let a = Configuration::default();
    assert!(a.geometry_differs(&Configuration { display_text: DisplayText::Clock, ..a.clone() }));
    assert!(a.geometry_differs(&Configuration { extrusion: Extrusion::Resolution(10.0), ..a.clone() }));
    assert!(a.geometry_differs(&Configuration { font_size_px: 43.0, ..a.clone() }));
}

#[test]
fn color_change_touches_appearance_only() {
    let a = Configuration::default();
    let b = Configuration { gradient: Some(GradientId::Fire), ..a.clone() };
    assert!(a.appearance_differs(&b));
    assert!(!a.geometry_differs(&b));
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validation_replaces_bad_fields_only() {
    let cfg = Configuration {
        font_size_px: 0.0,
        speed_factor: f64::NAN,
        wobble_freq_x: 0.5,
        horizontal_traverse_secs: -3.0,
        ..Configuration::default()
    };
    let (fixed, errors) = cfg.validated();
    assert_eq!(fixed.font_size_px, 42.0);
    assert_eq!(fixed.speed_factor, 5.0);
    assert_eq!(fixed.horizontal_traverse_secs, 22.0);
    assert_eq!(fixed.wobble_freq_x, 0.5);
    assert_eq!(errors.len(), 3);
}

#[test]
fn validation_rejects_out_of_range_resolution_and_depth() {
    let (fixed, errors) = Configuration { extrusion: Extrusion::Resolution(101.0), ..Configuration::default() }.validated();
    assert_eq!(fixed.extrusion, Extrusion::Resolution(50.0));
    assert_eq!(errors, vec![FieldError::OutOfRange { key: "resolution", value: 101.0 }]);

    let (fixed, errors) = Configuration { extrusion: Extrusion::Absolute(-1.0), ..Configuration::default() }.validated();
    assert_eq!(fixed.extrusion, Extrusion::Resolution(50.0));
    assert_eq!(errors.len(), 1);
}

// =============================================================
// Number parsing
// =============================================================

#[test]
fn parse_number_accepts_decimal_forms() {
    assert_eq!(parse_number("size", "42"), Ok(42.0));
    assert_eq!(parse_number("size", " 4.5 "), Ok(4.5));
    assert_eq!(parse_number("size", "1e2"), Ok(100.0));
    assert_eq!(parse_number("size", "-3"), Ok(-3.0));
}

#[test]
fn parse_number_rejects_garbage_and_non_finite() {
    assert_eq!(
        parse_number("size", "big"),
        Err(FieldError::NotANumber { key: "size", value: "big".to_owned() })
    );
    assert!(parse_number("size", "").is_err());
    assert!(parse_number("size", "NaN").is_err());
    assert!(parse_number("size", "inf").is_err());
}

#[test]
fn field_checks_enforce_ranges() {
    assert!(positive("speed", 0.0).is_err());
    assert!(positive("speed", 0.1).is_ok());
    assert!(non_negative("depth", 0.0).is_ok());
    assert!(non_negative("depth", -0.1).is_err());
    assert!(resolution("resolution", 100.0).is_ok());
    assert!(resolution("resolution", -1.0).is_err());
}

#[test]
fn field_error_messages_name_the_key() {
    let err = FieldError::UnknownValue { key: "spin", value: "loop".to_owned() };
    assert_eq!(err.to_string(), "`spin`: unknown value \"loop\"");
}

#[test]
fn configuration_serializes_for_display() {
    let json = serde_json::to_value(Configuration::default()).expect("serialize");
    assert_eq!(json["display_text"]["kind"], "literal");
    assert_eq!(json["rotation_style"], "wobble");
    assert_eq!(json["face_color"], "#ff6060");
    assert_eq!(json["gradient"], serde_json::Value::Null);
}
