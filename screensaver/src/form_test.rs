#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// FormState projection
// =============================================================

#[test]
fn default_form_shows_default_configuration() {
    let form = FormState::default();
    assert_eq!(form.text_input, "Goblinz Rule");
    assert_eq!(form.source, TextSource::Text);
    assert_eq!(form.size_slider, 42);
    assert_eq!(form.speed_slider, 5);
    assert_eq!(form.resolution_slider, 50);
    assert_eq!(form.spin_style, RotationStyle::Wobble);
    assert_eq!(form.color_picker, "#ff6060");
    assert_eq!(form.surface, Surface::Solid);
}

#[test]
fn form_round_trips_default_configuration() {
    let cfg = Configuration::default();
    let (back, errors) = FormState::from_config(&cfg).to_config(&cfg);
    assert!(errors.is_empty());
    assert_eq!(back, cfg);
}

#[test]
fn time_radio_selects_clock_and_keeps_typed_text_out() {
    let form = FormState { source: TextSource::Time, text_input: "ignored".to_owned(), ..FormState::default() };
    let (cfg, _) = form.to_config(&Configuration::default());
    assert_eq!(cfg.display_text, DisplayText::Clock);
}

#[test]
fn clock_configuration_shows_time_radio() {
    let cfg = Configuration { display_text: DisplayText::Clock, ..Configuration::default() };
    let form = FormState::from_config(&cfg);
    assert_eq!(form.source, TextSource::Time);
    assert!(form.text_input.is_empty());
}

#[test]
fn sliders_snap_and_clamp() {
    let cfg = Configuration { font_size_px: 250.0, speed_factor: 2.6, ..Configuration::default() };
    let form = FormState::from_config(&cfg);
    assert_eq!(form.size_slider, 100);
    assert_eq!(form.speed_slider, 3);
}

#[test]
fn absolute_depth_maps_back_onto_resolution_slider() {
    let cfg = Configuration { font_size_px: 40.0, extrusion: Extrusion::Absolute(2.8), ..Configuration::default() };
    assert_eq!(FormState::from_config(&cfg).resolution_slider, 100);
}

#[test]
fn fields_not_on_dialog_come_from_base() {
    let base = Configuration { see_saw_freq: 0.9, horizontal_traverse_secs: 5.0, ..Configuration::default() };
    let (cfg, _) = FormState::default().to_config(&base);
    assert_eq!(cfg.see_saw_freq, 0.9);
    assert_eq!(cfg.horizontal_traverse_secs, 5.0);
}

#[test]
fn solid_surface_drops_gradient() {
    let form = FormState { surface: Surface::Solid, gradient: Some(GradientId::Ocean), ..FormState::default() };
    assert_eq!(form.to_config(&Configuration::default()).0.gradient, None);
}

#[test]
fn bad_color_picker_value_falls_back() {
    let form = FormState { color_picker: "chartreuse".to_owned(), ..FormState::default() };
    let (cfg, errors) = form.to_config(&Configuration::default());
    assert_eq!(cfg.face_color, Configuration::default().face_color);
    assert_eq!(errors.len(), 1);
}

#[test]
fn zero_speed_slider_is_rejected() {
    let form = FormState { speed_slider: 0, ..FormState::default() };
    let (cfg, errors) = form.to_config(&Configuration::default());
    assert_eq!(cfg.speed_factor, 5.0);
    assert_eq!(errors, vec![FieldError::OutOfRange { key: "speed", value: 0.0 }]);
}

// =============================================================
// DesktopState
// =============================================================

#[test]
fn headless_hides_chrome_and_opens_preview() {
    let desktop = DesktopState::new(&Configuration::default(), true);
    assert!(!desktop.chrome_visible());
    assert!(desktop.preview_open);

    let desktop = DesktopState::new(&Configuration::default(), false);
    assert!(desktop.chrome_visible());
    assert!(!desktop.preview_open);
}

#[test]
fn apply_texture_with_selection_switches_to_textured() {
    let mut desktop = DesktopState::new(&Configuration::default(), false);
    desktop.open_texture_window();
    desktop.select_gradient(GradientId::Fire);
    assert!(desktop.apply_texture());
    assert!(!desktop.texture_window_open);
    assert_eq!(desktop.form.surface, Surface::Textured);
    assert_eq!(desktop.form.gradient, Some(GradientId::Fire));
}

#[test]
fn apply_texture_without_selection_changes_nothing() {
    let mut desktop = DesktopState::new(&Configuration::default(), false);
    desktop.open_texture_window();
    assert!(!desktop.apply_texture());
    assert_eq!(desktop.form.surface, Surface::Solid);
}

#[test]
fn reapplying_same_gradient_reports_no_change() {
    let cfg = Configuration { gradient: Some(GradientId::Ocean), ..Configuration::default() };
    let mut desktop = DesktopState::new(&cfg, false);
    desktop.open_texture_window();
    assert_eq!(desktop.pending_gradient, Some(GradientId::Ocean));
    assert!(!desktop.apply_texture());
}

#[test]
fn closing_texture_window_discards_pending_choice() {
    let mut desktop = DesktopState::new(&Configuration::default(), false);
    desktop.open_texture_window();
    desktop.select_gradient(GradientId::Chrome);
    desktop.close_texture_window();
    assert_eq!(desktop.pending_gradient, None);
    assert_eq!(desktop.form.gradient, None);
}
