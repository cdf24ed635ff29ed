#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_matches_constants() {
    let config = EngineConfig::default();
    assert_eq!(config.min_drag_px, 20.0);
    assert_eq!(config.hit_tolerance_px, 8.0);
    assert_eq!(config.plane_palette.len(), 8);
    assert_eq!(config.label_font, "bold 14px Arial");
    assert_eq!(config.compass_default_size, 300.0);
    assert_eq!(config.compass_default_opacity, 0.7);
    assert!(config.validate().is_ok());
}

// =============================================================
// from_json
// =============================================================

#[test]
fn empty_object_yields_defaults() {
    let config = EngineConfig::from_json("{}").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn partial_object_overrides_named_fields() {
    let config = EngineConfig::from_json(r#"{ "min_drag_px": 35, "label_font": "12px sans-serif" }"#).unwrap();
    assert_eq!(config.min_drag_px, 35.0);
    assert_eq!(config.label_font, "12px sans-serif");
    assert_eq!(config.hit_tolerance_px, 8.0);
}

#[test]
fn malformed_json_is_parse_error() {
    let err = EngineConfig::from_json("{ nope").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn empty_palette_rejected() {
    let err = EngineConfig::from_json(r#"{ "plane_palette": [] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPalette));
}

#[test]
fn negative_drag_threshold_rejected() {
    let err = EngineConfig::from_json(r#"{ "min_drag_px": -1 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { field: "min_drag_px", .. }));
}

#[test]
fn zero_drag_threshold_rejected() {
    let err = EngineConfig::from_json(r#"{ "min_drag_px": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { field: "min_drag_px", value } if value == 0.0));
}

#[test]
fn compass_defaults_must_be_in_range() {
    let err = EngineConfig::from_json(r#"{ "compass_default_size": 900 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { field: "compass_default_size", .. }));
    let err = EngineConfig::from_json(r#"{ "compass_default_opacity": 1.5 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { field: "compass_default_opacity", .. }));
}

#[test]
fn error_messages_are_readable() {
    let err = ConfigError::OutOfRange { field: "min_drag_px", value: -2.0 };
    assert_eq!(err.to_string(), "invalid value for min_drag_px: -2");
    assert_eq!(ConfigError::EmptyPalette.to_string(), "plane_palette must not be empty");
}

// =============================================================
// plane_color
// =============================================================

#[test]
fn plane_color_indexes_from_one() {
    let config = EngineConfig::default();
    assert_eq!(config.plane_color(1), DEFAULT_PLANE_PALETTE[0]);
    assert_eq!(config.plane_color(8), DEFAULT_PLANE_PALETTE[7]);
}

#[test]
fn plane_color_wraps_past_palette() {
    let config = EngineConfig::default();
    assert_eq!(config.plane_color(9), DEFAULT_PLANE_PALETTE[0]);
    assert_eq!(config.plane_color(11), DEFAULT_PLANE_PALETTE[2]);
}

#[test]
fn plane_color_zero_uses_first() {
    let config = EngineConfig::default();
    assert_eq!(config.plane_color(0), DEFAULT_PLANE_PALETTE[0]);
}

#[test]
fn plane_color_with_short_palette() {
    let config = EngineConfig { plane_palette: vec!["red".into(), "blue".into()], ..EngineConfig::default() };
    assert_eq!(config.plane_color(1), "red");
    assert_eq!(config.plane_color(2), "blue");
    assert_eq!(config.plane_color(3), "red");
}
