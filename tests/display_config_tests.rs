use map_display::MapError;
use map_display::api::{DrawStyle, MapDisplay, MapDisplayConfig};
use map_display::core::{DEFAULT_HISTORY_CAPACITY, Dpi, PixelSize};
use map_display::interaction::MagnifyBehavior;
use map_display::render::{Color, PixelBackend};

fn base() -> MapDisplayConfig {
    MapDisplayConfig::new(PixelSize::new(640, 480))
}

#[test]
fn defaults_match_documented_values() {
    let config = base();
    assert_eq!(config.dpi, Dpi::new(96.0, 96.0));
    assert_eq!(config.background, Color::WHITE);
    assert_eq!(config.zoom_factor, 0.2);
    assert_eq!(config.overview_margin, 0.2);
    assert_eq!(config.wheel_zoom_step, 0.05);
    assert_eq!(config.point_symbol_height_m, 2.0);
    assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
    assert_eq!(config.magnify, MagnifyBehavior::default());
    assert_eq!(config.draw_style, DrawStyle::default());
    assert_eq!(config.highlight_style, DrawStyle::highlight());
}

#[test]
fn config_json_round_trip() {
    let config = base()
        .with_dpi(Dpi::new(120.0, 110.0))
        .with_background(Color::rgb(0.9, 0.95, 1.0))
        .with_zoom_factor(0.5)
        .with_overview_margin(0.05)
        .with_wheel_zoom_step(0.1)
        .with_history_capacity(8)
        .with_tool_frame_color(Color::rgb(1.0, 0.0, 0.0));

    let json = config.to_json_pretty().expect("serialize");
    let parsed = MapDisplayConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let parsed = MapDisplayConfig::from_json_str(r#"{"size":{"width":640,"height":480}}"#)
        .expect("parse");
    assert_eq!(parsed, base());
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = MapDisplayConfig::from_json_str("{").expect_err("malformed");
    assert!(matches!(err, MapError::InvalidData(_)));
}

#[test]
fn zero_size_display_is_rejected() {
    let config = MapDisplayConfig::new(PixelSize::new(0, 480));
    let err = MapDisplay::new(PixelBackend::default(), config)
        .err()
        .expect("zero size must fail");
    assert!(matches!(
        err,
        MapError::InvalidViewport {
            width: 0,
            height: 480
        }
    ));
}

#[test]
fn invalid_tuning_is_rejected_at_init() {
    let invalid = [
        base().with_zoom_factor(0.0),
        base().with_overview_margin(-0.1),
        base().with_wheel_zoom_step(1.0),
        base().with_point_symbol_height_m(0.0),
        base().with_history_capacity(0),
        base().with_dpi(Dpi::new(0.0, 96.0)),
        base().with_background(Color::rgb(2.0, 0.0, 0.0)),
        base().with_magnify(MagnifyBehavior {
            min_magnification: 1.0,
            ..MagnifyBehavior::default()
        }),
        base().with_draw_style(DrawStyle::default().with_line(Color::BLACK, 0.0)),
    ];

    for config in invalid {
        let result = MapDisplay::new(PixelBackend::default(), config);
        assert!(
            matches!(result, Err(MapError::InvalidData(_))),
            "config should be rejected: {config:?}"
        );
    }
}

#[test]
fn history_capacity_is_honored() {
    let mut display =
        MapDisplay::new(PixelBackend::default(), base().with_history_capacity(2)).expect("init");
    assert_eq!(display.history().capacity(), 2);
    display.release();
    assert!(!display.render_buffers().is_allocated());
}
