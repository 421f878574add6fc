use crate::error::{MapError, MapResult};
use crate::interaction::MagnifyBehavior;

use super::{DrawStyle, MapDisplayConfig};

pub(super) fn validate_display_config(config: MapDisplayConfig) -> MapResult<MapDisplayConfig> {
    config.dpi.validate()?;
    config.background.validate()?;
    config.tool_frame_color.validate()?;
    validate_zoom_factor(config.zoom_factor)?;

    if !config.overview_margin.is_finite() || config.overview_margin < 0.0 {
        return Err(MapError::InvalidData(
            "overview margin must be finite and >= 0".to_owned(),
        ));
    }
    if !config.wheel_zoom_step.is_finite()
        || config.wheel_zoom_step <= 0.0
        || config.wheel_zoom_step >= 1.0
    {
        return Err(MapError::InvalidData(
            "wheel zoom step must be in (0, 1)".to_owned(),
        ));
    }
    if !config.point_symbol_height_m.is_finite() || config.point_symbol_height_m <= 0.0 {
        return Err(MapError::InvalidData(
            "point symbol height must be finite and > 0".to_owned(),
        ));
    }
    if config.history_capacity == 0 {
        return Err(MapError::InvalidData(
            "history capacity must be > 0".to_owned(),
        ));
    }

    validate_magnify_behavior(config.magnify)?;
    validate_draw_style(config.draw_style)?;
    validate_draw_style(config.highlight_style)?;
    Ok(config)
}

pub(super) fn validate_zoom_factor(factor: f64) -> MapResult<f64> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(MapError::InvalidData(
            "zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(factor)
}

pub(super) fn validate_scale(scale: f64) -> MapResult<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(MapError::InvalidData(
            "draw scale must be finite and > 0".to_owned(),
        ));
    }
    Ok(scale)
}

fn validate_magnify_behavior(behavior: MagnifyBehavior) -> MapResult<()> {
    let MagnifyBehavior {
        magnification,
        wheel_step,
        min_magnification,
        max_magnification,
    } = behavior;
    if ![magnification, wheel_step, min_magnification, max_magnification]
        .iter()
        .all(|value| value.is_finite())
    {
        return Err(MapError::InvalidData(
            "magnifier settings must be finite".to_owned(),
        ));
    }
    if min_magnification <= 1.0 || max_magnification < min_magnification {
        return Err(MapError::InvalidData(
            "magnification range must satisfy 1 < min <= max".to_owned(),
        ));
    }
    if wheel_step <= 1.0 {
        return Err(MapError::InvalidData(
            "magnifier wheel step must be > 1".to_owned(),
        ));
    }
    Ok(())
}

fn validate_draw_style(style: DrawStyle) -> MapResult<()> {
    style.line_color.validate()?;
    style.fill_color.validate()?;
    style.text_color.validate()?;
    for (name, value) in [
        ("line width", style.line_width),
        ("point size", style.point_size_px),
        ("font size", style.font_size_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(MapError::InvalidData(format!(
                "{name} must be finite and > 0"
            )));
        }
    }
    Ok(())
}
