use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_HISTORY_CAPACITY, Dpi, PixelSize};
use crate::error::{MapError, MapResult};
use crate::interaction::MagnifyBehavior;
use crate::render::Color;

use super::DrawStyle;

/// Public display bootstrap configuration.
///
/// Serializable so hosts can persist display preferences next to their own
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapDisplayConfig {
    pub size: PixelSize,
    #[serde(default)]
    pub dpi: Dpi,
    #[serde(default = "default_background")]
    pub background: Color,
    /// Margin factor used by zoom in/out (`0.2` zooms by 1.4x).
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    /// Expansion applied to the model extent to get the overview.
    #[serde(default = "default_overview_margin")]
    pub overview_margin: f64,
    /// Relative scale change per mouse-wheel notch.
    #[serde(default = "default_wheel_zoom_step")]
    pub wheel_zoom_step: f64,
    /// Ground height of a point symbol; sizes the view when only a point is requested.
    #[serde(default = "default_point_symbol_height_m")]
    pub point_symbol_height_m: f64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default)]
    pub magnify: MagnifyBehavior,
    #[serde(default)]
    pub draw_style: DrawStyle,
    #[serde(default = "DrawStyle::highlight")]
    pub highlight_style: DrawStyle,
    #[serde(default = "default_tool_frame_color")]
    pub tool_frame_color: Color,
}

impl MapDisplayConfig {
    #[must_use]
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            dpi: Dpi::default(),
            background: default_background(),
            zoom_factor: default_zoom_factor(),
            overview_margin: default_overview_margin(),
            wheel_zoom_step: default_wheel_zoom_step(),
            point_symbol_height_m: default_point_symbol_height_m(),
            history_capacity: default_history_capacity(),
            magnify: MagnifyBehavior::default(),
            draw_style: DrawStyle::default(),
            highlight_style: DrawStyle::highlight(),
            tool_frame_color: default_tool_frame_color(),
        }
    }

    #[must_use]
    pub fn with_dpi(mut self, dpi: Dpi) -> Self {
        self.dpi = dpi;
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn with_zoom_factor(mut self, factor: f64) -> Self {
        self.zoom_factor = factor;
        self
    }

    #[must_use]
    pub fn with_overview_margin(mut self, margin: f64) -> Self {
        self.overview_margin = margin;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_step(mut self, step: f64) -> Self {
        self.wheel_zoom_step = step;
        self
    }

    #[must_use]
    pub fn with_point_symbol_height_m(mut self, height: f64) -> Self {
        self.point_symbol_height_m = height;
        self
    }

    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_magnify(mut self, behavior: MagnifyBehavior) -> Self {
        self.magnify = behavior;
        self
    }

    #[must_use]
    pub fn with_draw_style(mut self, style: DrawStyle) -> Self {
        self.draw_style = style;
        self
    }

    #[must_use]
    pub fn with_highlight_style(mut self, style: DrawStyle) -> Self {
        self.highlight_style = style;
        self
    }

    #[must_use]
    pub fn with_tool_frame_color(mut self, color: Color) -> Self {
        self.tool_frame_color = color;
        self
    }

    /// Serializes config to pretty JSON for settings files.
    pub fn to_json_pretty(self) -> MapResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| MapError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> MapResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| MapError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_background() -> Color {
    Color::WHITE
}

fn default_zoom_factor() -> f64 {
    0.2
}

fn default_overview_margin() -> f64 {
    0.2
}

fn default_wheel_zoom_step() -> f64 {
    0.05
}

fn default_point_symbol_height_m() -> f64 {
    2.0
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_tool_frame_color() -> Color {
    Color::BLACK
}
