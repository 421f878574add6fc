use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Pens and brushes handed to the host's drawing callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawStyle {
    pub line_color: Color,
    pub line_width: f64,
    pub fill_color: Color,
    /// Side of the square drawn for a point, in pixels.
    pub point_size_px: f64,
    pub text_color: Color,
    pub font_size_px: f64,
}

impl DrawStyle {
    /// Default style for selection highlighting.
    #[must_use]
    pub fn highlight() -> Self {
        let magenta = Color::rgb(1.0, 0.0, 1.0);
        Self {
            line_color: magenta,
            line_width: 2.0,
            fill_color: magenta,
            point_size_px: 7.0,
            text_color: magenta,
            font_size_px: 12.0,
        }
    }

    #[must_use]
    pub fn with_line(mut self, color: Color, width: f64) -> Self {
        self.line_color = color;
        self.line_width = width;
        self
    }

    #[must_use]
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    #[must_use]
    pub fn with_point_size_px(mut self, size: f64) -> Self {
        self.point_size_px = size;
        self
    }
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            line_color: Color::BLACK,
            line_width: 1.0,
            fill_color: Color::rgb(0.8, 0.8, 0.8),
            point_size_px: 5.0,
            text_color: Color::BLACK,
            font_size_px: 12.0,
        }
    }
}
