use serde::{Deserialize, Serialize};

use crate::core::types::{GroundPoint, PixelPoint};
use crate::core::window::Window;

/// Affine ground <-> display mapping for one view.
///
/// Display Y grows downwards while ground Y grows northwards, so the Y axis is
/// anchored on the top edge (`max.y`) of the visible extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    origin_x: f64,
    origin_y: f64,
    ground_to_pixel: f64,
}

impl ViewTransform {
    /// Builds the mapping for `extent` drawn at `ground_to_pixel` pixels per meter.
    #[must_use]
    pub fn new(extent: Window, ground_to_pixel: f64) -> Self {
        Self {
            origin_x: extent.min().x,
            origin_y: extent.max().y,
            ground_to_pixel,
        }
    }

    #[must_use]
    pub fn ground_to_pixel(self) -> f64 {
        self.ground_to_pixel
    }

    #[must_use]
    pub fn easting_to_screen(self, x: f64) -> f64 {
        (x - self.origin_x) * self.ground_to_pixel
    }

    #[must_use]
    pub fn northing_to_screen(self, y: f64) -> f64 {
        (self.origin_y - y) * self.ground_to_pixel
    }

    #[must_use]
    pub fn ground_to_screen(self, point: GroundPoint) -> PixelPoint {
        PixelPoint::new(
            self.easting_to_screen(point.x),
            self.northing_to_screen(point.y),
        )
    }

    #[must_use]
    pub fn screen_to_ground(self, pixel: PixelPoint) -> GroundPoint {
        GroundPoint::new(
            pixel.x / self.ground_to_pixel + self.origin_x,
            self.origin_y - pixel.y / self.ground_to_pixel,
        )
    }

    /// Converts a ground length (meters) into pixels.
    #[must_use]
    pub fn length_to_screen(self, ground_length: f64) -> f64 {
        ground_length * self.ground_to_pixel
    }

    /// Converts a pixel count into a ground length (meters).
    #[must_use]
    pub fn screen_to_length(self, pixels: f64) -> f64 {
        pixels / self.ground_to_pixel
    }
}
