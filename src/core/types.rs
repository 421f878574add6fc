use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};

/// Position in ground space (meters, Y grows northwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: f64,
    pub y: f64,
}

impl GroundPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn validate(self) -> MapResult<Self> {
        if !self.is_finite() {
            return Err(MapError::InvalidData(
                "ground position must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Position in display space (pixels, Y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(self) -> MapResult<Self> {
        if !self.is_valid() {
            return Err(MapError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Integer rectangle in display space. The origin may lie outside the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clips this rectangle to `0..size`, returning `None` when nothing remains.
    #[must_use]
    pub fn clipped_to(self, size: PixelSize) -> Option<Self> {
        let left = i64::from(self.x).max(0);
        let top = i64::from(self.y).max(0);
        let right = (i64::from(self.x) + i64::from(self.width)).min(i64::from(size.width));
        let bottom = (i64::from(self.y) + i64::from(self.height)).min(i64::from(size.height));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self {
            x: left as i32,
            y: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// Dots per inch of the output device, used to express the display in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dpi {
    pub x: f64,
    pub y: f64,
}

impl Dpi {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn validate(self) -> MapResult<Self> {
        if !self.x.is_finite() || !self.y.is_finite() || self.x <= 0.0 || self.y <= 0.0 {
            return Err(MapError::InvalidData(
                "dpi must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::new(96.0, 96.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipping_drops_outside_parts() {
        let size = PixelSize::new(100, 50);
        let rect = PixelRect::new(-10, 40, 30, 30);
        assert_eq!(rect.clipped_to(size), Some(PixelRect::new(0, 40, 20, 10)));
        assert_eq!(PixelRect::new(100, 0, 5, 5).clipped_to(size), None);
    }
}
