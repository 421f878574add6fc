use serde::{Deserialize, Serialize};

use crate::core::{GroundPoint, PixelPoint};

/// Wheel delta reported for one notch by most platforms.
pub const WHEEL_DELTA_PER_NOTCH: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Other(char),
}

/// Pointer event with the position already converted to ground space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub pixel: PixelPoint,
    pub ground: GroundPoint,
    /// Button pressed/released, or held during a move.
    pub button: Option<MouseButton>,
}

impl PointerInput {
    #[must_use]
    pub fn new(pixel: PixelPoint, ground: GroundPoint, button: Option<MouseButton>) -> Self {
        Self {
            pixel,
            ground,
            button,
        }
    }

    #[must_use]
    pub fn is_left(self) -> bool {
        self.button == Some(MouseButton::Left)
    }

    #[must_use]
    pub fn is_right(self) -> bool {
        self.button == Some(MouseButton::Right)
    }
}

/// Number of whole wheel notches in `delta` (at least one for any non-zero delta).
#[must_use]
pub fn wheel_notches(delta: f64) -> f64 {
    (delta.abs() / WHEEL_DELTA_PER_NOTCH).round().max(1.0)
}
