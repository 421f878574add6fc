mod input;
mod tools;

pub use input::{Key, MouseButton, PointerInput, WHEEL_DELTA_PER_NOTCH, wheel_notches};
pub use tools::{
    ActiveTool, DisplayToolId, MagnifyTool, NewCenterTool, PanTool, ToolAction, ToolContext,
    ToolKind, ToolOverlay, ViewChange, ZoomRectangleTool,
};

use serde::{Deserialize, Serialize};

/// Whether a navigation tool currently captures pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Active(ToolKind),
}

impl InteractionMode {
    #[must_use]
    pub fn from_tool(tool: Option<&ActiveTool>) -> Self {
        tool.map_or(Self::Idle, |tool| Self::Active(tool.kind()))
    }
}

/// Tuning for the magnifier lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnifyBehavior {
    /// Initial lens magnification.
    pub magnification: f64,
    /// Multiplier applied per wheel notch.
    pub wheel_step: f64,
    pub min_magnification: f64,
    pub max_magnification: f64,
}

impl Default for MagnifyBehavior {
    fn default() -> Self {
        Self {
            magnification: 4.0,
            wheel_step: 1.25,
            min_magnification: 1.5,
            max_magnification: 64.0,
        }
    }
}
