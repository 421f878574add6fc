use serde::{Deserialize, Serialize};

use crate::core::{PixelSize, Window};
use crate::interaction::{InteractionMode, ToolKind};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPluginContext {
    pub size: PixelSize,
    pub extent: Option<Window>,
    pub scale: Option<f64>,
    pub overview: Option<Window>,
    pub interaction_mode: InteractionMode,
    pub history_len: usize,
    pub history_cursor: Option<usize>,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    ExtentChanged { extent: Window, scale: f64 },
    HistoryAppended { len: usize, cursor: usize },
    ToolStarted { kind: ToolKind },
    ToolFinished { kind: ToolKind },
    ToolEscaped { kind: ToolKind },
    Redrawn,
    FrameDropped,
    Resized { width: u32, height: u32 },
}

/// Observer hook for host-side logic (status bars, scale readouts, logging).
///
/// Plugins see events and a context snapshot; they cannot mutate the display.
pub trait MapPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: MapEvent, context: MapPluginContext);
}
