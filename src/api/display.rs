use indexmap::IndexMap;

use crate::core::{PixelSize, ScrollBars, ViewHistory, Viewport, Window};
use crate::extensions::MapPlugin;
use crate::interaction::{ActiveTool, InteractionMode, ToolOverlay};
use crate::render::{DisplayBackend, RenderBufferStats, RenderBuffers};

use super::MapDisplayConfig;

/// Sizes seen while the host is in an interactive resize loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct ResizeState {
    pub(super) in_progress: bool,
    pub(super) pending: Option<PixelSize>,
}

/// The map control: owns the display buffers, the view state, the view
/// history and the active navigation tool.
///
/// All operations run synchronously on the caller's thread.
pub struct MapDisplay<B: DisplayBackend> {
    pub(super) backend: B,
    pub(super) buffers: RenderBuffers<B::Surface>,
    pub(super) viewport: Viewport,
    pub(super) model_extent: Option<Window>,
    pub(super) overview: Option<Window>,
    pub(super) history: ViewHistory,
    pub(super) tool: Option<ActiveTool>,
    pub(super) tool_overlay: Option<ToolOverlay>,
    pub(super) scroll_bars: ScrollBars,
    pub(super) resize: ResizeState,
    pub(super) plugins: IndexMap<String, Box<dyn MapPlugin>>,
    pub(super) config: MapDisplayConfig,
}

impl<B: DisplayBackend> MapDisplay<B> {
    #[must_use]
    pub fn config(&self) -> MapDisplayConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Extent reported by the controller when the model was last attached or resized.
    #[must_use]
    pub fn model_extent(&self) -> Option<Window> {
        self.model_extent
    }

    #[must_use]
    pub fn overview_extent(&self) -> Option<Window> {
        self.overview
    }

    #[must_use]
    pub fn history(&self) -> &ViewHistory {
        &self.history
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        InteractionMode::from_tool(self.tool.as_ref())
    }

    /// Transient graphics the active tool currently shows.
    #[must_use]
    pub fn tool_overlay(&self) -> Option<ToolOverlay> {
        self.tool_overlay
    }

    #[must_use]
    pub fn render_buffers(&self) -> &RenderBuffers<B::Surface> {
        &self.buffers
    }

    #[must_use]
    pub fn buffer_stats(&self) -> RenderBufferStats {
        self.buffers.stats()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }
}
