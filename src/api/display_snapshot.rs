use serde::{Deserialize, Serialize};

use crate::core::{Dpi, DrawHistoryEntry, PixelSize, ScrollBars, Window};
use crate::interaction::InteractionMode;
use crate::render::{DisplayBackend, RenderBufferStats};

use super::MapDisplay;

/// Serializable display state used by regression tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub size: PixelSize,
    pub dpi: Dpi,
    pub extent: Option<Window>,
    pub scale: Option<f64>,
    pub ground_to_pixel: Option<f64>,
    pub model_extent: Option<Window>,
    pub overview: Option<Window>,
    pub history: Vec<DrawHistoryEntry>,
    pub history_cursor: Option<usize>,
    pub interaction_mode: InteractionMode,
    pub scroll_bars: ScrollBars,
    pub buffer_stats: RenderBufferStats,
    pub plugin_ids: Vec<String>,
}

impl<B: DisplayBackend> MapDisplay<B> {
    #[must_use]
    pub fn snapshot(&self) -> MapSnapshot {
        let metrics = self.viewport.metrics();
        MapSnapshot {
            size: metrics.size(),
            dpi: metrics.dpi(),
            extent: self.viewport.extent(),
            scale: self.viewport.scale(),
            ground_to_pixel: self.viewport.ground_to_pixel(),
            model_extent: self.model_extent,
            overview: self.overview,
            history: self.history.entries().copied().collect(),
            history_cursor: self.history.cursor(),
            interaction_mode: self.interaction_mode(),
            scroll_bars: self.scroll_bars,
            buffer_stats: self.buffers.stats(),
            plugin_ids: self.plugins.keys().cloned().collect(),
        }
    }
}
