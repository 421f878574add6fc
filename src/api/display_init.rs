use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ScreenMetrics, ScrollBars, ViewHistory, Viewport};
use crate::error::{MapError, MapResult};
use crate::render::{DisplayBackend, RenderBuffers};

use super::display::ResizeState;
use super::validation::validate_display_config;
use super::{MapDisplay, MapDisplayConfig};

impl<B: DisplayBackend> MapDisplay<B> {
    /// Creates a display with allocated buffers and no model attached.
    pub fn new(mut backend: B, config: MapDisplayConfig) -> MapResult<Self> {
        if !config.size.is_valid() {
            return Err(MapError::InvalidViewport {
                width: config.size.width,
                height: config.size.height,
            });
        }
        let config = validate_display_config(config)?;

        let metrics = ScreenMetrics::new(config.size, config.dpi)?;
        let history = ViewHistory::with_capacity(config.history_capacity)?;
        let mut buffers = RenderBuffers::new(config.background);
        buffers.allocate(&mut backend, config.size)?;
        debug!(
            width = config.size.width,
            height = config.size.height,
            "map display created"
        );

        Ok(Self {
            backend,
            buffers,
            viewport: Viewport::new(metrics),
            model_extent: None,
            overview: None,
            history,
            tool: None,
            tool_overlay: None,
            scroll_bars: ScrollBars::default(),
            resize: ResizeState::default(),
            plugins: IndexMap::new(),
            config,
        })
    }
}
