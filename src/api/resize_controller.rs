use tracing::debug;

use crate::core::{PixelSize, ScreenMetrics};
use crate::error::MapResult;
use crate::extensions::MapEvent;
use crate::render::DisplayBackend;

use super::{MapDisplay, SpatialController};

impl<B: DisplayBackend> MapDisplay<B> {
    /// Reallocates the buffers for a new display size and redraws at the same
    /// center and scale.
    ///
    /// Inside a [`MapDisplay::begin_resize`] / [`MapDisplay::end_resize`] pair
    /// only the last size is applied, once the loop ends. A size without area
    /// defers drawing until a usable size arrives.
    pub fn resize<C: SpatialController>(
        &mut self,
        controller: &C,
        size: PixelSize,
    ) -> MapResult<()> {
        if self.resize.in_progress {
            self.resize.pending = Some(size);
            return Ok(());
        }
        self.apply_resize(controller, size)
    }

    /// Marks the start of an interactive resize loop.
    pub fn begin_resize(&mut self) {
        self.resize.in_progress = true;
    }

    /// Ends an interactive resize loop, applying the last size seen.
    pub fn end_resize<C: SpatialController>(&mut self, controller: &C) -> MapResult<()> {
        self.resize.in_progress = false;
        match self.resize.pending.take() {
            Some(size) => self.apply_resize(controller, size),
            None => Ok(()),
        }
    }

    /// Disposes the display buffers; the next resize allocates them again.
    pub fn release(&mut self) {
        self.discard_tool();
        self.buffers.release();
        debug!("display buffers released");
    }

    fn apply_resize<C: SpatialController>(
        &mut self,
        controller: &C,
        size: PixelSize,
    ) -> MapResult<()> {
        self.discard_tool();
        let metrics = ScreenMetrics::new(size, self.config.dpi)?;
        self.viewport.set_metrics(metrics)?;
        self.config.size = size;
        let allocated = self.buffers.resize(&mut self.backend, size)?;
        self.emit_plugin_event(MapEvent::Resized {
            width: size.width,
            height: size.height,
        });
        if !allocated {
            return Ok(());
        }

        self.refresh_model_extent(controller);
        match (self.viewport.center(), self.viewport.scale()) {
            (Some(center), Some(scale)) => {
                self.set_center_and_scale(controller, center, scale, false)?;
            }
            // A view requested while the display had no area was dropped.
            _ if self.overview.is_some() => self.draw_overview(controller)?,
            _ => {
                self.draw_scene(controller)?;
                self.sync_scroll_bars();
            }
        }
        Ok(())
    }
}
