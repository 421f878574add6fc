use tracing::trace;

use crate::core::{ScrollAxis, ScrollBars, ScrollEvent};
use crate::error::MapResult;
use crate::render::DisplayBackend;

use super::{MapDisplay, SpatialController};

impl<B: DisplayBackend> MapDisplay<B> {
    /// Scrollbar ranges and thumbs matching the current view.
    #[must_use]
    pub fn scroll_bars(&self) -> ScrollBars {
        self.scroll_bars
    }

    /// Applies a scrollbar notification.
    ///
    /// While the thumb moves the live buffer is shifted as a preview; the model
    /// is redrawn (without history) when scrolling ends.
    pub fn scroll<C: SpatialController>(
        &mut self,
        controller: &C,
        axis: ScrollAxis,
        event: ScrollEvent,
    ) -> MapResult<()> {
        let Some(ground_to_pixel) = self.viewport.ground_to_pixel() else {
            return Ok(());
        };
        if event.is_end() {
            self.redraw(controller)?;
            self.sync_scroll_bars();
            return Ok(());
        }

        let (dx, dy) = axis.ground_shift(event.old_value, event.new_value);
        let px = -(dx * ground_to_pixel) as i32;
        let py = (dy * ground_to_pixel) as i32;
        if px == 0 && py == 0 {
            return Ok(());
        }

        self.viewport.shift(dx, dy)?;
        let fill = self.buffers.background();
        self.buffers
            .shift_and_fill(&mut self.backend, px, py, fill)?;
        trace!(?axis, px, py, "scroll preview");
        Ok(())
    }

    pub(super) fn sync_scroll_bars(&mut self) {
        self.scroll_bars =
            ScrollBars::compute(self.model_extent, self.overview, self.viewport.extent());
    }
}
