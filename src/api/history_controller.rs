use tracing::debug;

use crate::core::DrawHistoryEntry;
use crate::error::MapResult;
use crate::render::DisplayBackend;

use super::{MapDisplay, SpatialController};

impl<B: DisplayBackend> MapDisplay<B> {
    #[must_use]
    pub fn is_back_enabled(&self) -> bool {
        self.history.is_back_enabled()
    }

    #[must_use]
    pub fn is_forward_enabled(&self) -> bool {
        self.history.is_forward_enabled()
    }

    /// Redraws the previous history entry. Returns `false` at the oldest entry.
    pub fn back<C: SpatialController>(&mut self, controller: &C) -> MapResult<bool> {
        let Some(entry) = self.history.back() else {
            return Ok(false);
        };
        debug!(cursor = ?self.history.cursor(), "history back");
        self.redraw_history_entry(controller, entry)?;
        Ok(true)
    }

    /// Redraws the next history entry. Returns `false` at the newest entry.
    pub fn forward<C: SpatialController>(&mut self, controller: &C) -> MapResult<bool> {
        let Some(entry) = self.history.forward() else {
            return Ok(false);
        };
        debug!(cursor = ?self.history.cursor(), "history forward");
        self.redraw_history_entry(controller, entry)?;
        Ok(true)
    }

    fn redraw_history_entry<C: SpatialController>(
        &mut self,
        controller: &C,
        entry: DrawHistoryEntry,
    ) -> MapResult<()> {
        self.discard_tool();
        self.set_center_and_scale(controller, entry.center(), entry.scale, false)
    }
}
