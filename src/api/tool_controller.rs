use tracing::{debug, trace, warn};

use crate::error::MapResult;
use crate::extensions::MapEvent;
use crate::interaction::{
    ActiveTool, DisplayToolId, ToolAction, ToolContext, ToolKind, ViewChange,
};
use crate::render::DisplayBackend;

use super::navigation_controller::overview_tolerance;
use super::{MapDisplay, SpatialController};

impl<B: DisplayBackend> MapDisplay<B> {
    /// Runs a navigation request. Any active tool is escaped first.
    ///
    /// Returns `false` when the request is currently disabled (see
    /// [`MapDisplay::is_enabled`]) or when an interactive tool could not start.
    pub fn do_tool<C: SpatialController>(
        &mut self,
        controller: &C,
        id: DisplayToolId,
    ) -> MapResult<bool> {
        self.escape_tool(controller)?;
        if !self.is_enabled(id) {
            debug!(?id, "navigation request is disabled");
            return Ok(false);
        }

        match id {
            DisplayToolId::Overview => self.draw_overview(controller)?,
            DisplayToolId::ZoomIn => self.zoom_in(controller, self.config.zoom_factor)?,
            DisplayToolId::ZoomOut => self.zoom_out(controller, self.config.zoom_factor)?,
            DisplayToolId::DrawScale(scale) => self.set_scale(controller, scale)?,
            DisplayToolId::MapRefresh => {
                self.redraw(controller)?;
            }
            DisplayToolId::Previous => return self.back(controller),
            DisplayToolId::Next => return self.forward(controller),
            DisplayToolId::ZoomRectangle => {
                return self.start_tool(controller, ToolKind::ZoomRectangle);
            }
            DisplayToolId::Magnify => return self.start_tool(controller, ToolKind::Magnify),
            DisplayToolId::NewCenter => return self.start_tool(controller, ToolKind::NewCenter),
            DisplayToolId::Pan => return self.start_tool(controller, ToolKind::Pan),
        }
        Ok(true)
    }

    /// Whether `id` can run in the current state.
    #[must_use]
    pub fn is_enabled(&self, id: DisplayToolId) -> bool {
        let has_view = self.viewport.has_view();
        match id {
            DisplayToolId::Previous => self.history.is_back_enabled(),
            DisplayToolId::Next => self.history.is_forward_enabled(),
            DisplayToolId::Overview => has_view && self.is_overview_enabled(),
            DisplayToolId::ZoomOut => match (self.viewport.extent(), self.overview) {
                (Some(extent), Some(overview)) => {
                    !overview.is_enclosed_by(extent.expanded_by(overview_tolerance(overview)))
                }
                (Some(_), None) => true,
                _ => false,
            },
            DisplayToolId::ZoomIn
            | DisplayToolId::ZoomRectangle
            | DisplayToolId::DrawScale(_)
            | DisplayToolId::Magnify
            | DisplayToolId::NewCenter
            | DisplayToolId::Pan
            | DisplayToolId::MapRefresh => has_view,
        }
    }

    /// Starts an interactive tool, escaping the active one first.
    ///
    /// Fails (returns `false`, nothing changes) while there is no view.
    pub fn start_tool<C: SpatialController>(
        &mut self,
        controller: &C,
        kind: ToolKind,
    ) -> MapResult<bool> {
        if !self.viewport.has_view() {
            debug!(?kind, "cannot start a tool without a view");
            return Ok(false);
        }
        self.escape_tool(controller)?;
        self.tool = Some(ActiveTool::start(kind, self.config.magnify));
        debug!(?kind, "tool started");
        self.emit_plugin_event(MapEvent::ToolStarted { kind });
        Ok(true)
    }

    /// Abandons the active tool, leaving the view unchanged and removing any
    /// tool graphics. Calling it while idle does nothing.
    pub fn escape_tool<C: SpatialController>(&mut self, controller: &C) -> MapResult<bool> {
        let had_overlay = self.tool_overlay.is_some();
        let panned = self.tool.as_ref().is_some_and(|tool| tool.pan_offset() != (0, 0));
        if !self.discard_tool() {
            return Ok(false);
        }
        // The clean buffer still holds the pre-pan view, so copying it back
        // also undoes a pan preview.
        if had_overlay || panned {
            self.refresh_overlay(controller)?;
        }
        Ok(true)
    }

    #[must_use]
    pub fn active_tool_kind(&self) -> Option<ToolKind> {
        self.tool.as_ref().map(ActiveTool::kind)
    }

    /// Drops the active tool without repainting. Returns `false` when idle.
    pub(super) fn discard_tool(&mut self) -> bool {
        let Some(tool) = self.tool.take() else {
            return false;
        };
        self.tool_overlay = None;
        let (dx, dy) = tool.pan_offset();
        if (dx, dy) != (0, 0) {
            if let Some(ground_to_pixel) = self.viewport.ground_to_pixel() {
                let undo = self.viewport.shift(
                    f64::from(dx) / ground_to_pixel,
                    -f64::from(dy) / ground_to_pixel,
                );
                if let Err(err) = undo {
                    warn!(error = %err, "failed to undo pan preview");
                }
            }
        }
        let kind = tool.kind();
        debug!(?kind, "tool escaped");
        self.emit_plugin_event(MapEvent::ToolEscaped { kind });
        true
    }

    pub(super) fn tool_context(&self) -> Option<ToolContext> {
        Some(ToolContext {
            transform: self.viewport.transform()?,
            extent: self.viewport.extent()?,
            scale: self.viewport.scale()?,
            zoom_factor: self.config.zoom_factor,
        })
    }

    pub(super) fn apply_tool_action<C: SpatialController>(
        &mut self,
        controller: &C,
        action: ToolAction,
    ) -> MapResult<()> {
        match action {
            ToolAction::None => Ok(()),
            ToolAction::Overlay(overlay) => {
                if overlay.is_none() && self.tool_overlay.is_none() {
                    return Ok(());
                }
                self.tool_overlay = overlay;
                self.refresh_overlay(controller).map(|_| ())
            }
            ToolAction::PanPixels { dx, dy } => self.pan_pixels(dx, dy),
            ToolAction::Commit(change) => self.finish_tool(controller, change),
            ToolAction::Escape => self.escape_tool(controller).map(|_| ()),
        }
    }

    /// Shifts the view so content moves by `(dx, dy)` pixels and previews it
    /// without asking the model to redraw.
    pub(super) fn pan_pixels(&mut self, dx: i32, dy: i32) -> MapResult<()> {
        let Some(ground_to_pixel) = self.viewport.ground_to_pixel() else {
            return Ok(());
        };
        self.viewport.shift(
            -f64::from(dx) / ground_to_pixel,
            f64::from(dy) / ground_to_pixel,
        )?;
        let fill = self.buffers.background();
        self.buffers
            .shift_and_fill(&mut self.backend, dx, dy, fill)?;
        trace!(dx, dy, "pan preview");
        Ok(())
    }

    fn finish_tool<C: SpatialController>(
        &mut self,
        controller: &C,
        change: ViewChange,
    ) -> MapResult<()> {
        let Some(tool) = self.tool.take() else {
            return Ok(());
        };
        self.tool_overlay = None;
        let kind = tool.kind();

        match change {
            ViewChange::Window(window) => self.set_new_window(controller, window, true)?,
            ViewChange::Center(center) => self.set_center(controller, center)?,
            ViewChange::CenterAndScale { center, scale } => {
                self.set_center_and_scale(controller, center, scale, true)?;
            }
            ViewChange::ZoomInAbout { center, factor } => {
                self.zoom_in_about(controller, center, factor)?;
            }
            ViewChange::Redraw => {
                if let (Some(center), Some(scale)) =
                    (self.viewport.center(), self.viewport.scale())
                {
                    self.set_center_and_scale(controller, center, scale, true)?;
                }
            }
        }

        debug!(?kind, "tool finished");
        self.emit_plugin_event(MapEvent::ToolFinished { kind });
        Ok(())
    }
}
