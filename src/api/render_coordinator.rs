use tracing::{debug, trace};

use crate::core::ViewTransform;
use crate::error::MapResult;
use crate::extensions::MapEvent;
use crate::interaction::ToolOverlay;
use crate::render::{Color, DisplayBackend, DrawOutcome, RectPrimitive, RenderFrame};

use super::spatial_controller::window_pixel_box;
use super::{DrawContext, MapDisplay, SpatialController};

impl<B: DisplayBackend> MapDisplay<B> {
    /// Redraws the current view from the model without touching the history.
    pub fn redraw<C: SpatialController>(&mut self, controller: &C) -> MapResult<DrawOutcome> {
        self.draw_scene(controller)
    }

    /// Re-applies the controller's highlight (and any tool graphics) on top of
    /// the last full redraw.
    pub fn selection_changed<C: SpatialController>(
        &mut self,
        controller: &C,
    ) -> MapResult<DrawOutcome> {
        self.refresh_overlay(controller)
    }

    /// Copies the last full redraw back into the live buffer without
    /// presenting it. Returns `false` while no buffers are allocated.
    pub fn restore_last_draw(&mut self) -> MapResult<bool> {
        self.buffers.restore_last_draw()
    }

    /// Presents the live buffer as it is.
    pub fn paint_now(&mut self) -> MapResult<bool> {
        self.buffers.paint_now(&mut self.backend)
    }

    /// Full redraw: model into the clean buffer, then highlight and tool
    /// graphics on top.
    pub(super) fn draw_scene<C: SpatialController>(
        &mut self,
        controller: &C,
    ) -> MapResult<DrawOutcome> {
        let view = self.viewport.transform().zip(self.viewport.extent());
        let style = self.config.draw_style;

        let outcome = self.buffers.full_redraw(&mut self.backend, |frame| {
            // A blank display (no model) is still a successful pass.
            let Some((transform, extent)) = view else {
                return Ok(());
            };
            let mut context = DrawContext::new(frame, transform, extent, style);
            controller.render_model(&mut context)
        })?;

        match outcome {
            DrawOutcome::Drawn => {
                trace!("map redrawn");
                self.emit_plugin_event(MapEvent::Redrawn);
                if controller.has_overlay() || self.tool_overlay.is_some() {
                    return self.refresh_overlay(controller);
                }
            }
            DrawOutcome::Dropped => self.emit_plugin_event(MapEvent::FrameDropped),
            DrawOutcome::Deferred => debug!("redraw deferred until the display has an area"),
        }
        Ok(outcome)
    }

    pub(super) fn refresh_overlay<C: SpatialController>(
        &mut self,
        controller: &C,
    ) -> MapResult<DrawOutcome> {
        let Some((transform, extent)) = self.viewport.transform().zip(self.viewport.extent())
        else {
            return Ok(DrawOutcome::Deferred);
        };
        let style = self.config.highlight_style;
        let tool_overlay = self.tool_overlay;
        let frame_color = self.config.tool_frame_color;
        let highlight = controller.has_overlay();

        let outcome = self.buffers.overlay_and_blit(&mut self.backend, |frame| {
            if highlight {
                let mut context = DrawContext::new(frame, transform, extent, style);
                controller.render_overlay(&mut context)?;
            }
            if let Some(overlay) = tool_overlay {
                push_tool_overlay(frame, transform, overlay, frame_color);
            }
            Ok(())
        })?;

        if outcome == DrawOutcome::Dropped {
            self.emit_plugin_event(MapEvent::FrameDropped);
        }
        Ok(outcome)
    }
}

fn push_tool_overlay(
    frame: &mut RenderFrame,
    transform: ViewTransform,
    overlay: ToolOverlay,
    color: Color,
) {
    match overlay {
        ToolOverlay::Frame(window) => {
            let (x, y, width, height) = window_pixel_box(transform, window);
            frame
                .rects
                .push(RectPrimitive::outline(x, y, width, height, 1.0, color));
        }
    }
}
