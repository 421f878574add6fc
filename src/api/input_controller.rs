use tracing::{debug, trace};

use crate::core::{GroundPoint, PixelPoint};
use crate::error::MapResult;
use crate::interaction::{Key, MouseButton, PointerInput, wheel_notches};
use crate::render::DisplayBackend;

use super::{MapDisplay, SpatialController};

impl<B: DisplayBackend> MapDisplay<B> {
    /// Routes a button press to the active tool, or to the controller when idle.
    pub fn mouse_down<C: SpatialController>(
        &mut self,
        controller: &mut C,
        pixel: PixelPoint,
        button: MouseButton,
    ) -> MapResult<()> {
        let Some(input) = self.pointer_input(pixel, Some(button))? else {
            return Ok(());
        };
        let context = self.tool_context();
        let action = match (self.tool.as_mut(), context) {
            (Some(tool), Some(context)) => tool.mouse_down(input, context),
            _ => {
                controller.mouse_down(input);
                return Ok(());
            }
        };
        self.apply_tool_action(&*controller, action)
    }

    /// `button` is the button held during the move, if any.
    pub fn mouse_move<C: SpatialController>(
        &mut self,
        controller: &mut C,
        pixel: PixelPoint,
        button: Option<MouseButton>,
    ) -> MapResult<()> {
        let Some(input) = self.pointer_input(pixel, button)? else {
            return Ok(());
        };
        let context = self.tool_context();
        let action = match (self.tool.as_mut(), context) {
            (Some(tool), Some(context)) => tool.mouse_move(input, context),
            _ => {
                controller.mouse_move(input);
                return Ok(());
            }
        };
        self.apply_tool_action(&*controller, action)
    }

    pub fn mouse_up<C: SpatialController>(
        &mut self,
        controller: &mut C,
        pixel: PixelPoint,
        button: MouseButton,
    ) -> MapResult<()> {
        let Some(input) = self.pointer_input(pixel, Some(button))? else {
            return Ok(());
        };
        let context = self.tool_context();
        let action = match (self.tool.as_mut(), context) {
            (Some(tool), Some(context)) => tool.mouse_up(input, context),
            _ => {
                controller.mouse_up(input);
                return Ok(());
            }
        };
        self.apply_tool_action(&*controller, action)
    }

    /// Wheel input: handed to the active tool, otherwise zooms about the cursor
    /// by `wheel_zoom_step` per notch without recording history.
    ///
    /// A negative delta zooms in. The ground point under the cursor stays put.
    pub fn mouse_wheel<C: SpatialController>(
        &mut self,
        controller: &C,
        pixel: PixelPoint,
        delta: f64,
    ) -> MapResult<()> {
        if delta == 0.0 || !delta.is_finite() {
            return Ok(());
        }
        let context = self.tool_context();
        if let (Some(tool), Some(context)) = (self.tool.as_mut(), context) {
            let action = tool.mouse_wheel(delta, context);
            return self.apply_tool_action(controller, action);
        }

        let Some(input) = self.pointer_input(pixel, None)? else {
            return Ok(());
        };
        let (Some(center), Some(scale)) = (self.viewport.center(), self.viewport.scale()) else {
            return Ok(());
        };

        let step = self.config.wheel_zoom_step;
        let notches = wheel_notches(delta);
        let ratio = if delta < 0.0 {
            (1.0 - step).powf(notches)
        } else {
            (1.0 + step).powf(notches)
        };
        let new_scale = scale * ratio;

        let anchor = input.ground;
        let new_center = GroundPoint::new(
            anchor.x - (anchor.x - center.x) * ratio,
            anchor.y - (anchor.y - center.y) * ratio,
        );
        // Input has no failure path: a zoom the viewport cannot represent is dropped.
        let mut preview = self.viewport;
        if let Err(err) = preview.set_center_and_scale(new_center.x, new_center.y, new_scale) {
            debug!(delta, scale, error = %err, "ignoring wheel zoom beyond a usable scale");
            return Ok(());
        }
        trace!(delta, scale, new_scale, "wheel zoom");
        self.set_center_and_scale(controller, new_center, new_scale, false)
    }

    /// Escape cancels the active tool; other keys (and Escape while idle) go
    /// to the controller.
    pub fn key_down<C: SpatialController>(
        &mut self,
        controller: &mut C,
        key: Key,
    ) -> MapResult<()> {
        if key == Key::Escape && self.tool.is_some() {
            self.escape_tool(&*controller)?;
            return Ok(());
        }
        controller.key_down(key);
        Ok(())
    }

    /// Losing focus cancels the active tool so the user cannot get stuck in it.
    pub fn focus_lost<C: SpatialController>(&mut self, controller: &C) -> MapResult<()> {
        self.escape_tool(controller).map(|_| ())
    }

    fn pointer_input(
        &self,
        pixel: PixelPoint,
        button: Option<MouseButton>,
    ) -> MapResult<Option<PointerInput>> {
        if !self.viewport.has_view() {
            return Ok(None);
        }
        let ground = self.viewport.screen_to_ground(pixel)?;
        Ok(Some(PointerInput::new(pixel, ground, button)))
    }
}
