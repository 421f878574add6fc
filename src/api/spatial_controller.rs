use crate::core::{GroundPoint, ViewTransform, Window};
use crate::error::MapResult;
use crate::interaction::{Key, PointerInput};
use crate::render::{
    LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::DrawStyle;

/// Host-side collaborator that owns the spatial model.
///
/// The display never holds on to a controller: every operation that needs the
/// model receives it explicitly, so hosts can swap models or run several
/// displays without any global lookup.
pub trait SpatialController {
    /// Ground extent covered by the model, or `None` when nothing is loaded.
    fn model_extent(&self) -> Option<Window>;

    /// Draws every feature visible in `context.extent()`.
    fn render_model(&self, context: &mut DrawContext<'_>) -> MapResult<()>;

    /// Whether there is transient content (such as a selection) to highlight.
    fn has_overlay(&self) -> bool {
        false
    }

    /// Draws transient content on top of the last full redraw.
    fn render_overlay(&self, _context: &mut DrawContext<'_>) -> MapResult<()> {
        Ok(())
    }

    /// Pointer handlers used when no navigation tool is active.
    fn mouse_down(&mut self, _input: PointerInput) {}

    fn mouse_move(&mut self, _input: PointerInput) {}

    fn mouse_up(&mut self, _input: PointerInput) {}

    /// Keys the display does not consume itself.
    fn key_down(&mut self, _key: Key) {}
}

/// Drawing target handed to [`SpatialController`] callbacks.
///
/// Geometry is supplied in ground units and converted with the view transform
/// of the pass being drawn.
pub struct DrawContext<'a> {
    frame: &'a mut RenderFrame,
    transform: ViewTransform,
    extent: Window,
    style: DrawStyle,
}

impl<'a> DrawContext<'a> {
    #[must_use]
    pub fn new(
        frame: &'a mut RenderFrame,
        transform: ViewTransform,
        extent: Window,
        style: DrawStyle,
    ) -> Self {
        Self {
            frame,
            transform,
            extent,
            style,
        }
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Ground extent being drawn.
    #[must_use]
    pub fn extent(&self) -> Window {
        self.extent
    }

    #[must_use]
    pub fn style(&self) -> DrawStyle {
        self.style
    }

    /// Whether anything inside `window` can show up in this pass.
    #[must_use]
    pub fn is_visible(&self, window: Window) -> bool {
        self.extent.overlaps(window)
    }

    /// Raw access for hosts that build pixel-space primitives themselves.
    pub fn frame_mut(&mut self) -> &mut RenderFrame {
        self.frame
    }

    pub fn draw_line(&mut self, from: GroundPoint, to: GroundPoint) {
        let a = self.transform.ground_to_screen(from);
        let b = self.transform.ground_to_screen(to);
        self.frame.lines.push(LinePrimitive::new(
            a.x,
            a.y,
            b.x,
            b.y,
            self.style.line_width,
            self.style.line_color,
        ));
    }

    /// Draws a connected line; `closed` joins the last point back to the first.
    pub fn draw_polyline(&mut self, points: &[GroundPoint], closed: bool) {
        let pixels = points
            .iter()
            .map(|point| self.transform.ground_to_screen(*point))
            .collect();
        self.frame.polylines.push(PolylinePrimitive::new(
            pixels,
            closed,
            self.style.line_width,
            self.style.line_color,
        ));
    }

    /// Draws a filled square of `point_size_px` centered on `point`.
    pub fn draw_point(&mut self, point: GroundPoint) {
        let center = self.transform.ground_to_screen(point);
        let size = self.style.point_size_px;
        self.frame.rects.push(RectPrimitive::filled(
            center.x - size / 2.0,
            center.y - size / 2.0,
            size,
            size,
            self.style.fill_color,
        ));
    }

    pub fn draw_window(&mut self, window: Window) {
        let (x, y, width, height) = self.pixel_box(window);
        self.frame.rects.push(RectPrimitive::outline(
            x,
            y,
            width,
            height,
            self.style.line_width,
            self.style.line_color,
        ));
    }

    pub fn fill_window(&mut self, window: Window) {
        let (x, y, width, height) = self.pixel_box(window);
        self.frame.rects.push(RectPrimitive::filled(
            x,
            y,
            width,
            height,
            self.style.fill_color,
        ));
    }

    pub fn draw_text(&mut self, text: &str, at: GroundPoint, h_align: TextHAlign) {
        let anchor = self.transform.ground_to_screen(at);
        self.frame.texts.push(TextPrimitive::new(
            text,
            anchor.x,
            anchor.y,
            self.style.font_size_px,
            self.style.text_color,
            h_align,
        ));
    }

    fn pixel_box(&self, window: Window) -> (f64, f64, f64, f64) {
        window_pixel_box(self.transform, window)
    }
}

/// Top-left corner and size of `window` in pixels.
pub(super) fn window_pixel_box(transform: ViewTransform, window: Window) -> (f64, f64, f64, f64) {
    let top_left = transform.ground_to_screen(GroundPoint::new(window.min().x, window.max().y));
    (
        top_left.x,
        top_left.y,
        transform.length_to_screen(window.width()),
        transform.length_to_screen(window.height()),
    )
}
