use serde::{Deserialize, Serialize};

use crate::core::{GroundPoint, PixelPoint, ViewTransform, Window};
use crate::interaction::MagnifyBehavior;
use crate::interaction::input::{PointerInput, wheel_notches};

/// Pixel distance below which a rubber-band drag counts as a click.
const CLICK_TOLERANCE_PX: f64 = 3.0;

/// Navigation requests a host can issue (menu items, toolbar buttons).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DisplayToolId {
    Overview,
    ZoomIn,
    ZoomOut,
    ZoomRectangle,
    /// Redraw at the current center with the supplied scale denominator.
    DrawScale(f64),
    Magnify,
    NewCenter,
    Pan,
    MapRefresh,
    Previous,
    Next,
}

impl DisplayToolId {
    /// The interactive tool this request starts, if any.
    #[must_use]
    pub fn tool_kind(self) -> Option<ToolKind> {
        match self {
            Self::ZoomRectangle => Some(ToolKind::ZoomRectangle),
            Self::Pan => Some(ToolKind::Pan),
            Self::NewCenter => Some(ToolKind::NewCenter),
            Self::Magnify => Some(ToolKind::Magnify),
            _ => None,
        }
    }
}

/// Interactive navigation modes. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    ZoomRectangle,
    Pan,
    NewCenter,
    Magnify,
}

/// Transient graphics a tool wants on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToolOverlay {
    /// Dashed outline of a ground rectangle (rubber band, magnifier lens).
    Frame(Window),
}

/// View change a tool commits when its gesture completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewChange {
    Window(Window),
    Center(GroundPoint),
    CenterAndScale { center: GroundPoint, scale: f64 },
    /// Zoom in by `factor` keeping the view centered on `center`.
    ZoomInAbout { center: GroundPoint, factor: f64 },
    /// Redraw the current view (after a pixel-shift preview).
    Redraw,
}

/// What the display should do after a tool handled an input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToolAction {
    None,
    /// Show `Some` overlay, or remove transient graphics with `None`.
    Overlay(Option<ToolOverlay>),
    /// Move the displayed content by whole pixels (view follows).
    PanPixels { dx: i32, dy: i32 },
    /// Apply the change with history, then finish the tool.
    Commit(ViewChange),
    /// Abandon the gesture, leaving the view unchanged.
    Escape,
}

/// Read-only view state handed to tools with each event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolContext {
    pub transform: ViewTransform,
    pub extent: Window,
    pub scale: f64,
    pub zoom_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    ground: GroundPoint,
    pixel: PixelPoint,
}

/// Drag out a rectangle and zoom to it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoomRectangleTool {
    anchor: Option<Anchor>,
}

impl ZoomRectangleTool {
    fn mouse_down(&mut self, input: PointerInput) -> ToolAction {
        if input.is_right() {
            return ToolAction::Escape;
        }
        if input.is_left() {
            self.anchor = Some(Anchor {
                ground: input.ground,
                pixel: input.pixel,
            });
        }
        ToolAction::None
    }

    fn mouse_move(&mut self, input: PointerInput) -> ToolAction {
        let Some(anchor) = self.anchor else {
            return ToolAction::None;
        };
        match Window::from_corners(anchor.ground, input.ground) {
            Ok(frame) => ToolAction::Overlay(Some(ToolOverlay::Frame(frame))),
            Err(_) => ToolAction::None,
        }
    }

    fn mouse_up(&mut self, input: PointerInput, context: ToolContext) -> ToolAction {
        if !input.is_left() {
            return ToolAction::None;
        }
        let Some(anchor) = self.anchor.take() else {
            return ToolAction::None;
        };

        let drag_x = (input.pixel.x - anchor.pixel.x).abs();
        let drag_y = (input.pixel.y - anchor.pixel.y).abs();
        if drag_x < CLICK_TOLERANCE_PX && drag_y < CLICK_TOLERANCE_PX {
            return ToolAction::Commit(ViewChange::ZoomInAbout {
                center: input.ground,
                factor: context.zoom_factor,
            });
        }

        match Window::from_corners(anchor.ground, input.ground) {
            Ok(window) => ToolAction::Commit(ViewChange::Window(window)),
            Err(_) => ToolAction::Escape,
        }
    }
}

/// Drag the map around; the view is redrawn when the button is released.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanTool {
    last: Option<PixelPoint>,
    /// Pixels the content has been moved by so far.
    offset: (i32, i32),
}

impl PanTool {
    fn mouse_down(&mut self, input: PointerInput) -> ToolAction {
        if input.is_right() {
            return ToolAction::Escape;
        }
        if input.is_left() {
            self.last = Some(input.pixel);
        }
        ToolAction::None
    }

    fn mouse_move(&mut self, input: PointerInput) -> ToolAction {
        let Some(last) = self.last.as_mut() else {
            return ToolAction::None;
        };
        let dx = (input.pixel.x - last.x).round();
        let dy = (input.pixel.y - last.y).round();
        if dx == 0.0 && dy == 0.0 {
            return ToolAction::None;
        }
        // Only whole pixels are consumed so the remainder carries to the next move.
        last.x += dx;
        last.y += dy;
        let (dx, dy) = (dx as i32, dy as i32);
        self.offset = (
            self.offset.0.saturating_add(dx),
            self.offset.1.saturating_add(dy),
        );
        ToolAction::PanPixels { dx, dy }
    }

    fn mouse_up(&mut self, input: PointerInput) -> ToolAction {
        if !input.is_left() || self.last.take().is_none() {
            return ToolAction::None;
        }
        ToolAction::Commit(ViewChange::Redraw)
    }
}

/// Click to re-center the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NewCenterTool;

impl NewCenterTool {
    fn mouse_down(self, input: PointerInput) -> ToolAction {
        if input.is_right() {
            return ToolAction::Escape;
        }
        if input.is_left() {
            return ToolAction::Commit(ViewChange::Center(input.ground));
        }
        ToolAction::None
    }
}

/// Lens that follows the pointer; clicking zooms to the lens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnifyTool {
    behavior: MagnifyBehavior,
    magnification: f64,
    lens_center: Option<GroundPoint>,
}

impl MagnifyTool {
    #[must_use]
    pub fn new(behavior: MagnifyBehavior) -> Self {
        Self {
            behavior,
            magnification: behavior
                .magnification
                .clamp(behavior.min_magnification, behavior.max_magnification),
            lens_center: None,
        }
    }

    #[must_use]
    pub fn magnification(&self) -> f64 {
        self.magnification
    }

    #[must_use]
    pub fn lens(&self, context: ToolContext) -> Option<Window> {
        let center = self.lens_center?;
        Window::from_center_size(
            center,
            context.extent.width() / self.magnification,
            context.extent.height() / self.magnification,
        )
        .ok()
    }

    fn lens_overlay(&self, context: ToolContext) -> ToolAction {
        match self.lens(context) {
            Some(lens) => ToolAction::Overlay(Some(ToolOverlay::Frame(lens))),
            None => ToolAction::None,
        }
    }

    fn mouse_down(&mut self, input: PointerInput) -> ToolAction {
        if input.is_right() {
            return ToolAction::Escape;
        }
        ToolAction::None
    }

    fn mouse_move(&mut self, input: PointerInput, context: ToolContext) -> ToolAction {
        self.lens_center = Some(input.ground);
        self.lens_overlay(context)
    }

    fn mouse_up(&mut self, input: PointerInput, context: ToolContext) -> ToolAction {
        if !input.is_left() {
            return ToolAction::None;
        }
        ToolAction::Commit(ViewChange::CenterAndScale {
            center: input.ground,
            scale: context.scale / self.magnification,
        })
    }

    fn mouse_wheel(&mut self, delta: f64, context: ToolContext) -> ToolAction {
        if delta == 0.0 {
            return ToolAction::None;
        }
        let step = self.behavior.wheel_step.powf(wheel_notches(delta));
        let next = if delta > 0.0 {
            self.magnification * step
        } else {
            self.magnification / step
        };
        self.magnification = next.clamp(
            self.behavior.min_magnification,
            self.behavior.max_magnification,
        );
        self.lens_overlay(context)
    }
}

/// The in-progress navigation tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveTool {
    ZoomRectangle(ZoomRectangleTool),
    Pan(PanTool),
    NewCenter(NewCenterTool),
    Magnify(MagnifyTool),
}

impl ActiveTool {
    #[must_use]
    pub fn start(kind: ToolKind, magnify: MagnifyBehavior) -> Self {
        match kind {
            ToolKind::ZoomRectangle => Self::ZoomRectangle(ZoomRectangleTool::default()),
            ToolKind::Pan => Self::Pan(PanTool::default()),
            ToolKind::NewCenter => Self::NewCenter(NewCenterTool),
            ToolKind::Magnify => Self::Magnify(MagnifyTool::new(magnify)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::ZoomRectangle(_) => ToolKind::ZoomRectangle,
            Self::Pan(_) => ToolKind::Pan,
            Self::NewCenter(_) => ToolKind::NewCenter,
            Self::Magnify(_) => ToolKind::Magnify,
        }
    }

    /// Pixels a pan gesture has moved the content by (zero for other tools).
    #[must_use]
    pub fn pan_offset(&self) -> (i32, i32) {
        match self {
            Self::Pan(tool) => tool.offset,
            _ => (0, 0),
        }
    }

    pub fn mouse_down(&mut self, input: PointerInput, _context: ToolContext) -> ToolAction {
        match self {
            Self::ZoomRectangle(tool) => tool.mouse_down(input),
            Self::Pan(tool) => tool.mouse_down(input),
            Self::NewCenter(tool) => tool.mouse_down(input),
            Self::Magnify(tool) => tool.mouse_down(input),
        }
    }

    pub fn mouse_move(&mut self, input: PointerInput, context: ToolContext) -> ToolAction {
        match self {
            Self::ZoomRectangle(tool) => tool.mouse_move(input),
            Self::Pan(tool) => tool.mouse_move(input),
            Self::NewCenter(_) => ToolAction::None,
            Self::Magnify(tool) => tool.mouse_move(input, context),
        }
    }

    pub fn mouse_up(&mut self, input: PointerInput, context: ToolContext) -> ToolAction {
        match self {
            Self::ZoomRectangle(tool) => tool.mouse_up(input, context),
            Self::Pan(tool) => tool.mouse_up(input),
            Self::NewCenter(_) => ToolAction::None,
            Self::Magnify(tool) => tool.mouse_up(input, context),
        }
    }

    pub fn mouse_wheel(&mut self, delta: f64, context: ToolContext) -> ToolAction {
        match self {
            Self::Magnify(tool) => tool.mouse_wheel(delta, context),
            _ => ToolAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::MouseButton;

    fn context() -> ToolContext {
        let extent = Window::new(0.0, 0.0, 100.0, 50.0).expect("extent");
        ToolContext {
            transform: ViewTransform::new(extent, 10.0),
            extent,
            scale: 1000.0,
            zoom_factor: 0.2,
        }
    }

    fn input(px: f64, py: f64, button: Option<MouseButton>) -> PointerInput {
        let pixel = PixelPoint::new(px, py);
        PointerInput::new(pixel, context().transform.screen_to_ground(pixel), button)
    }

    #[test]
    fn pan_carries_sub_pixel_remainder() {
        let mut tool = PanTool::default();
        tool.mouse_down(input(10.0, 10.0, Some(MouseButton::Left)));
        assert_eq!(tool.mouse_move(input(10.4, 10.0, None)), ToolAction::None);
        assert_eq!(
            tool.mouse_move(input(11.6, 10.0, None)),
            ToolAction::PanPixels { dx: 2, dy: 0 }
        );
    }

    #[test]
    fn pan_offset_saturates_on_extreme_moves() {
        let mut tool = PanTool::default();
        tool.mouse_down(input(0.0, 0.0, Some(MouseButton::Left)));
        for step in 1..=3 {
            let far = f64::from(step) * 1.0e12;
            assert_eq!(
                tool.mouse_move(input(far, -far, None)),
                ToolAction::PanPixels {
                    dx: i32::MAX,
                    dy: i32::MIN
                }
            );
        }
        assert_eq!(tool.offset, (i32::MAX, i32::MIN));
    }

    #[test]
    fn magnifier_wheel_is_clamped() {
        let behavior = MagnifyBehavior::default();
        let mut tool = MagnifyTool::new(behavior);
        for _ in 0..100 {
            tool.mouse_wheel(120.0, context());
        }
        assert!((tool.magnification() - behavior.max_magnification).abs() <= 1e-12);
    }
}
