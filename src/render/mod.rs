mod buffers;
mod frame;
mod pixel_backend;
mod primitives;

pub use buffers::{DrawOutcome, RenderBufferStats, RenderBuffers};
pub use frame::RenderFrame;
pub use pixel_backend::{PixelBackend, PixelSurface};
pub use primitives::{
    Color, LinePrimitive, PolylinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::core::{PixelRect, PixelSize};
use crate::error::MapResult;

/// Off-screen raster the display draws into.
///
/// Surfaces are owned exclusively by [`RenderBuffers`]; hosts only see them
/// through [`DisplayBackend::present`].
pub trait Surface {
    fn size(&self) -> PixelSize;

    /// Paints the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Paints `rect` (clipped to the surface) with `color`.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Rasterizes a validated frame on top of the current content.
    fn draw_frame(&mut self, frame: &RenderFrame) -> MapResult<()>;

    /// Replaces this surface's content with `source`'s. Sizes must match.
    fn copy_from(&mut self, source: &Self) -> MapResult<()>;

    /// Moves the content by `(dx, dy)` pixels. Exposed strips keep stale content.
    fn scroll(&mut self, dx: i32, dy: i32);
}

/// Platform capability that allocates surfaces and shows them on screen.
pub trait DisplayBackend {
    type Surface: Surface;

    /// Allocates a surface of `size`; fails for sizes without area.
    fn allocate_surface(&mut self, size: PixelSize) -> MapResult<Self::Surface>;

    /// Blits `surface` to the screen.
    fn present(&mut self, surface: &Self::Surface) -> MapResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoBackend, CairoSurface};
