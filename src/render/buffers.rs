use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{PixelRect, PixelSize};
use crate::error::MapResult;
use crate::render::{Color, DisplayBackend, RenderFrame, Surface};

/// Attempts made for one scene before the frame is dropped.
const SCENE_ATTEMPTS: u32 = 2;

/// Result of one buffered draw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// The scene was drawn and presented.
    Drawn,
    /// The draw callback kept failing; the previous frame stays on screen.
    Dropped,
    /// No buffers are allocated yet (display without area).
    Deferred,
}

/// Counters describing buffer activity since creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RenderBufferStats {
    pub allocations: usize,
    pub full_redraws: usize,
    pub overlays: usize,
    pub shifts: usize,
    pub dropped_frames: usize,
    pub deferred_draws: usize,
}

#[derive(Debug)]
struct BufferPair<S> {
    /// What goes to screen; may carry transient overlays.
    live: S,
    /// The last full redraw, never overlaid.
    clean: S,
}

enum SceneBase<'a, S> {
    Clear(Color),
    Copy(&'a S),
}

/// Double-buffer manager for the map display.
///
/// `clean` is only written by [`RenderBuffers::full_redraw`]; every other
/// path re-derives `live` from it, so removing transient graphics is just a
/// copy.
#[derive(Debug)]
pub struct RenderBuffers<S: Surface> {
    buffers: Option<BufferPair<S>>,
    scratch: RenderFrame,
    background: Color,
    stats: RenderBufferStats,
}

impl<S: Surface> RenderBuffers<S> {
    #[must_use]
    pub fn new(background: Color) -> Self {
        Self {
            buffers: None,
            scratch: RenderFrame::new(PixelSize::new(0, 0)),
            background,
            stats: RenderBufferStats::default(),
        }
    }

    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.buffers.is_some()
    }

    #[must_use]
    pub fn size(&self) -> Option<PixelSize> {
        self.buffers.as_ref().map(|pair| pair.live.size())
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) -> MapResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> RenderBufferStats {
        self.stats
    }

    /// Read-only view of the buffer that goes to screen.
    #[must_use]
    pub fn live_surface(&self) -> Option<&S> {
        self.buffers.as_ref().map(|pair| &pair.live)
    }

    /// Read-only view of the last full redraw.
    #[must_use]
    pub fn clean_surface(&self) -> Option<&S> {
        self.buffers.as_ref().map(|pair| &pair.clean)
    }

    /// Allocates both buffers at `size`, dropping any previous pair.
    ///
    /// Returns `Ok(false)` when `size` has no area: drawing is deferred until a
    /// later call succeeds.
    pub fn allocate<B>(&mut self, backend: &mut B, size: PixelSize) -> MapResult<bool>
    where
        B: DisplayBackend<Surface = S>,
    {
        self.release();
        if !size.is_valid() {
            debug!(
                width = size.width,
                height = size.height,
                "deferring buffer allocation for empty display"
            );
            return Ok(false);
        }

        let mut live = backend.allocate_surface(size)?;
        let mut clean = backend.allocate_surface(size)?;
        live.clear(self.background);
        clean.clear(self.background);
        self.buffers = Some(BufferPair { live, clean });
        self.scratch.reset(size);
        self.stats.allocations += 1;
        debug!(width = size.width, height = size.height, "allocated display buffers");
        Ok(true)
    }

    /// Reallocates both buffers for a new display size.
    ///
    /// Content is not carried over; the caller redraws from the model.
    pub fn resize<B>(&mut self, backend: &mut B, size: PixelSize) -> MapResult<bool>
    where
        B: DisplayBackend<Surface = S>,
    {
        self.allocate(backend, size)
    }

    /// Disposes both buffers.
    pub fn release(&mut self) {
        if self.buffers.take().is_some() {
            trace!("released display buffers");
        }
        self.scratch.reset(PixelSize::new(0, 0));
    }

    /// Clears the live buffer, draws the scene, snapshots it as the clean
    /// buffer and presents it.
    pub fn full_redraw<B, F>(&mut self, backend: &mut B, mut draw: F) -> MapResult<DrawOutcome>
    where
        B: DisplayBackend<Surface = S>,
        F: FnMut(&mut RenderFrame) -> MapResult<()>,
    {
        let Self {
            buffers,
            scratch,
            background,
            stats,
        } = self;
        let Some(pair) = buffers.as_mut() else {
            stats.deferred_draws += 1;
            return Ok(DrawOutcome::Deferred);
        };

        let drawn = render_scene(
            &mut pair.live,
            scratch,
            SceneBase::Clear(*background),
            &mut draw,
        )?;
        if drawn {
            pair.clean.copy_from(&pair.live)?;
            backend.present(&pair.live)?;
            stats.full_redraws += 1;
            trace!(primitives = scratch.primitive_count(), "full redraw presented");
            return Ok(DrawOutcome::Drawn);
        }

        pair.live.copy_from(&pair.clean)?;
        backend.present(&pair.live)?;
        stats.dropped_frames += 1;
        Ok(DrawOutcome::Dropped)
    }

    /// Restores the clean buffer into live, draws transient graphics on top
    /// and presents the result. The clean buffer is left untouched.
    pub fn overlay_and_blit<B, F>(
        &mut self,
        backend: &mut B,
        mut overlay: F,
    ) -> MapResult<DrawOutcome>
    where
        B: DisplayBackend<Surface = S>,
        F: FnMut(&mut RenderFrame) -> MapResult<()>,
    {
        let Self {
            buffers,
            scratch,
            stats,
            ..
        } = self;
        let Some(pair) = buffers.as_mut() else {
            stats.deferred_draws += 1;
            return Ok(DrawOutcome::Deferred);
        };

        let drawn = render_scene(
            &mut pair.live,
            scratch,
            SceneBase::Copy(&pair.clean),
            &mut overlay,
        )?;
        if !drawn {
            pair.live.copy_from(&pair.clean)?;
        }
        backend.present(&pair.live)?;

        if drawn {
            stats.overlays += 1;
            Ok(DrawOutcome::Drawn)
        } else {
            stats.dropped_frames += 1;
            Ok(DrawOutcome::Dropped)
        }
    }

    /// Puts the last full redraw back into the live buffer without presenting it,
    /// so further transient graphics can be added before [`RenderBuffers::paint_now`].
    pub fn restore_last_draw(&mut self) -> MapResult<bool> {
        let Some(pair) = self.buffers.as_mut() else {
            return Ok(false);
        };
        pair.live.copy_from(&pair.clean)?;
        Ok(true)
    }

    /// Presents the live buffer as it is.
    pub fn paint_now<B>(&mut self, backend: &mut B) -> MapResult<bool>
    where
        B: DisplayBackend<Surface = S>,
    {
        let Some(pair) = self.buffers.as_ref() else {
            return Ok(false);
        };
        backend.present(&pair.live)?;
        Ok(true)
    }

    /// Moves the live content by `(dx, dy)` pixels, paints the exposed strips
    /// with `fill` and presents it. Used as a cheap preview while panning; the
    /// strips stay as placeholders until the next full redraw.
    pub fn shift_and_fill<B>(
        &mut self,
        backend: &mut B,
        dx: i32,
        dy: i32,
        fill: Color,
    ) -> MapResult<DrawOutcome>
    where
        B: DisplayBackend<Surface = S>,
    {
        let Some(pair) = self.buffers.as_mut() else {
            self.stats.deferred_draws += 1;
            return Ok(DrawOutcome::Deferred);
        };

        let size = pair.live.size();
        pair.live.scroll(dx, dy);
        for strip in exposed_strips(size, dx, dy) {
            pair.live.fill_rect(strip, fill);
        }
        backend.present(&pair.live)?;
        self.stats.shifts += 1;
        trace!(dx, dy, "shifted live buffer");
        Ok(DrawOutcome::Drawn)
    }
}

/// Draws one scene into `surface`, retrying once with a fresh scratch frame.
///
/// Returns `Ok(false)` when both attempts failed; the scratch frame is then
/// reset so the next pass starts from an empty buffer.
fn render_scene<S, F>(
    surface: &mut S,
    scratch: &mut RenderFrame,
    base: SceneBase<'_, S>,
    draw: &mut F,
) -> MapResult<bool>
where
    S: Surface,
    F: FnMut(&mut RenderFrame) -> MapResult<()>,
{
    let size = surface.size();
    for attempt in 1..=SCENE_ATTEMPTS {
        match &base {
            SceneBase::Clear(color) => surface.clear(*color),
            SceneBase::Copy(source) => surface.copy_from(source)?,
        }
        scratch.clear(size);

        let result = draw(scratch)
            .and_then(|()| scratch.validate())
            .and_then(|()| surface.draw_frame(scratch));
        match result {
            Ok(()) => return Ok(true),
            Err(err) => warn!(attempt, error = %err, "scene construction failed"),
        }
    }

    scratch.reset(size);
    warn!("dropping frame after repeated scene failures");
    Ok(false)
}

/// Strips of a `size` display left uncovered after moving content by `(dx, dy)`.
fn exposed_strips(size: PixelSize, dx: i32, dy: i32) -> SmallVec<[PixelRect; 2]> {
    let mut strips = SmallVec::new();
    let width = size.width;
    let height = size.height;

    let dx_abs = dx.unsigned_abs().min(width);
    if dx > 0 {
        strips.push(PixelRect::new(0, 0, dx_abs, height));
    } else if dx < 0 {
        strips.push(PixelRect::new((width - dx_abs) as i32, 0, dx_abs, height));
    }

    let dy_abs = dy.unsigned_abs().min(height);
    if dy > 0 {
        strips.push(PixelRect::new(0, 0, width, dy_abs));
    } else if dy < 0 {
        strips.push(PixelRect::new(0, (height - dy_abs) as i32, width, dy_abs));
    }

    strips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposed_strips_follow_shift_direction() {
        let size = PixelSize::new(100, 80);
        let strips = exposed_strips(size, -10, 5);
        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0], PixelRect::new(90, 0, 10, 80));
        assert_eq!(strips[1], PixelRect::new(0, 0, 100, 5));
        assert!(exposed_strips(size, 0, 0).is_empty());
    }
}
