use crate::core::{PixelPoint, PixelRect, PixelSize};
use crate::error::{MapError, MapResult};
use crate::render::{Color, DisplayBackend, RenderFrame, Surface};

/// In-memory raster surface used by tests and headless hosts.
///
/// Rectangles, lines and polylines are rasterized with one-pixel strokes;
/// text is only counted.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    size: PixelSize,
    pixels: Vec<Color>,
    texts_drawn: usize,
}

impl PixelSurface {
    pub fn new(size: PixelSize, color: Color) -> MapResult<Self> {
        let size = size.validate()?;
        Ok(Self {
            size,
            pixels: vec![color; size.area()],
            texts_drawn: 0,
        })
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[must_use]
    pub fn texts_drawn(&self) -> usize {
        self.texts_drawn
    }

    /// Number of pixels holding exactly `color`.
    #[must_use]
    pub fn count_color(&self, color: Color) -> usize {
        self.pixels.iter().filter(|pixel| **pixel == color).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= i64::from(self.size.width) || y >= i64::from(self.size.height) {
            return;
        }
        let index = self.index(x as u32, y as u32);
        self.pixels[index] = color;
    }

    fn draw_segment(&mut self, from: PixelPoint, to: PixelPoint, color: Color) {
        let max_x = f64::from(self.size.width) - 1.0;
        let max_y = f64::from(self.size.height) - 1.0;
        let Some((from, to)) = clip_segment(from, to, max_x, max_y) else {
            return;
        };

        let (mut x0, mut y0) = (from.x.round() as i64, from.y.round() as i64);
        let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x0 += step_x;
            }
            if doubled <= dx {
                error += dx;
                y0 += step_y;
            }
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.texts_drawn = 0;
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let Some(rect) = rect.clipped_to(self.size) else {
            return;
        };
        let width = self.size.width as usize;
        for row in rect.y as usize..(rect.y as usize + rect.height as usize) {
            let start = row * width + rect.x as usize;
            self.pixels[start..start + rect.width as usize].fill(color);
        }
    }

    fn draw_frame(&mut self, frame: &RenderFrame) -> MapResult<()> {
        for rect in &frame.rects {
            let left = rect.x.round();
            let top = rect.y.round();
            let right = (rect.x + rect.width).round();
            let bottom = (rect.y + rect.height).round();
            if let Some(fill) = rect.fill_color {
                let pixel_rect = PixelRect::new(
                    left as i32,
                    top as i32,
                    (right - left).max(0.0) as u32,
                    (bottom - top).max(0.0) as u32,
                );
                self.fill_rect(pixel_rect, fill);
            }
            if rect.border_width > 0.0 {
                let corners = [
                    PixelPoint::new(left, top),
                    PixelPoint::new(right, top),
                    PixelPoint::new(right, bottom),
                    PixelPoint::new(left, bottom),
                ];
                for index in 0..corners.len() {
                    let next = corners[(index + 1) % corners.len()];
                    self.draw_segment(corners[index], next, rect.border_color);
                }
            }
        }

        for line in &frame.lines {
            self.draw_segment(
                PixelPoint::new(line.x1, line.y1),
                PixelPoint::new(line.x2, line.y2),
                line.color,
            );
        }

        for polyline in &frame.polylines {
            for (from, to) in polyline.segments() {
                self.draw_segment(from, to, polyline.color);
            }
        }

        self.texts_drawn += frame.texts.len();
        Ok(())
    }

    fn copy_from(&mut self, source: &Self) -> MapResult<()> {
        if source.size != self.size {
            return Err(MapError::Backend(format!(
                "cannot copy a {}x{} surface into a {}x{} surface",
                source.size.width, source.size.height, self.size.width, self.size.height
            )));
        }
        self.pixels.copy_from_slice(&source.pixels);
        self.texts_drawn = source.texts_drawn;
        Ok(())
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let source = self.pixels.clone();
        let width = i64::from(self.size.width);
        let height = i64::from(self.size.height);
        for y in 0..height {
            let src_y = y - i64::from(dy);
            if src_y < 0 || src_y >= height {
                continue;
            }
            for x in 0..width {
                let src_x = x - i64::from(dx);
                if src_x < 0 || src_x >= width {
                    continue;
                }
                self.pixels[(y * width + x) as usize] = source[(src_y * width + src_x) as usize];
            }
        }
    }
}

/// Headless backend: surfaces are [`PixelSurface`]s and the "screen" is a copy
/// of the last presented surface.
#[derive(Debug, Default)]
pub struct PixelBackend {
    screen: Option<PixelSurface>,
    present_count: usize,
    allocation_count: usize,
}

impl PixelBackend {
    /// What is currently shown on screen.
    #[must_use]
    pub fn screen(&self) -> Option<&PixelSurface> {
        self.screen.as_ref()
    }

    #[must_use]
    pub fn present_count(&self) -> usize {
        self.present_count
    }

    #[must_use]
    pub fn allocation_count(&self) -> usize {
        self.allocation_count
    }
}

impl DisplayBackend for PixelBackend {
    type Surface = PixelSurface;

    fn allocate_surface(&mut self, size: PixelSize) -> MapResult<PixelSurface> {
        let surface = PixelSurface::new(size, Color::GRAY)?;
        self.allocation_count += 1;
        Ok(surface)
    }

    fn present(&mut self, surface: &PixelSurface) -> MapResult<()> {
        match self.screen.as_mut() {
            Some(screen) if screen.size() == surface.size() => screen.copy_from(surface)?,
            _ => self.screen = Some(surface.clone()),
        }
        self.present_count += 1;
        Ok(())
    }
}

/// Liang-Barsky clip of a segment against `[0, max_x] x [0, max_y]`.
fn clip_segment(
    from: PixelPoint,
    to: PixelPoint,
    max_x: f64,
    max_y: f64,
) -> Option<(PixelPoint, PixelPoint)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, from.x),
        (dx, max_x - from.x),
        (-dy, from.y),
        (dy, max_y - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        PixelPoint::new(from.x + t0 * dx, from.y + t0 * dy),
        PixelPoint::new(from.x + t1 * dx, from.y + t1 * dy),
    ))
}
