use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;
use tracing::warn;

use crate::core::{PixelRect, PixelSize};
use crate::error::{MapError, MapResult};
use crate::render::{Color, DisplayBackend, RenderFrame, Surface, TextHAlign};

/// Cairo image surface used as a display buffer.
#[derive(Debug)]
pub struct CairoSurface {
    surface: ImageSurface,
    size: PixelSize,
}

impl CairoSurface {
    pub fn new(size: PixelSize) -> MapResult<Self> {
        let size = size.validate()?;
        let surface = ImageSurface::create(Format::ARgb32, size.width as i32, size.height as i32)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self { surface, size })
    }

    #[must_use]
    pub fn image(&self) -> &ImageSurface {
        &self.surface
    }

    fn context(&self) -> MapResult<Context> {
        Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))
    }

    fn paint_rect(&self, rect: PixelRect, color: Color) -> MapResult<()> {
        let context = self.context()?;
        context.set_operator(Operator::Source);
        apply_color(&context, color);
        context.rectangle(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn shift(&mut self, dx: i32, dy: i32) -> MapResult<()> {
        let copy = Self::new(self.size)?;
        {
            let context = copy.context()?;
            context
                .set_source_surface(&self.surface, 0.0, 0.0)
                .map_err(|err| map_backend_error("failed to set scroll source", err))?;
            context
                .paint()
                .map_err(|err| map_backend_error("failed to snapshot surface", err))?;
        }
        self.surface.flush();
        copy.surface.flush();

        let context = self.context()?;
        context.rectangle(
            f64::from(dx),
            f64::from(dy),
            f64::from(self.size.width),
            f64::from(self.size.height),
        );
        context.clip();
        context.set_operator(Operator::Source);
        context
            .set_source_surface(&copy.surface, f64::from(dx), f64::from(dy))
            .map_err(|err| map_backend_error("failed to set scroll source", err))?;
        context
            .paint()
            .map_err(|err| map_backend_error("failed to scroll surface", err))
    }
}

impl Surface for CairoSurface {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn clear(&mut self, color: Color) {
        let full = PixelRect::new(0, 0, self.size.width, self.size.height);
        if let Err(err) = self.paint_rect(full, color) {
            warn!(error = %err, "cairo clear failed");
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        if let Err(err) = self.paint_rect(rect, color) {
            warn!(error = %err, "cairo fill failed");
        }
    }

    fn draw_frame(&mut self, frame: &RenderFrame) -> MapResult<()> {
        let context = self.context()?;

        for rect in &frame.rects {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            if let Some(fill) = rect.fill_color {
                apply_color(&context, fill);
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            }
            if rect.border_width > 0.0 {
                apply_color(&context, rect.border_color);
                context.set_line_width(rect.border_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke rectangle", err))?;
            } else {
                context.new_path();
            }
        }

        for line in &frame.lines {
            apply_color(&context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
        }

        for polyline in &frame.polylines {
            let mut points = polyline.points.iter();
            if let Some(first) = points.next() {
                context.move_to(first.x, first.y);
                for point in points {
                    context.line_to(point.x, point.y);
                }
                if polyline.closed {
                    context.close_path();
                }
            }
            apply_color(&context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(&context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(&context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(&context, &layout);
        }

        Ok(())
    }

    fn copy_from(&mut self, source: &Self) -> MapResult<()> {
        if source.size != self.size {
            return Err(MapError::Backend(
                "cannot copy between cairo surfaces of different sizes".to_owned(),
            ));
        }
        let context = self.context()?;
        context.set_operator(Operator::Source);
        context
            .set_source_surface(&source.surface, 0.0, 0.0)
            .map_err(|err| map_backend_error("failed to set copy source", err))?;
        context
            .paint()
            .map_err(|err| map_backend_error("failed to copy surface", err))
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        if let Err(err) = self.shift(dx, dy) {
            warn!(error = %err, "cairo scroll failed");
        }
    }
}

/// Cairo backend: presents into a screen-sized image that toolkit draw
/// callbacks paint with [`CairoBackend::present_on_context`].
#[derive(Debug, Default)]
pub struct CairoBackend {
    screen: Option<CairoSurface>,
    present_count: usize,
}

impl CairoBackend {
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn screen(&self) -> Option<&ImageSurface> {
        self.screen.as_ref().map(CairoSurface::image)
    }

    #[must_use]
    pub fn present_count(&self) -> usize {
        self.present_count
    }

    /// Paints the last presented image onto an external context (for example
    /// a GTK `DrawingArea` draw function).
    pub fn present_on_context(&self, context: &Context) -> MapResult<()> {
        let Some(screen) = self.screen.as_ref() else {
            return Ok(());
        };
        context
            .set_source_surface(screen.image(), 0.0, 0.0)
            .map_err(|err| map_backend_error("failed to set screen source", err))?;
        context
            .paint()
            .map_err(|err| map_backend_error("failed to paint screen", err))
    }
}

impl DisplayBackend for CairoBackend {
    type Surface = CairoSurface;

    fn allocate_surface(&mut self, size: PixelSize) -> MapResult<CairoSurface> {
        CairoSurface::new(size)
    }

    fn present(&mut self, surface: &CairoSurface) -> MapResult<()> {
        let reuse = self
            .screen
            .as_ref()
            .is_some_and(|screen| screen.size() == surface.size());
        if !reuse {
            self.screen = Some(CairoSurface::new(surface.size())?);
        }
        if let Some(screen) = self.screen.as_mut() {
            screen.copy_from(surface)?;
        }
        self.present_count += 1;
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> MapError {
    MapError::Backend(format!("{prefix}: {err}"))
}
