use crate::core::PixelSize;
use crate::error::MapResult;
use crate::render::{LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one draw pass.
///
/// Render callbacks append primitives here; the buffer manager validates the
/// frame before handing it to a surface, and reuses it between passes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub size: PixelSize,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            lines: Vec::new(),
            polylines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_polyline(mut self, polyline: PolylinePrimitive) -> Self {
        self.polylines.push(polyline);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    /// Empties the frame for the next pass, keeping allocations.
    pub fn clear(&mut self, size: PixelSize) {
        self.size = size;
        self.lines.clear();
        self.polylines.clear();
        self.rects.clear();
        self.texts.clear();
    }

    /// Empties the frame and releases its allocations.
    pub fn reset(&mut self, size: PixelSize) {
        *self = Self::new(size);
    }

    pub fn validate(&self) -> MapResult<()> {
        self.size.validate()?;

        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.polylines.len() + self.rects.len() + self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}
