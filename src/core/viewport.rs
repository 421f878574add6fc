use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::scale::ViewTransform;
use crate::core::types::{Dpi, GroundPoint, PixelPoint, PixelSize};
use crate::core::window::Window;
use crate::error::{MapError, MapResult};

const INCHES_TO_METERS: f64 = 0.0254;

/// On-screen height a point symbol should have when a single position is drawn.
const POINT_SYMBOL_SCREEN_HEIGHT_M: f64 = 0.001;

/// Physical description of the display area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    size: PixelSize,
    dpi: Dpi,
}

impl ScreenMetrics {
    /// Pixel size may be zero (a collapsed display); DPI must be valid.
    pub fn new(size: PixelSize, dpi: Dpi) -> MapResult<Self> {
        Ok(Self {
            size,
            dpi: dpi.validate()?,
        })
    }

    #[must_use]
    pub fn size(self) -> PixelSize {
        self.size
    }

    #[must_use]
    pub fn dpi(self) -> Dpi {
        self.dpi
    }

    /// Display dimensions in meters (a "dot" is taken to be a pixel).
    pub fn physical_size_m(self) -> MapResult<(f64, f64)> {
        let size = self.size.validate()?;
        let width = f64::from(size.width) / self.dpi.x * INCHES_TO_METERS;
        let height = f64::from(size.height) / self.dpi.y * INCHES_TO_METERS;
        Ok((width, height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewState {
    extent: Window,
    scale: f64,
    ground_to_pixel: f64,
}

/// Ground extent, scale and ground/display conversion for the map panel.
///
/// The extent, scale denominator and ground-to-pixel factor are only changed
/// together, through [`Viewport::set_window`], [`Viewport::set_center_and_scale`]
/// and [`Viewport::shift`], so they never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    metrics: ScreenMetrics,
    view: Option<ViewState>,
}

impl Viewport {
    #[must_use]
    pub fn new(metrics: ScreenMetrics) -> Self {
        Self {
            metrics,
            view: None,
        }
    }

    #[must_use]
    pub fn metrics(&self) -> ScreenMetrics {
        self.metrics
    }

    #[must_use]
    pub fn size(&self) -> PixelSize {
        self.metrics.size()
    }

    #[must_use]
    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    #[must_use]
    pub fn extent(&self) -> Option<Window> {
        self.view.map(|view| view.extent)
    }

    /// Scale denominator of the current view (e.g. `500.0` for 1:500).
    #[must_use]
    pub fn scale(&self) -> Option<f64> {
        self.view.map(|view| view.scale)
    }

    #[must_use]
    pub fn ground_to_pixel(&self) -> Option<f64> {
        self.view.map(|view| view.ground_to_pixel)
    }

    #[must_use]
    pub fn center(&self) -> Option<GroundPoint> {
        self.view.map(|view| view.extent.center())
    }

    #[must_use]
    pub fn transform(&self) -> Option<ViewTransform> {
        self.view
            .map(|view| ViewTransform::new(view.extent, view.ground_to_pixel))
    }

    /// Forgets the current view (no model attached).
    pub fn reset(&mut self) {
        self.view = None;
    }

    /// Records new display metrics, re-deriving the view at the same center and scale.
    ///
    /// When the new size has no area the previous view is kept untouched; the
    /// caller is expected to re-apply it once a usable size is known.
    pub fn set_metrics(&mut self, metrics: ScreenMetrics) -> MapResult<()> {
        self.metrics = metrics;
        if !metrics.size().is_valid() {
            return Ok(());
        }
        if let Some(view) = self.view {
            let center = view.extent.center();
            self.set_center_and_scale(center.x, center.y, view.scale)?;
        }
        Ok(())
    }

    /// Makes `window` visible, fitting it to the display aspect.
    ///
    /// The scale denominator is the larger of the x/y ratios so the result
    /// never shows less than `window`. A window that only covers a point is
    /// treated as a request to show that point with a symbol of
    /// `point_symbol_height_m` drawn 1mm high.
    pub fn set_window(&mut self, window: Window, point_symbol_height_m: f64) -> MapResult<()> {
        let (center, scale) = self.fit(window, point_symbol_height_m)?;
        let (width_m, height_m) = self.metrics.physical_size_m()?;
        self.apply(center, scale, width_m, height_m)
    }

    /// Extent [`Viewport::set_window`] would show for `window`, leaving the
    /// current view untouched.
    pub fn fitted_window(&self, window: Window, point_symbol_height_m: f64) -> MapResult<Window> {
        let (center, scale) = self.fit(window, point_symbol_height_m)?;
        let (width_m, height_m) = self.metrics.physical_size_m()?;
        Window::from_center_size(center, width_m * scale, height_m * scale)
    }

    /// Defines the view from a center point and scale denominator.
    pub fn set_center_and_scale(&mut self, x: f64, y: f64, scale: f64) -> MapResult<()> {
        let center = GroundPoint::new(x, y).validate()?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MapError::InvalidData(
                "draw scale must be finite and > 0".to_owned(),
            ));
        }
        let (width_m, height_m) = self.metrics.physical_size_m()?;
        self.apply(center, scale, width_m, height_m)
    }

    /// Translates the current view by a ground offset, keeping the scale.
    pub fn shift(&mut self, dx: f64, dy: f64) -> MapResult<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(MapError::InvalidData("shift must be finite".to_owned()));
        }
        let view = self.view.as_mut().ok_or_else(no_view_error)?;
        view.extent = view.extent.shifted(dx, dy);
        Ok(())
    }

    pub fn ground_to_screen(&self, point: GroundPoint) -> MapResult<PixelPoint> {
        let point = point.validate()?;
        Ok(self.require_transform()?.ground_to_screen(point))
    }

    pub fn screen_to_ground(&self, pixel: PixelPoint) -> MapResult<GroundPoint> {
        if !pixel.x.is_finite() || !pixel.y.is_finite() {
            return Err(MapError::InvalidData(
                "pixel position must be finite".to_owned(),
            ));
        }
        Ok(self.require_transform()?.screen_to_ground(pixel))
    }

    pub fn length_to_screen(&self, ground_length: f64) -> MapResult<f64> {
        if !ground_length.is_finite() {
            return Err(MapError::InvalidData("length must be finite".to_owned()));
        }
        Ok(self.require_transform()?.length_to_screen(ground_length))
    }

    pub fn screen_to_length(&self, pixels: f64) -> MapResult<f64> {
        if !pixels.is_finite() {
            return Err(MapError::InvalidData(
                "pixel length must be finite".to_owned(),
            ));
        }
        Ok(self.require_transform()?.screen_to_length(pixels))
    }

    fn fit(&self, window: Window, point_symbol_height_m: f64) -> MapResult<(GroundPoint, f64)> {
        let (width_m, height_m) = self.metrics.physical_size_m()?;

        let window = if window.is_point() {
            point_window(window.min(), point_symbol_height_m, width_m, height_m)?
        } else {
            window
        };

        let scale_x = window.width() / width_m;
        let scale_y = window.height() / height_m;
        let scale = scale_x.max(scale_y);
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MapError::InvalidData(format!(
                "cannot derive a draw scale for window {window}"
            )));
        }
        Ok((window.center(), scale))
    }

    fn require_transform(&self) -> MapResult<ViewTransform> {
        self.transform().ok_or_else(no_view_error)
    }

    fn apply(
        &mut self,
        center: GroundPoint,
        scale: f64,
        width_m: f64,
        height_m: f64,
    ) -> MapResult<()> {
        let ground_width = width_m * scale;
        let ground_height = height_m * scale;
        let extent = Window::from_center_size(center, ground_width, ground_height)?;
        let ground_to_pixel = f64::from(self.metrics.size().width) / ground_width;
        if !ground_to_pixel.is_finite() || ground_to_pixel <= 0.0 {
            return Err(MapError::InvalidData(format!(
                "scale 1:{scale} cannot be shown on this display"
            )));
        }

        trace!(%extent, scale, ground_to_pixel, "viewport updated");
        self.view = Some(ViewState {
            extent,
            scale,
            ground_to_pixel,
        });
        Ok(())
    }
}

/// Square-ish window around `corner` at the scale that draws a point symbol
/// of `symbol_height_m` ground meters 1mm high on screen.
fn point_window(
    corner: GroundPoint,
    symbol_height_m: f64,
    width_m: f64,
    height_m: f64,
) -> MapResult<Window> {
    if !symbol_height_m.is_finite() || symbol_height_m <= 0.0 {
        return Err(MapError::InvalidData(
            "point symbol height must be finite and > 0".to_owned(),
        ));
    }
    let scale = (symbol_height_m / POINT_SYMBOL_SCREEN_HEIGHT_M).max(1.0);
    Window::from_center_size(corner, width_m * scale, height_m * scale)
}

fn no_view_error() -> MapError {
    MapError::InvalidOperation("viewport has no ground extent".to_owned())
}
