use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::GroundPoint;
use crate::error::{MapError, MapResult};

/// Axis-aligned ground extent.
///
/// A `Window` is never empty; an undefined extent is modelled as
/// `Option<Window>::None`. Corners are normalized on construction so
/// `min <= max` holds on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    min: GroundPoint,
    max: GroundPoint,
}

impl Window {
    /// Creates the window enclosing two corner positions.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> MapResult<Self> {
        if !x1.is_finite() || !y1.is_finite() || !x2.is_finite() || !y2.is_finite() {
            return Err(MapError::InvalidData(
                "window corners must be finite".to_owned(),
            ));
        }
        Ok(Self {
            min: GroundPoint::new(x1.min(x2), y1.min(y2)),
            max: GroundPoint::new(x1.max(x2), y1.max(y2)),
        })
    }

    pub fn from_corners(a: GroundPoint, b: GroundPoint) -> MapResult<Self> {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Window that coincides with a single position.
    pub fn from_point(point: GroundPoint) -> MapResult<Self> {
        Self::from_corners(point, point)
    }

    /// Window of the given ground dimensions centered on `center`.
    pub fn from_center_size(center: GroundPoint, width: f64, height: f64) -> MapResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(MapError::InvalidData(
                "window dimensions must be finite and >= 0".to_owned(),
            ));
        }
        Self::new(
            center.x - width * 0.5,
            center.y - height * 0.5,
            center.x + width * 0.5,
            center.y + height * 0.5,
        )
    }

    /// Smallest window enclosing all supplied positions (`None` for an empty slice).
    pub fn enclosing(points: &[GroundPoint]) -> MapResult<Option<Self>> {
        let mut result: Option<Self> = None;
        for point in points {
            let single = Self::from_point(*point)?;
            result = Some(match result {
                Some(window) => window.union(single),
                None => single,
            });
        }
        Ok(result)
    }

    /// South-west corner.
    #[must_use]
    pub fn min(self) -> GroundPoint {
        self.min
    }

    /// North-east corner.
    #[must_use]
    pub fn max(self) -> GroundPoint {
        self.max
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn center(self) -> GroundPoint {
        GroundPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Does this window only cover a point in space?
    #[must_use]
    pub fn is_point(self) -> bool {
        self.width() < f64::EPSILON && self.height() < f64::EPSILON
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: GroundPoint::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: GroundPoint::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Area of common overlap, `None` when the windows are disjoint.
    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let min = GroundPoint::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = GroundPoint::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x > max.x || min.y > max.y {
            return None;
        }
        Some(Self { min, max })
    }

    /// True when the windows overlap or touch.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.intersection(other).is_some()
    }

    /// True when `point` lies inside or on the edge of this window.
    #[must_use]
    pub fn contains_point(self, point: GroundPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    #[must_use]
    pub fn is_enclosed_by(self, other: Self) -> bool {
        other.min.x <= self.min.x
            && other.min.y <= self.min.y
            && other.max.x >= self.max.x
            && other.max.y >= self.max.y
    }

    /// Expands the window by a margin of `factor` times its size on every side.
    ///
    /// A factor of `0.1` adds a 10% margin all the way round; negative factors
    /// shrink the window, but never below a zero span.
    #[must_use]
    pub fn expanded(self, factor: f64) -> Self {
        let mut dx = self.width();
        let mut dy = self.height();
        dx += dx * factor * 2.0;
        dy += dy * factor * 2.0;

        if factor < 0.0 {
            dx = dx.max(0.0);
            dy = dy.max(0.0);
        }

        let center = self.center();
        let min = GroundPoint::new(center.x - dx * 0.5, center.y - dy * 0.5);
        Self {
            min,
            max: GroundPoint::new(min.x + dx, min.y + dy),
        }
    }

    /// Grows (or, for negative distances, shrinks) every side by `distance`.
    #[must_use]
    pub fn expanded_by(self, distance: f64) -> Self {
        let mut min = GroundPoint::new(self.min.x - distance, self.min.y - distance);
        let mut max = GroundPoint::new(self.max.x + distance, self.max.y + distance);
        if min.x > max.x {
            let mid = 0.5 * (min.x + max.x);
            min.x = mid;
            max.x = mid;
        }
        if min.y > max.y {
            let mid = 0.5 * (min.y + max.y);
            min.y = mid;
            max.y = mid;
        }
        Self { min, max }
    }

    /// Scales both spans about the center by `ratio`.
    #[must_use]
    pub fn scaled(self, ratio: f64) -> Self {
        let center = self.center();
        let half_w = self.width() * ratio * 0.5;
        let half_h = self.height() * ratio * 0.5;
        Self {
            min: GroundPoint::new(center.x - half_w, center.y - half_h),
            max: GroundPoint::new(center.x + half_w, center.y + half_h),
        }
    }

    #[must_use]
    pub fn shifted(self, dx: f64, dy: f64) -> Self {
        Self {
            min: GroundPoint::new(self.min.x + dx, self.min.y + dy),
            max: GroundPoint::new(self.max.x + dx, self.max.y + dy),
        }
    }

    /// Corner-wise comparison within an absolute tolerance.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.min.x - other.min.x).abs() <= tolerance
            && (self.min.y - other.min.y).abs() <= tolerance
            && (self.max.x - other.max.x).abs() <= tolerance
            && (self.max.y - other.max.y).abs() <= tolerance
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Min [{:.3}E, {:.3}N]  Max [{:.3}E, {:.3}N]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
