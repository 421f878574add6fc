use serde::{Deserialize, Serialize};

use crate::core::window::Window;

/// Which scrollbar an event or state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

impl ScrollAxis {
    /// Ground offset the view extent moves by when the thumb goes from `old_value` to `new_value`.
    ///
    /// The vertical thumb runs top-down while ground Y grows upwards, so its
    /// shift is negated.
    #[must_use]
    pub fn ground_shift(self, old_value: i64, new_value: i64) -> (f64, f64) {
        let delta = (new_value - old_value) as f64;
        match self {
            Self::Horizontal => (delta, 0.0),
            Self::Vertical => (0.0, -delta),
        }
    }
}

/// Kind of scrollbar notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollEventKind {
    /// Thumb dragged.
    ThumbTrack,
    /// Arrow clicked.
    SmallStep,
    /// Track clicked.
    LargeStep,
    /// User let go of the scrollbar.
    EndScroll,
}

/// One scrollbar notification: the thumb moved from `old_value` to `new_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollEvent {
    pub kind: ScrollEventKind,
    pub old_value: i64,
    pub new_value: i64,
}

impl ScrollEvent {
    #[must_use]
    pub fn new(kind: ScrollEventKind, old_value: i64, new_value: i64) -> Self {
        Self {
            kind,
            old_value,
            new_value,
        }
    }

    #[must_use]
    pub fn is_end(self) -> bool {
        self.kind == ScrollEventKind::EndScroll
    }
}

/// Range and thumb of one scrollbar, in whole ground units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScrollBarState {
    pub enabled: bool,
    pub minimum: i64,
    pub maximum: i64,
    pub large_change: i64,
    pub small_change: i64,
    pub value: i64,
}

impl ScrollBarState {
    fn from_ranges(
        overview_min: f64,
        overview_max: f64,
        view_span: f64,
        thumb: f64,
    ) -> Self {
        // Whole ground units: fine for projected coordinates, coarse for lat/long.
        let minimum = overview_min as i64;
        let maximum = (overview_max as i64).max(minimum);
        let large_change = view_span as i64;
        Self {
            enabled: true,
            minimum,
            maximum,
            large_change,
            small_change: large_change / 10,
            value: (thumb as i64).clamp(minimum, maximum),
        }
    }
}

/// Horizontal and vertical scrollbar state for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScrollBars {
    pub horizontal: ScrollBarState,
    pub vertical: ScrollBarState,
}

impl ScrollBars {
    /// Derives scrollbar state from the model extent, the overview and the visible extent.
    ///
    /// Each bar is disabled (rather than hidden, which would change the display
    /// size) when the visible extent already covers the model on that axis.
    #[must_use]
    pub fn compute(model: Option<Window>, overview: Option<Window>, view: Option<Window>) -> Self {
        let (Some(model), Some(overview), Some(view)) = (model, overview, view) else {
            return Self::default();
        };

        let covers_x = view.min().x <= model.min().x && view.max().x >= model.max().x;
        let covers_y = view.min().y <= model.min().y && view.max().y >= model.max().y;

        let horizontal = if covers_x {
            ScrollBarState::default()
        } else {
            ScrollBarState::from_ranges(
                overview.min().x,
                overview.max().x,
                view.width(),
                view.min().x,
            )
        };

        let vertical = if covers_y {
            ScrollBarState::default()
        } else {
            ScrollBarState::from_ranges(
                overview.min().y,
                overview.max().y,
                view.height(),
                overview.min().y + overview.max().y - view.max().y,
            )
        };

        Self {
            horizontal,
            vertical,
        }
    }

    #[must_use]
    pub fn axis(&self, axis: ScrollAxis) -> ScrollBarState {
        match axis {
            ScrollAxis::Horizontal => self.horizontal,
            ScrollAxis::Vertical => self.vertical,
        }
    }
}
