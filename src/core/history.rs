use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::GroundPoint;
use crate::error::{MapError, MapResult};

pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// One recorded draw: where the view was centered and at what scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawHistoryEntry {
    pub center_x: f64,
    pub center_y: f64,
    pub scale: f64,
}

impl DrawHistoryEntry {
    #[must_use]
    pub const fn new(center_x: f64, center_y: f64, scale: f64) -> Self {
        Self {
            center_x,
            center_y,
            scale,
        }
    }

    #[must_use]
    pub fn center(self) -> GroundPoint {
        GroundPoint::new(self.center_x, self.center_y)
    }
}

/// Bounded log of previous draws with a cursor for back/forward navigation.
///
/// New entries always go to the tail, whatever the cursor position: moving
/// back and then navigating elsewhere keeps the entries that were ahead of the
/// cursor reachable with `forward`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewHistory {
    entries: VecDeque<DrawHistoryEntry>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for ViewHistory {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY),
            cursor: None,
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl ViewHistory {
    pub fn with_capacity(capacity: usize) -> MapResult<Self> {
        if capacity == 0 {
            return Err(MapError::InvalidData(
                "history capacity must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry currently on screen.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn current(&self) -> Option<DrawHistoryEntry> {
        self.cursor.and_then(|index| self.entries.get(index).copied())
    }

    pub fn entries(&self) -> impl Iterator<Item = &DrawHistoryEntry> {
        self.entries.iter()
    }

    /// Appends a draw, dropping the oldest entry when full, and makes it current.
    pub fn append(&mut self, entry: DrawHistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.cursor = Some(self.entries.len() - 1);
    }

    #[must_use]
    pub fn is_back_enabled(&self) -> bool {
        matches!(self.cursor, Some(index) if index > 0)
    }

    #[must_use]
    pub fn is_forward_enabled(&self) -> bool {
        matches!(self.cursor, Some(index) if index + 1 < self.entries.len())
    }

    /// Moves the cursor one entry back and returns the entry to redraw.
    pub fn back(&mut self) -> Option<DrawHistoryEntry> {
        if !self.is_back_enabled() {
            return None;
        }
        self.cursor = self.cursor.map(|index| index - 1);
        self.current()
    }

    /// Moves the cursor one entry forward and returns the entry to redraw.
    pub fn forward(&mut self) -> Option<DrawHistoryEntry> {
        if !self.is_forward_enabled() {
            return None;
        }
        self.cursor = self.cursor.map(|index| index + 1);
        self.current()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
