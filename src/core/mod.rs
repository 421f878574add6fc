pub mod history;
pub mod scale;
pub mod scrolling;
pub mod types;
pub mod viewport;
pub mod window;

pub use history::{DEFAULT_HISTORY_CAPACITY, DrawHistoryEntry, ViewHistory};
pub use scale::ViewTransform;
pub use scrolling::{ScrollAxis, ScrollBarState, ScrollBars, ScrollEvent, ScrollEventKind};
pub use types::{Dpi, GroundPoint, PixelPoint, PixelRect, PixelSize};
pub use viewport::{ScreenMetrics, Viewport};
pub use window::Window;
