//! map-display: headless map display and navigation engine.
//!
//! The crate models the interactive part of a map control without tying it to
//! a GUI toolkit: ground/screen transforms, a double-buffered redraw manager,
//! a bounded view history, scrollbar synchronization and a closed set of
//! navigation tools driven by raw pointer and keyboard input. Hosts plug in a
//! [`render::DisplayBackend`] for pixels and an [`api::SpatialController`] for
//! the spatial model.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{MapDisplay, MapDisplayConfig, SpatialController};
pub use error::{MapError, MapResult};
