//! Extension points for hosts embedding the display.
//!
//! Extensions observe the display; they never reach into its internals.

mod plugins;

pub use plugins::{MapEvent, MapPlugin, MapPluginContext};
