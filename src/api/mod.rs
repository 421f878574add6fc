mod display;
mod display_config;
mod display_init;
mod display_snapshot;
mod draw_style;
mod history_controller;
mod input_controller;
mod json_contract;
mod navigation_controller;
mod plugin_dispatch;
mod plugin_registry;
mod render_coordinator;
mod resize_controller;
mod scroll_controller;
mod spatial_controller;
mod tool_controller;
mod validation;

pub use display::MapDisplay;
pub use display_config::MapDisplayConfig;
pub use display_snapshot::MapSnapshot;
pub use draw_style::DrawStyle;
pub use json_contract::{MAP_SNAPSHOT_JSON_SCHEMA_V1, MapSnapshotJsonContractV1};
pub use spatial_controller::{DrawContext, SpatialController};
