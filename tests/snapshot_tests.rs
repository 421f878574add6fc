use map_display::MapResult;
use map_display::api::{
    DrawContext, MAP_SNAPSHOT_JSON_SCHEMA_V1, MapDisplay, MapDisplayConfig, MapSnapshot,
    MapSnapshotJsonContractV1, SpatialController,
};
use map_display::core::{PixelSize, Window};
use map_display::interaction::{InteractionMode, ToolKind};
use map_display::render::PixelBackend;

struct Survey;

impl SpatialController for Survey {
    fn model_extent(&self) -> Option<Window> {
        Window::new(500_000.0, 4_000_000.0, 510_000.0, 4_006_000.0).ok()
    }

    fn render_model(&self, context: &mut DrawContext<'_>) -> MapResult<()> {
        let extent = context.extent();
        context.draw_line(extent.min(), extent.max());
        Ok(())
    }
}

fn display() -> MapDisplay<PixelBackend> {
    let mut display = MapDisplay::new(
        PixelBackend::default(),
        MapDisplayConfig::new(PixelSize::new(1024, 768)),
    )
    .expect("display init");
    display.replace_map_model(&Survey, None).expect("attach");
    display.zoom_in(&Survey, 0.2).expect("zoom");
    display.start_tool(&Survey, ToolKind::Magnify).expect("start");
    display
}

#[test]
fn snapshot_reflects_display_state() {
    let display = display();
    let snapshot = display.snapshot();

    assert_eq!(snapshot.size, PixelSize::new(1024, 768));
    assert_eq!(snapshot.extent, display.viewport().extent());
    assert_eq!(snapshot.scale, display.viewport().scale());
    assert_eq!(snapshot.model_extent, Survey.model_extent());
    assert_eq!(snapshot.overview, display.overview_extent());
    assert_eq!(snapshot.history.len(), 2);
    assert_eq!(snapshot.history_cursor, Some(1));
    assert_eq!(
        snapshot.interaction_mode,
        InteractionMode::Active(ToolKind::Magnify)
    );
    assert_eq!(snapshot.buffer_stats.full_redraws, 2);
    assert!(snapshot.plugin_ids.is_empty());
}

#[test]
fn contract_v1_round_trip() {
    let display = display();
    let json = display
        .snapshot_json_contract_v1_pretty()
        .expect("serialize");

    let payload: MapSnapshotJsonContractV1 = serde_json::from_str(&json).expect("payload");
    assert_eq!(payload.schema_version, MAP_SNAPSHOT_JSON_SCHEMA_V1);

    let parsed = MapSnapshot::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, display.snapshot());
}

#[test]
fn bare_snapshot_is_accepted() {
    let snapshot = display().snapshot();
    let json = serde_json::to_string(&snapshot).expect("serialize");
    let parsed = MapSnapshot::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, snapshot);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let snapshot = display().snapshot();
    let payload = MapSnapshotJsonContractV1 {
        schema_version: 99,
        snapshot,
    };
    let json = serde_json::to_string(&payload).expect("serialize");
    let err = MapSnapshot::from_json_compat_str(&json).expect_err("version 99");
    assert!(err.to_string().contains("unsupported snapshot schema version"));
}
