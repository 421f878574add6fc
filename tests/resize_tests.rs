use approx::assert_abs_diff_eq;
use map_display::MapResult;
use map_display::api::{DrawContext, MapDisplay, MapDisplayConfig, SpatialController};
use map_display::core::{PixelSize, Window};
use map_display::interaction::ToolKind;
use map_display::render::{DrawOutcome, PixelBackend};

struct SquareModel;

impl SpatialController for SquareModel {
    fn model_extent(&self) -> Option<Window> {
        Window::new(0.0, 0.0, 1000.0, 1000.0).ok()
    }

    fn render_model(&self, context: &mut DrawContext<'_>) -> MapResult<()> {
        let extent = Window::new(0.0, 0.0, 1000.0, 1000.0)?;
        context.fill_window(extent);
        Ok(())
    }
}

fn display() -> MapDisplay<PixelBackend> {
    MapDisplay::new(
        PixelBackend::default(),
        MapDisplayConfig::new(PixelSize::new(960, 480)),
    )
    .expect("display init")
}

fn attached() -> MapDisplay<PixelBackend> {
    let mut display = display();
    display.replace_map_model(&SquareModel, None).expect("attach");
    display
}

#[test]
fn resize_keeps_center_and_scale() {
    let mut display = attached();
    let center = display.viewport().center().expect("center");
    let scale = display.viewport().scale();

    display
        .resize(&SquareModel, PixelSize::new(480, 480))
        .expect("resize");

    let extent = display.viewport().extent().expect("extent");
    assert_abs_diff_eq!(extent.center().x, center.x, epsilon = 1e-9);
    assert_abs_diff_eq!(extent.center().y, center.y, epsilon = 1e-9);
    assert_abs_diff_eq!(extent.width(), extent.height(), epsilon = 1e-9);
    assert_eq!(display.viewport().scale(), scale);
    assert_eq!(display.config().size, PixelSize::new(480, 480));
    assert_eq!(
        display.render_buffers().size(),
        Some(PixelSize::new(480, 480))
    );
    assert_eq!(display.backend().allocation_count(), 4);
    assert_eq!(display.history().len(), 1);
}

#[test]
fn resize_loop_applies_only_the_last_size() {
    let mut display = attached();
    let redraws = display.buffer_stats().full_redraws;

    display.begin_resize();
    for width in [700, 650, 600] {
        display
            .resize(&SquareModel, PixelSize::new(width, 400))
            .expect("resize");
    }
    assert_eq!(display.backend().allocation_count(), 2);
    assert_eq!(display.viewport().size(), PixelSize::new(960, 480));

    display.end_resize(&SquareModel).expect("end resize");

    assert_eq!(display.viewport().size(), PixelSize::new(600, 400));
    assert_eq!(display.backend().allocation_count(), 4);
    assert_eq!(display.buffer_stats().full_redraws, redraws + 1);

    // Nothing pending: ending again does nothing.
    display.end_resize(&SquareModel).expect("end resize");
    assert_eq!(display.backend().allocation_count(), 4);
}

#[test]
fn resize_escapes_the_active_tool() {
    let mut display = attached();
    display
        .start_tool(&SquareModel, ToolKind::ZoomRectangle)
        .expect("start");

    display
        .resize(&SquareModel, PixelSize::new(800, 600))
        .expect("resize");
    assert_eq!(display.active_tool_kind(), None);
}

#[test]
fn zero_area_defers_drawing_until_a_usable_size() {
    let mut display = attached();
    let extent = display.viewport().extent();

    display
        .resize(&SquareModel, PixelSize::new(0, 0))
        .expect("resize");
    assert!(!display.render_buffers().is_allocated());
    assert_eq!(display.viewport().extent(), extent);
    assert_eq!(
        display.redraw(&SquareModel).expect("redraw"),
        DrawOutcome::Deferred
    );

    // Navigation is ignored while there is nothing to draw on.
    display.zoom_in(&SquareModel, 0.2).expect("zoom");
    assert_eq!(display.viewport().extent(), extent);
    assert_eq!(display.history().len(), 1);

    display
        .resize(&SquareModel, PixelSize::new(960, 480))
        .expect("resize");
    assert!(display.render_buffers().is_allocated());
    let restored = display.viewport().extent().expect("extent");
    assert!(restored.approx_eq(extent.expect("extent"), 1e-9));
    assert_eq!(
        display.redraw(&SquareModel).expect("redraw"),
        DrawOutcome::Drawn
    );
}

#[test]
fn model_attached_without_area_is_shown_once_sized() {
    let mut display = display();
    display
        .resize(&SquareModel, PixelSize::new(0, 300))
        .expect("resize");
    display.replace_map_model(&SquareModel, None).expect("attach");
    assert!(!display.viewport().has_view());
    assert!(display.history().is_empty());

    display
        .resize(&SquareModel, PixelSize::new(960, 480))
        .expect("resize");

    let extent = display.viewport().extent().expect("extent");
    let overview = display.overview_extent().expect("overview");
    assert!(overview.is_enclosed_by(extent.expanded_by(1e-6)));
    assert_eq!(display.history().len(), 1);
    assert!(!display.scroll_bars().horizontal.enabled);
}

#[test]
fn release_then_resize_reallocates() {
    let mut display = attached();
    display.release();
    assert!(!display.render_buffers().is_allocated());

    display
        .resize(&SquareModel, PixelSize::new(960, 480))
        .expect("resize");
    assert!(display.render_buffers().is_allocated());
    assert_eq!(display.buffer_stats().allocations, 2);
}
