use approx::assert_relative_eq;
use map_display::MapResult;
use map_display::api::{DrawContext, MapDisplay, MapDisplayConfig, SpatialController};
use map_display::core::{GroundPoint, PixelSize, Window};
use map_display::interaction::{DisplayToolId, InteractionMode, ToolKind};
use map_display::render::PixelBackend;
use proptest::prelude::*;

struct Model {
    extent: Option<Window>,
}

impl Model {
    fn square() -> Self {
        Self {
            extent: Some(Window::new(0.0, 0.0, 1000.0, 1000.0).expect("extent")),
        }
    }

    fn unbounded() -> Self {
        Self { extent: None }
    }

    fn point() -> Self {
        Self {
            extent: Some(Window::from_point(GroundPoint::new(300.0, 400.0)).expect("extent")),
        }
    }
}

impl SpatialController for Model {
    fn model_extent(&self) -> Option<Window> {
        self.extent
    }

    fn render_model(&self, context: &mut DrawContext<'_>) -> MapResult<()> {
        context.draw_point(GroundPoint::new(500.0, 500.0));
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

#[test]
fn zoom_in_shrinks_spans_about_center() {
    let model = Model::square();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");
    let before = display.viewport().extent().expect("extent");
    let scale = display.viewport().scale().expect("scale");

    display.zoom_in(&model, 0.2).expect("zoom in");

    let after = display.viewport().extent().expect("extent");
    assert_relative_eq!(after.width(), before.width() / 1.4, max_relative = 1e-12);
    assert_relative_eq!(after.center().x, before.center().x, max_relative = 1e-12);
    assert_relative_eq!(
        display.viewport().scale().expect("scale"),
        scale / 1.4,
        max_relative = 1e-12
    );
    assert_eq!(display.history().len(), 2);
}

#[test]
fn zoom_out_never_goes_beyond_the_overview() {
    let model = Model::square();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");
    let overview_view = display.viewport().extent().expect("extent");

    display.zoom_out(&model, 0.2).expect("zoom out");
    let extent = display.viewport().extent().expect("extent");
    assert!(extent.approx_eq(overview_view, 1e-6));

    display.zoom_in(&model, 0.2).expect("zoom in");
    assert!(display.is_enabled(DisplayToolId::ZoomOut));
    display.zoom_out(&model, 0.5).expect("zoom out");
    let extent = display.viewport().extent().expect("extent");
    assert!(extent.approx_eq(overview_view, 1e-6));
}

#[test]
fn overview_is_fitted_to_the_display() {
    let model = Model::square();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");

    let overview = display.overview_extent().expect("overview");
    let extent = display.viewport().extent().expect("extent");
    assert!(extent.approx_eq(overview, 1e-6));
    assert_relative_eq!(overview.width(), 2.0 * overview.height(), max_relative = 1e-12);
    assert_relative_eq!(overview.width(), 2800.0, max_relative = 1e-12);
    assert_relative_eq!(overview.center().x, 500.0, max_relative = 1e-12);
    let expanded = Window::new(-200.0, -200.0, 1200.0, 1200.0).expect("expanded");
    assert!(expanded.is_enclosed_by(overview.expanded_by(1e-6)));
}

#[test]
fn point_model_overview_uses_symbol_scale() {
    let model = Model::point();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");

    let overview = display.overview_extent().expect("overview");
    assert_relative_eq!(overview.width(), 508.0, max_relative = 1e-12);
    assert_relative_eq!(overview.height(), 254.0, max_relative = 1e-12);
    assert_relative_eq!(overview.center().x, 300.0, max_relative = 1e-12);
    assert_relative_eq!(overview.center().y, 400.0, max_relative = 1e-12);
    assert_relative_eq!(
        display.viewport().scale().expect("scale"),
        2000.0,
        max_relative = 1e-12
    );
}

#[test]
fn overview_request_is_disabled_while_showing_the_overview() {
    let model = Model::square();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");

    assert!(!display.is_overview_enabled());
    assert!(!display.is_enabled(DisplayToolId::Overview));
    assert!(!display.is_enabled(DisplayToolId::ZoomOut));
    assert!(!display.do_tool(&model, DisplayToolId::Overview).expect("overview"));
    assert_eq!(display.history().len(), 1);

    display.zoom_in(&model, 0.2).expect("zoom in");
    assert!(display.is_overview_enabled());
    assert!(display.is_enabled(DisplayToolId::Overview));

    display.draw_overview(&model).expect("overview");
    assert!(!display.is_enabled(DisplayToolId::Overview));
}

#[test]
fn zoom_out_restores_zoom_in_with_a_model() {
    let model = Model::square();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");
    let window = Window::new(250.0, 250.0, 1250.0, 750.0).expect("window");
    display
        .set_new_window(&model, window, true)
        .expect("window");
    let before = display.viewport().extent().expect("extent");

    display.zoom_in(&model, 0.2).expect("zoom in");
    display.zoom_out(&model, 0.2).expect("zoom out");

    let after = display.viewport().extent().expect("extent");
    assert!(after.approx_eq(before, 1e-6), "{before} became {after}");
}

#[test]
fn invalid_zoom_factor_is_rejected() {
    let model = Model::square();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");
    let before = display.viewport();

    assert!(display.zoom_in(&model, 0.0).is_err());
    assert!(display.zoom_out(&model, f64::NAN).is_err());
    assert_eq!(display.viewport(), before);
}

#[test]
fn zooming_without_a_view_fails() {
    let model = Model::square();
    let mut display = display();
    assert!(display.zoom_in(&model, 0.2).is_err());
    assert!(display.set_scale(&model, 1000.0).is_err());
}

#[test]
fn navigation_requests_drive_the_display() {
    let model = Model::square();
    let mut display = display();

    // Nothing is enabled until a model is attached.
    assert!(!display.do_tool(&model, DisplayToolId::ZoomIn).expect("zoom"));
    assert!(!display.do_tool(&model, DisplayToolId::Pan).expect("pan"));
    assert!(!display.do_tool(&model, DisplayToolId::Previous).expect("back"));

    display.replace_map_model(&model, None).expect("attach");
    let overview_scale = display.viewport().scale().expect("scale");

    assert!(display.do_tool(&model, DisplayToolId::ZoomIn).expect("zoom"));
    assert!(display.do_tool(&model, DisplayToolId::DrawScale(5000.0)).expect("scale"));
    assert_eq!(display.viewport().scale(), Some(5000.0));
    assert_eq!(display.history().len(), 3);

    assert!(display.do_tool(&model, DisplayToolId::MapRefresh).expect("refresh"));
    assert_eq!(display.history().len(), 3);

    assert!(display.do_tool(&model, DisplayToolId::Previous).expect("back"));
    assert!(display.do_tool(&model, DisplayToolId::Previous).expect("back"));
    assert_relative_eq!(
        display.viewport().scale().expect("scale"),
        overview_scale,
        max_relative = 1e-12
    );
    assert!(!display.is_enabled(DisplayToolId::Previous));
    assert!(display.do_tool(&model, DisplayToolId::Next).expect("forward"));
    assert_eq!(display.history().cursor(), Some(1));

    assert!(display.do_tool(&model, DisplayToolId::Pan).expect("pan"));
    assert_eq!(display.interaction_mode(), InteractionMode::Active(ToolKind::Pan));

    // Any other request escapes the active tool first.
    assert!(display.do_tool(&model, DisplayToolId::Overview).expect("overview"));
    assert_eq!(display.interaction_mode(), InteractionMode::Idle);
    assert_relative_eq!(
        display.viewport().scale().expect("scale"),
        overview_scale,
        max_relative = 1e-12
    );
}

#[test]
fn back_and_forward_redraw_without_recording() {
    let model = Model::square();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");
    display.zoom_in(&model, 0.2).expect("zoom");
    display.zoom_in(&model, 0.2).expect("zoom");
    let newest = display.viewport().scale();

    assert!(display.back(&model).expect("back"));
    assert!(display.back(&model).expect("back"));
    assert!(!display.back(&model).expect("back"));
    assert_eq!(display.history().len(), 3);
    assert_eq!(display.history().cursor(), Some(0));

    assert!(display.forward(&model).expect("forward"));
    assert!(display.forward(&model).expect("forward"));
    assert!(!display.forward(&model).expect("forward"));
    assert_eq!(display.viewport().scale(), newest);
}

#[test]
fn navigating_after_back_appends_at_the_tail() {
    let model = Model::square();
    let mut display = display();
    display.replace_map_model(&model, None).expect("attach");
    display.zoom_in(&model, 0.2).expect("zoom");
    display.back(&model).expect("back");

    display
        .set_center(&model, GroundPoint::new(250.0, 250.0))
        .expect("center");

    assert_eq!(display.history().len(), 3);
    assert_eq!(display.history().cursor(), Some(2));
    assert!(display.is_back_enabled());
    assert!(!display.is_forward_enabled());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn zoom_out_inverts_zoom_in_without_overview(
        factor in 0.01f64..1.0,
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
    ) {
        let model = Model::unbounded();
        let mut display = display();
        let window = Window::new(x, y, x + 500.0, y + 250.0).expect("window");
        display.replace_map_model(&model, Some(window)).expect("attach");
        let scale = display.viewport().scale().expect("scale");
        let center = display.viewport().center().expect("center");

        display.zoom_in(&model, factor).expect("zoom in");
        display.zoom_out(&model, factor).expect("zoom out");

        let restored = display.viewport().scale().expect("scale");
        prop_assert!(((restored - scale) / scale).abs() <= 1e-9);
        let restored_center = display.viewport().center().expect("center");
        prop_assert!((restored_center.x - center.x).abs() <= 1e-6);
        prop_assert!((restored_center.y - center.y).abs() <= 1e-6);
    }

    #[test]
    fn zoom_out_inverts_zoom_in_inside_the_model(
        factor in 0.01f64..0.5,
        x in 0.0f64..500.0,
        y in 0.0f64..750.0,
    ) {
        let model = Model::square();
        let mut display = display();
        display.replace_map_model(&model, None).expect("attach");
        let window = Window::new(x, y, x + 500.0, y + 250.0).expect("window");
        display.set_new_window(&model, window, true).expect("window");
        let before = display.viewport().extent().expect("extent");

        display.zoom_in(&model, factor).expect("zoom in");
        display.zoom_out(&model, factor).expect("zoom out");

        let after = display.viewport().extent().expect("extent");
        prop_assert!(after.approx_eq(before, 1e-6));
    }
}
