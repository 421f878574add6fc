use std::cell::RefCell;
use std::rc::Rc;

use map_display::{MapError, MapResult};
use map_display::api::{DrawContext, MapDisplay, MapDisplayConfig, SpatialController};
use map_display::core::{GroundPoint, PixelSize, Window};
use map_display::extensions::{MapEvent, MapPlugin, MapPluginContext};
use map_display::interaction::ToolKind;
use map_display::render::PixelBackend;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(MapEvent, MapPluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(MapEvent, MapPluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl MapPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: MapEvent, context: MapPluginContext) {
        self.events.borrow_mut().push((event, context));
    }
}

struct Roads;

impl SpatialController for Roads {
    fn model_extent(&self) -> Option<Window> {
        Window::new(0.0, 0.0, 2000.0, 1000.0).ok()
    }

    fn render_model(&self, context: &mut DrawContext<'_>) -> MapResult<()> {
        context.draw_polyline(
            &[
                GroundPoint::new(0.0, 0.0),
                GroundPoint::new(1000.0, 500.0),
                GroundPoint::new(2000.0, 0.0),
            ],
            false,
        );
        Ok(())
    }
}

fn event_kind(event: &MapEvent) -> &'static str {
    match event {
        MapEvent::ExtentChanged { .. } => "extent",
        MapEvent::HistoryAppended { .. } => "history",
        MapEvent::ToolStarted { .. } => "tool_start",
        MapEvent::ToolFinished { .. } => "tool_finish",
        MapEvent::ToolEscaped { .. } => "tool_escape",
        MapEvent::Redrawn => "redrawn",
        MapEvent::FrameDropped => "dropped",
        MapEvent::Resized { .. } => "resized",
    }
}

fn display() -> MapDisplay<PixelBackend> {
    MapDisplay::new(
        PixelBackend::default(),
        MapDisplayConfig::new(PixelSize::new(800, 400)),
    )
    .expect("display init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut display = display();
    let events = Rc::new(RefCell::new(Vec::new()));
    display
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    display.replace_map_model(&Roads, None).expect("attach");
    display.redraw(&Roads).expect("redraw");
    display.start_tool(&Roads, ToolKind::NewCenter).expect("start");
    display.escape_tool(&Roads).expect("escape");
    display.zoom_in(&Roads, 0.2).expect("zoom");
    display.back(&Roads).expect("back");
    display
        .resize(&Roads, PixelSize::new(400, 400))
        .expect("resize");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "redrawn",
            "extent",
            "history",
            "redrawn",
            "tool_start",
            "tool_escape",
            "redrawn",
            "extent",
            "history",
            "redrawn",
            "extent",
            "resized",
            "redrawn",
            "extent",
        ]
    );

    let (last_event, last_context) = events.last().copied().expect("events");
    let MapEvent::ExtentChanged { extent, scale } = last_event else {
        panic!("last event should be an extent change");
    };
    assert_eq!(last_context.extent, Some(extent));
    assert_eq!(last_context.scale, Some(scale));
    assert_eq!(last_context.size, PixelSize::new(400, 400));
    assert_eq!(last_context.history_len, 2);
    assert_eq!(last_context.history_cursor, Some(0));
}

#[test]
fn history_event_reports_new_length() {
    let mut display = display();
    let events = Rc::new(RefCell::new(Vec::new()));
    display
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    display.replace_map_model(&Roads, None).expect("attach");
    display.zoom_in(&Roads, 0.2).expect("zoom");

    let appended: Vec<MapEvent> = events
        .borrow()
        .iter()
        .map(|(event, _)| *event)
        .filter(|event| matches!(event, MapEvent::HistoryAppended { .. }))
        .collect();
    assert_eq!(
        appended,
        vec![
            MapEvent::HistoryAppended { len: 1, cursor: 0 },
            MapEvent::HistoryAppended { len: 2, cursor: 1 },
        ]
    );
}

#[test]
fn plugins_are_notified_in_registration_order() {
    let mut display = display();
    let log = Rc::new(RefCell::new(Vec::new()));

    struct Tagged {
        id: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl MapPlugin for Tagged {
        fn id(&self) -> &str {
            self.id
        }

        fn on_event(&mut self, _event: MapEvent, _context: MapPluginContext) {
            self.log.borrow_mut().push(self.id);
        }
    }

    for id in ["b", "a", "c"] {
        display
            .register_plugin(Box::new(Tagged {
                id,
                log: log.clone(),
            }))
            .expect("register");
    }
    display.redraw(&Roads).expect("redraw");

    assert_eq!(*log.borrow(), vec!["b", "a", "c"]);
}

#[test]
fn plugin_registration_rules() {
    let mut display = display();
    let events = Rc::new(RefCell::new(Vec::new()));

    display
        .register_plugin(Box::new(RecordingPlugin::new("p1", events.clone())))
        .expect("register p1");
    assert!(display.has_plugin("p1"));
    assert_eq!(display.plugin_count(), 1);

    let duplicate = display.register_plugin(Box::new(RecordingPlugin::new("p1", events.clone())));
    assert!(matches!(duplicate, Err(MapError::InvalidData(_))));

    let empty = display.register_plugin(Box::new(RecordingPlugin::new("", events.clone())));
    assert!(matches!(empty, Err(MapError::InvalidData(_))));

    assert!(display.unregister_plugin("p1"));
    assert!(!display.unregister_plugin("p1"));
    assert_eq!(display.plugin_count(), 0);

    display.redraw(&Roads).expect("redraw");
    assert!(events.borrow().is_empty());
}
