//! Drawing zones through the editor: clicks, guides, auto-close, double-click
//! and the mode toggles.

use zonekit_designer::{
    EditableShape, EditorOptions, ImageScale, InMemoryCanvas, InMemoryMap, Mode, MouseButton,
    RenderingSurface, ZoneEditor,
};
use zonekit_core::{Point, PolygonId};

fn editor(scale: ImageScale) -> ZoneEditor<InMemoryCanvas, InMemoryMap> {
    ZoneEditor::new(
        InMemoryCanvas::default(),
        InMemoryMap::new(),
        scale,
        EditorOptions::default(),
    )
}

#[test]
fn test_four_clicks_finalize_a_triangle() {
    let mut editor = editor(ImageScale::new(0.5, 0.5).unwrap());
    editor.command_add();
    assert_eq!(editor.mode(), Mode::AddingPolygon);
    assert!(!editor.surface().selection_enabled());

    for (x, y) in [(10.0, 10.0), (100.0, 10.0), (100.0, 100.0), (10.0, 100.0)] {
        editor.pointer_down(Point::new(x, y));
    }

    assert_eq!(editor.mode(), Mode::Waiting);
    assert_eq!(editor.store().len(), 1);
    assert_eq!(editor.surface().shape_count(), 1);
    assert_eq!(editor.surface().guide_count(), 0);
    assert!(editor.surface().selection_enabled());

    let feature = editor.store().iter().next().unwrap();
    assert!(feature.id.is_uuid_v4(), "generated id: {}", feature.id);
    assert_eq!(
        feature.properties.coordinates,
        vec![[20.0, 20.0], [200.0, 20.0], [200.0, 200.0]]
    );
    assert_eq!(feature.properties.road_lane_direction, -1);
    assert_eq!(feature.properties.color_rgb.len(), 3);

    let shape = editor.surface().shape(&feature.id).unwrap();
    assert_eq!(shape.vertex_count(), 3);
    assert_eq!(shape.stroke_width(), 3.0);
    assert!(!shape.is_editing());
}

#[test]
fn test_clicks_are_relative_to_canvas_offset() {
    let canvas = InMemoryCanvas::default().with_offset(Point::new(100.0, 50.0));
    let mut editor = ZoneEditor::new(
        canvas,
        InMemoryMap::new(),
        ImageScale::identity(),
        EditorOptions::default(),
    );
    editor.command_add();
    for (x, y) in [(110.0, 60.0), (200.0, 60.0), (200.0, 150.0), (110.0, 150.0)] {
        editor.pointer_down(Point::new(x, y));
    }
    let feature = editor.store().iter().next().unwrap();
    assert_eq!(feature.properties.coordinates[0], [10.0, 10.0]);
    assert_eq!(feature.properties.coordinates[2], [100.0, 100.0]);
}

#[test]
fn test_guides_follow_the_pointer() {
    let mut editor = editor(ImageScale::identity());
    editor.command_add();
    editor.pointer_move(Point::new(3.0, 3.0));
    assert_eq!(editor.surface().guide_count(), 0);

    editor.pointer_down(Point::new(10.0, 10.0));
    editor.pointer_move(Point::new(40.0, 50.0));
    let guide_id = editor.interaction().guides()[0];
    let guide = editor.surface().guide(guide_id).unwrap();
    assert_eq!(guide.start, Point::new(10.0, 10.0));
    assert_eq!(guide.end, Point::new(40.0, 50.0));
    assert_eq!(guide.stroke, "purple");

    // the next click pins the previous guide and starts a new one
    editor.pointer_down(Point::new(60.0, 10.0));
    let guide = editor.surface().guide(guide_id).unwrap();
    assert_eq!(guide.end, Point::new(60.0, 10.0));
    assert_eq!(editor.surface().guide_count(), 2);
}

#[test]
fn test_double_click_finalizes_in_edit_mode() {
    let mut editor = ZoneEditor::new(
        InMemoryCanvas::default(),
        InMemoryMap::new(),
        ImageScale::identity(),
        EditorOptions {
            rules: zonekit_designer::DrawingRules {
                auto_close_clicks: 8,
            },
            ..EditorOptions::default()
        },
    );
    editor.command_add();
    for (x, y) in [(0.0, 0.0), (80.0, 0.0), (80.0, 60.0), (30.0, 90.0), (30.0, 90.0)] {
        editor.pointer_down(Point::new(x, y));
    }
    editor.double_click();

    assert_eq!(editor.mode(), Mode::EditingPolygon);
    assert_eq!(editor.surface().guide_count(), 0);
    let id = editor.interaction().editing().cloned().unwrap();
    let shape = editor.surface().shape(&id).unwrap();
    assert_eq!(shape.vertex_count(), 4);
    assert!(shape.is_editing());
    assert_eq!(shape.vertex_controls().map(<[_]>::len), Some(4));
    assert_eq!(editor.surface().active_shape(), Some(&id));
    assert_eq!(editor.store().get(&id).unwrap().properties.coordinates.len(), 4);
}

#[test]
fn test_add_toggle_is_involutive() {
    let mut editor = editor(ImageScale::identity());
    editor.command_add();
    editor.pointer_down(Point::new(5.0, 5.0));
    editor.command_add();

    assert_eq!(editor.mode(), Mode::Waiting);
    assert!(editor.interaction().draw_buffer().is_empty());
    assert_eq!(editor.surface().guide_count(), 0);
    assert!(editor.store().is_empty());
    assert!(editor.surface().selection_enabled());
}

#[test]
fn test_delete_toggle_is_involutive() {
    let mut editor = editor(ImageScale::identity());
    editor.command_delete();
    assert_eq!(editor.mode(), Mode::DeletingPolygon);
    editor.command_delete();
    assert_eq!(editor.mode(), Mode::Waiting);
}

#[test]
fn test_clicks_outside_add_mode_draw_nothing() {
    let mut editor = editor(ImageScale::identity());
    for (x, y) in [(10.0, 10.0), (100.0, 10.0), (100.0, 100.0), (10.0, 100.0)] {
        editor.click(Point::new(x, y), MouseButton::Primary);
    }
    assert!(editor.store().is_empty());
    assert_eq!(editor.mode(), Mode::Waiting);
}

#[test]
fn test_unknown_shape_events_are_ignored() {
    let mut editor = editor(ImageScale::identity());
    editor.command_delete();
    editor.selection_changed(&PolygonId::from("ghost"));
    editor.shape_pointer_down(&PolygonId::from("ghost"), MouseButton::Secondary);
    assert_eq!(editor.mode(), Mode::DeletingPolygon);
}

#[test]
fn test_zoomed_canvas_stores_scene_coordinates() {
    let mut canvas = InMemoryCanvas::default();
    canvas.viewport_mut().set_zoom(2.0);
    let mut editor = ZoneEditor::new(
        canvas,
        InMemoryMap::new(),
        ImageScale::identity(),
        EditorOptions::default(),
    );
    editor.command_add();
    for (x, y) in [(20.0, 20.0), (200.0, 20.0), (200.0, 200.0), (20.0, 200.0)] {
        editor.pointer_down(Point::new(x, y));
    }
    let feature = editor.store().iter().next().unwrap();
    assert_eq!(
        feature.properties.coordinates,
        vec![[10.0, 10.0], [100.0, 10.0], [100.0, 100.0]]
    );
}
