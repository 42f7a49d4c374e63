//! Integration tests for plan export/import across every object kind.

use homeplan_core::geometry::Point;
use homeplan_core::units::UnitSystem;
use homeplan_editor::{
    export_plan, load_plan, EditorOptions, FloorPlanEditor, ObjectPatch, SceneObject,
};

/// Builds a plan exercising all seven object kinds plus non-default
/// options.
fn populated_editor() -> FloorPlanEditor {
    let mut editor = FloorPlanEditor::new(EditorOptions::default());
    editor.set_units(UnitSystem::Metric);

    editor.add_room();
    editor.add_furniture();
    editor.add_custom();
    editor.add_door();
    editor.add_window();
    editor.add_marker("wifi");

    editor.start_poly_room();
    editor.click(Point::new(240.0, 240.0));
    editor.click(Point::new(336.0, 240.0));
    editor.click(Point::new(336.0, 336.0));
    editor.finish_poly_room();

    // Tweak one object so defaults are not all we round-trip.
    editor.scene_mut().set_selected(Some(0));
    editor.update_selected(&ObjectPatch {
        name: Some("Living Room".to_string()),
        angle: Some(15.0),
        ..Default::default()
    });

    editor
}

#[test]
fn test_full_plan_round_trip() {
    let editor = populated_editor();
    let json = export_plan(&editor).unwrap();

    let mut restored = FloorPlanEditor::default();
    load_plan(&mut restored, &json);

    assert_eq!(restored.scene().objects(), editor.scene().objects());
    assert_eq!(restored.options(), editor.options());
}

#[test]
fn test_exported_objects_carry_type_tags() {
    let editor = populated_editor();
    let json = export_plan(&editor).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let tags: Vec<&str> = value["objects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        tags,
        vec!["room", "furniture", "custom", "door", "window", "marker", "polyroom"]
    );
}

#[test]
fn test_load_replaces_previous_scene() {
    let editor = populated_editor();
    let json = export_plan(&editor).unwrap();

    let mut target = FloorPlanEditor::default();
    target.add_room();
    target.add_room();
    load_plan(&mut target, &json);

    assert_eq!(target.scene().len(), 7);
    assert_eq!(target.scene().selected(), None);
}

#[test]
fn test_load_tolerates_missing_optional_fields() {
    let mut editor = FloorPlanEditor::default();
    load_plan(
        &mut editor,
        r#"{"objects": [{"type": "room"}, {"type": "marker", "kind": "camera"}]}"#,
    );

    assert_eq!(editor.scene().len(), 2);
    match editor.scene().get(0).unwrap() {
        SceneObject::Room(r) => {
            assert_eq!(r.w, 0.0);
            assert_eq!(r.angle, 0.0);
        }
        other => panic!("expected room, got {other:?}"),
    }
}

#[test]
fn test_malformed_documents_do_not_clobber_the_scene() {
    let mut editor = populated_editor();

    for bad in [
        "",
        "null",
        "[1, 2, 3]",
        "{}",
        r#"{"objects": {}}"#,
        r#"{"objects": [{"type": "room", "x": "not a number"}]}"#,
    ] {
        load_plan(&mut editor, bad);
        assert_eq!(editor.scene().len(), 7, "input {bad:?} must be ignored");
    }
}

#[test]
fn test_options_default_when_absent() {
    let mut editor = FloorPlanEditor::default();
    editor.set_units(UnitSystem::Metric);

    load_plan(&mut editor, r#"{"objects": []}"#);
    assert_eq!(editor.options().units, UnitSystem::Imperial);
    assert_eq!(editor.options().grid.size, 24.0);
}
