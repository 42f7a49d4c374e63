//! Integration tests for wall-aware door/window placement while
//! dragging and after keyboard nudges.

use homeplan_core::geometry::Point;
use homeplan_editor::{FloorPlanEditor, Key, SceneObject};

/// Builds an editor holding one square polygon room from (240, 240) to
/// (432, 432). The corners are grid multiples so session clicks land
/// exactly where given.
fn editor_with_square_room() -> FloorPlanEditor {
    let mut editor = FloorPlanEditor::default();
    editor.start_poly_room();
    editor.click(Point::new(240.0, 240.0));
    editor.click(Point::new(432.0, 240.0));
    editor.click(Point::new(432.0, 432.0));
    editor.click(Point::new(240.0, 432.0));
    let index = editor.finish_poly_room();
    assert_eq!(index, Some(0));
    editor
}

fn door_rect(editor: &FloorPlanEditor, index: usize) -> &homeplan_editor::RectObject {
    editor.scene().get(index).unwrap().as_rect().unwrap()
}

#[test]
fn test_door_drag_snaps_onto_nearest_wall() {
    let mut editor = editor_with_square_room();
    let door = editor.add_door();

    // Doors spawn at (50, 50) 40x10; select via center.
    editor.click(Point::new(70.0, 55.0));
    assert_eq!(editor.scene().selected(), Some(door));

    // Grab away from the resize handles, then drag near the top wall
    // y=240.
    editor.pointer_down(Point::new(60.0, 55.0));
    editor.pointer_move(Point::new(340.0, 225.0));

    let r = door_rect(&editor, door);
    // Seated on the wall: centered on the projection, offset half the
    // thickness along the wall normal, aligned to the wall direction.
    assert!((r.angle - 0.0).abs() < 1e-9);
    let center = r.center();
    assert!((center.x - 350.0).abs() < 1e-9);
    assert!((center.y - 245.0).abs() < 1e-9);
}

#[test]
fn test_window_aligns_with_vertical_wall() {
    let mut editor = editor_with_square_room();
    let window = editor.add_window();

    // Windows spawn at (70, 70) 60x8.
    editor.click(Point::new(100.0, 74.0));
    assert_eq!(editor.scene().selected(), Some(window));

    // Drag near the right wall x=432 (edge direction is +y).
    editor.pointer_down(Point::new(85.0, 74.0));
    editor.pointer_move(Point::new(430.0, 340.0));

    let r = door_rect(&editor, window);
    assert!((r.angle - 90.0).abs() < 1e-9);
    let center = r.center();
    // Normal for a downward edge points in -x: seated just inside.
    assert!((center.x - 428.0).abs() < 1e-9);
    assert!((center.y - 340.0).abs() < 1e-9);
}

#[test]
fn test_door_far_from_walls_falls_back_to_grid() {
    let mut editor = editor_with_square_room();
    let door = editor.add_door();
    editor.click(Point::new(70.0, 55.0));

    // Nowhere near a wall: more than 40 units from every edge.
    editor.pointer_down(Point::new(60.0, 55.0));
    editor.pointer_move(Point::new(100.0, 105.0));

    let r = door_rect(&editor, door);
    assert_eq!(r.angle, 0.0);
    // Grid-snapped like any other object.
    assert_eq!(r.x % 24.0, 0.0);
    assert_eq!(r.y % 24.0, 0.0);
}

#[test]
fn test_door_without_any_poly_room_uses_grid() {
    let mut editor = FloorPlanEditor::default();
    let door = editor.add_door();
    editor.click(Point::new(70.0, 55.0));

    editor.pointer_down(Point::new(60.0, 55.0));
    editor.pointer_move(Point::new(130.0, 130.0));

    let r = door_rect(&editor, door);
    assert_eq!(r.x % 24.0, 0.0);
    assert_eq!(r.y % 24.0, 0.0);
}

#[test]
fn test_keyboard_nudge_resnaps_door() {
    let mut editor = editor_with_square_room();
    let door = editor.add_door();
    editor.click(Point::new(70.0, 55.0));

    // Seat the door on the top wall first.
    editor.pointer_down(Point::new(60.0, 55.0));
    editor.pointer_move(Point::new(340.0, 230.0));
    editor.pointer_up();

    // Nudging along the wall keeps it seated: the re-snap projects the
    // shifted center back onto the wall line.
    editor.key_down(Key::ArrowRight, true);
    let r = door_rect(&editor, door);
    let center = r.center();
    assert!((center.y - 245.0).abs() < 1e-9);
    assert!((center.x - 374.0).abs() < 1e-9);
}

#[test]
fn test_furniture_is_not_wall_snapped() {
    let mut editor = editor_with_square_room();
    let sofa = editor.add_furniture();
    editor.click(Point::new(100.0, 100.0));
    assert_eq!(editor.scene().selected(), Some(sofa));

    editor.pointer_down(Point::new(100.0, 100.0));
    editor.pointer_move(Point::new(360.0, 245.0));

    match editor.scene().get(sofa).unwrap() {
        SceneObject::Furniture(r) => {
            // Plain grid snapping, no rotation.
            assert_eq!(r.angle, 0.0);
            assert_eq!(r.x % 24.0, 0.0);
        }
        other => panic!("expected furniture, got {other:?}"),
    }
}
