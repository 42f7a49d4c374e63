//! Snapping engine: grid snapping and wall-aware door/window placement.

use homeplan_core::constants::WALL_SNAP_THRESHOLD;
use homeplan_core::geometry::{distance, project_point_on_segment, Point};

use crate::scene::{RectObject, SceneObject};

/// Rounds a value to the nearest multiple of `grid`.
pub fn snap_value(v: f64, grid: f64) -> f64 {
    (v / grid).round() * grid
}

/// Snaps a point to the grid when snapping is enabled, else identity.
pub fn snap_point(p: Point, grid: f64, enabled: bool) -> Point {
    if !enabled {
        return p;
    }
    Point::new(snap_value(p.x, grid), snap_value(p.y, grid))
}

/// Snaps a door/window onto the nearest poly-room wall.
///
/// Projects the object's center onto every poly-room edge (consecutive
/// vertex pairs, wrapping last to first) and keeps the globally closest
/// projection; the first closest wins on ties (strict `<`). A closest
/// distance over `threshold` rejects the snap and leaves the object
/// untouched, so the caller can fall back to grid snapping.
///
/// On accept the object is rotated to the edge's direction and
/// re-centered on the projected point offset along the +90-degree
/// normal by half the object's height, seating it on the wall line.
/// The offset side is a fixed convention, not adaptive to the approach
/// direction.
pub fn snap_to_wall(rect: &mut RectObject, objects: &[SceneObject], threshold: f64) -> bool {
    let center = rect.center();

    let mut best: Option<(f64, Point, Point, Point)> = None;
    for object in objects {
        let SceneObject::PolyRoom(poly) = object else {
            continue;
        };
        let pts = &poly.points;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            let proj = project_point_on_segment(center, a, b);
            let d = distance(center, proj);
            if best.as_ref().is_none_or(|(bd, _, _, _)| d < *bd) {
                best = Some((d, proj, a, b));
            }
        }
    }

    let Some((d, proj, a, b)) = best else {
        return false;
    };
    if d > threshold {
        return false;
    }

    let angle = (b.y - a.y).atan2(b.x - a.x);
    let nx = -angle.sin();
    let ny = angle.cos();
    let offset = rect.h / 2.0;
    let cx = proj.x + nx * offset;
    let cy = proj.y + ny * offset;
    rect.x = cx - rect.w / 2.0;
    rect.y = cy - rect.h / 2.0;
    rect.angle = angle.to_degrees();
    true
}

/// [`snap_to_wall`] with the default threshold.
pub fn snap_to_wall_default(rect: &mut RectObject, objects: &[SceneObject]) -> bool {
    snap_to_wall(rect, objects, WALL_SNAP_THRESHOLD)
}
