//! Interaction primitives: drag state, resize handles, and the polygon
//! drawing session.
//!
//! The editor interprets pointer/keyboard events with these types; every
//! transition is synchronous and completes before the next event is
//! processed. A drag or polygon session left open simply waits for the
//! next relevant event.

use homeplan_core::constants::{HANDLE_HIT_RADIUS, MIN_OBJECT_SIZE};
use homeplan_core::geometry::{rotated_bounding_box, Point, Rect};

use crate::scene::RectObject;
use crate::snapping::snap_value;

/// Active drag, entered on pointer-down over the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// Moving the object; `dx`/`dy` is the grab offset between the
    /// pointer and the object origin (zero for markers, which move by
    /// absolute pointer position).
    Move { dx: f64, dy: f64 },
    /// Resizing via one of the eight handles (see [`handles`]).
    Resize { handle: usize },
}

/// In-progress polygon room. Points accumulate per click; `cursor`
/// tracks the pointer for the live preview segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolySession {
    pub points: Vec<Point>,
    pub cursor: Option<Point>,
}

/// The eight resize handle positions on a bounding box, in fixed order:
/// top-left, top-mid, top-right, mid-left, mid-right, bottom-left,
/// bottom-mid, bottom-right. Resize math is keyed to these indices.
pub fn handles(bbox: Rect) -> [Point; 8] {
    let Rect { x, y, w, h } = bbox;
    [
        Point::new(x, y),
        Point::new(x + w / 2.0, y),
        Point::new(x + w, y),
        Point::new(x, y + h / 2.0),
        Point::new(x + w, y + h / 2.0),
        Point::new(x, y + h),
        Point::new(x + w / 2.0, y + h),
        Point::new(x + w, y + h),
    ]
}

/// Returns the index of the handle within grabbing distance of `p`
/// (Chebyshev radius [`HANDLE_HIT_RADIUS`]); first match wins.
pub fn hit_handle(bbox: Rect, p: Point) -> Option<usize> {
    handles(bbox)
        .iter()
        .position(|h| (p.x - h.x).abs() <= HANDLE_HIT_RADIUS && (p.y - h.y).abs() <= HANDLE_HIT_RADIUS)
}

/// Applies a resize drag to a rectangular object.
///
/// The dragged handle's position is grid-snapped when snapping is on,
/// the edges of the current (rotated) bounding box are rebuilt around
/// it, min/max are normalized so dimensions stay non-negative, and each
/// dimension is clamped to [`MIN_OBJECT_SIZE`]. The result is written to
/// the unrotated `x, y, w, h`; the rotation angle is not re-derived
/// during resize. That approximation is accepted behavior.
pub fn resize_with_handle(
    rect: &mut RectObject,
    handle: usize,
    p: Point,
    grid: f64,
    snap_enabled: bool,
) {
    let snap = |v: f64| if snap_enabled { snap_value(v, grid) } else { v };
    let nx = snap(p.x);
    let ny = snap(p.y);

    let bbox = rotated_bounding_box(rect.rect(), rect.angle);
    let (left, top) = (bbox.x, bbox.y);
    let (right, bottom) = (bbox.x + bbox.w, bbox.y + bbox.h);

    let (mut nleft, mut ntop, mut nright, mut nbottom) = (left, top, right, bottom);
    match handle {
        0 => {
            nleft = nx;
            ntop = ny;
        }
        1 => ntop = ny,
        2 => {
            nright = nx;
            ntop = ny;
        }
        3 => nleft = nx,
        4 => nright = nx,
        5 => {
            nleft = nx;
            nbottom = ny;
        }
        6 => nbottom = ny,
        7 => {
            nright = nx;
            nbottom = ny;
        }
        _ => return,
    }

    rect.w = (nright - nleft).max(MIN_OBJECT_SIZE);
    rect.h = (nbottom - ntop).max(MIN_OBJECT_SIZE);
    rect.x = nleft.min(nright);
    rect.y = ntop.min(nbottom);
}
