//! Geometry primitives for the floor-plan editor.
//!
//! Points and rectangles live in scene space (pixels, +Y down, matching
//! the drawing surface). Rotation helpers work in radians; object angles
//! elsewhere in the workspace are stored in degrees and converted at the
//! trigonometry boundary.

use serde::{Deserialize, Serialize};

/// A point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the center of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Inclusive containment test against the unrotated rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// The four corners in top-left, top-right, bottom-left, bottom-right order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.w, self.y),
            Point::new(self.x, self.y + self.h),
            Point::new(self.x + self.w, self.y + self.h),
        ]
    }
}

/// Rotates `p` about `center` by `angle_rad` radians.
pub fn rotate_point(p: Point, center: Point, angle_rad: f64) -> Point {
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    let (sin, cos) = angle_rad.sin_cos();
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Euclidean distance between two points.
pub fn distance(p: Point, q: Point) -> f64 {
    let dx = q.x - p.x;
    let dy = q.y - p.y;
    (dx * dx + dy * dy).sqrt()
}

/// Axis-aligned bounding box of `rect` rotated by `angle_deg` degrees
/// about its own center.
///
/// For a zero angle the input rectangle is returned unchanged (exact,
/// no floating-point round trip). Selection outlines and resize handles
/// must use this envelope rather than the raw rectangle so rotated
/// objects still present correct handles.
pub fn rotated_bounding_box(rect: Rect, angle_deg: f64) -> Rect {
    let angle_rad = (angle_deg % 360.0).to_radians();
    if angle_rad == 0.0 {
        return rect;
    }
    let center = rect.center();
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for corner in rect.corners() {
        let p = rotate_point(corner, center, angle_rad);
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Projects `p` onto the segment `a`..`b`, clamping the projection
/// parameter to [0, 1]. A degenerate segment (`a == b`) returns `a`.
pub fn project_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let ab2 = abx * abx + aby * aby;
    if ab2 == 0.0 {
        return a;
    }
    let apx = p.x - a.x;
    let apy = p.y - a.y;
    let t = ((apx * abx + apy * aby) / ab2).clamp(0.0, 1.0);
    Point::new(a.x + abx * t, a.y + aby * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_rotate_point_quarter_turn() {
        let center = Point::new(0.0, 0.0);
        let p = rotate_point(Point::new(1.0, 0.0), center, std::f64::consts::FRAC_PI_2);
        assert_close(p.x, 0.0);
        assert_close(p.y, 1.0);
    }

    #[test]
    fn test_rotate_point_about_offset_center() {
        let center = Point::new(10.0, 10.0);
        let p = rotate_point(Point::new(12.0, 10.0), center, std::f64::consts::PI);
        assert_close(p.x, 8.0);
        assert_close(p.y, 10.0);
    }

    #[test]
    fn test_bounding_box_unrotated_is_identity() {
        let rect = Rect::new(5.0, 7.0, 30.0, 20.0);
        assert_eq!(rotated_bounding_box(rect, 0.0), rect);
        assert_eq!(rotated_bounding_box(rect, 360.0), rect);
    }

    #[test]
    fn test_bounding_box_quarter_turn_swaps_dimensions() {
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        let bbox = rotated_bounding_box(rect, 90.0);
        assert_close(bbox.w, 20.0);
        assert_close(bbox.h, 40.0);
        // Center is preserved under rotation about the center.
        assert_close(bbox.center().x, rect.center().x);
        assert_close(bbox.center().y, rect.center().y);
    }

    #[test]
    fn test_bounding_box_diagonal_grows() {
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        let bbox = rotated_bounding_box(rect, 45.0);
        assert!(bbox.w > rect.w);
        assert!(bbox.h > rect.h);
    }

    #[test]
    fn test_projection_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let before = project_point_on_segment(Point::new(-5.0, 3.0), a, b);
        assert_eq!(before, a);
        let after = project_point_on_segment(Point::new(15.0, 3.0), a, b);
        assert_eq!(after, b);
    }

    #[test]
    fn test_projection_interior() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let p = project_point_on_segment(Point::new(4.0, 9.0), a, b);
        assert_close(p.x, 4.0);
        assert_close(p.y, 0.0);
    }

    #[test]
    fn test_projection_degenerate_segment() {
        let a = Point::new(3.0, 3.0);
        let p = project_point_on_segment(Point::new(9.0, 9.0), a, a);
        assert_eq!(p, a);
    }

    #[test]
    fn test_distance() {
        assert_close(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(10.1, 10.0)));
    }
}
