//! Property tests for the resize engine.

use proptest::prelude::*;

use homeplan_core::constants::MIN_OBJECT_SIZE;
use homeplan_core::geometry::Point;
use homeplan_editor::{resize_with_handle, RectObject};

fn arb_rect() -> impl Strategy<Value = RectObject> {
    (
        -500.0..500.0f64,
        -500.0..500.0f64,
        10.0..400.0f64,
        10.0..400.0f64,
        -360.0..360.0f64,
    )
        .prop_map(|(x, y, w, h, angle)| RectObject {
            x,
            y,
            w,
            h,
            angle,
            ..Default::default()
        })
}

proptest! {
    /// No drag can shrink an object below the minimum size.
    #[test]
    fn resize_never_collapses_dimensions(
        mut rect in arb_rect(),
        handle in 0usize..8,
        px in -1000.0..1000.0f64,
        py in -1000.0..1000.0f64,
        snap in any::<bool>(),
    ) {
        resize_with_handle(&mut rect, handle, Point::new(px, py), 24.0, snap);
        prop_assert!(rect.w >= MIN_OBJECT_SIZE);
        prop_assert!(rect.h >= MIN_OBJECT_SIZE);
    }

    /// Resizing rewrites geometry but never the rotation angle.
    #[test]
    fn resize_preserves_angle(
        mut rect in arb_rect(),
        handle in 0usize..8,
        px in -1000.0..1000.0f64,
        py in -1000.0..1000.0f64,
    ) {
        let angle = rect.angle;
        resize_with_handle(&mut rect, handle, Point::new(px, py), 24.0, true);
        prop_assert_eq!(rect.angle, angle);
    }

    /// Width and height are always non-negative after normalization,
    /// even when a handle is dragged past the opposite edge.
    #[test]
    fn resize_normalizes_crossed_edges(
        mut rect in arb_rect(),
        handle in 0usize..8,
    ) {
        // Aim far past the opposite corner.
        let target = Point::new(rect.x - 2000.0, rect.y - 2000.0);
        resize_with_handle(&mut rect, handle, target, 24.0, false);
        prop_assert!(rect.w > 0.0);
        prop_assert!(rect.h > 0.0);
    }

    /// Handles out of range leave the object untouched.
    #[test]
    fn resize_out_of_range_handle_is_noop(
        mut rect in arb_rect(),
        handle in 8usize..64,
        px in -1000.0..1000.0f64,
        py in -1000.0..1000.0f64,
    ) {
        let before = rect.clone();
        resize_with_handle(&mut rect, handle, Point::new(px, py), 24.0, true);
        prop_assert_eq!(rect, before);
    }
}
