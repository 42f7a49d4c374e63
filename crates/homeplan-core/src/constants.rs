//! Shared constants for the floor-plan editor.
//!
//! Scene units are pixels; one grid cell is [`GRID_SIZE`] units.

/// Default grid spacing in scene units.
pub const GRID_SIZE: f64 = 24.0;

/// Minimum width/height of a rectangular object after any resize.
pub const MIN_OBJECT_SIZE: f64 = 10.0;

/// Maximum distance from a door/window center to a poly-room wall
/// for wall snapping to engage.
pub const WALL_SNAP_THRESHOLD: f64 = 40.0;

/// Chebyshev radius around a resize handle that counts as a handle grab.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;

/// Side length of a drawn resize handle.
pub const HANDLE_DRAW_SIZE: f64 = 6.0;

/// Radius of a drawn marker dot.
pub const MARKER_RADIUS: f64 = 6.0;

/// Squared hit-test radius for markers (within 10 units).
pub const MARKER_HIT_RADIUS_SQ: f64 = 100.0;

/// Radius of the selection ring drawn around a selected marker.
pub const SELECTED_MARKER_RING_RADIUS: f64 = 10.0;

/// Radius of the radial heat gradient drawn around wifi markers.
pub const HEATMAP_RADIUS: f64 = 120.0;

/// Rotation step applied per keyboard rotate event, in degrees.
pub const ROTATE_STEP_DEG: f64 = 5.0;

/// Minimum number of committed points for a polygon session to produce
/// a poly room.
pub const MIN_POLY_POINTS: usize = 3;
