//! # HomePlan Editor
//!
//! This crate provides the interactive floor-plan editing core: an
//! in-memory scene of rooms, furniture, doors, windows, markers, and
//! polygon rooms, with selection, dragging, resizing, snapping, and
//! deterministic raster rendering.
//!
//! ## Core Components
//!
//! - **Scene**: the ordered object list (insertion order is z-order)
//!   and per-object geometry/style attributes
//! - **Snapping**: grid snapping plus wall-aware door/window placement
//!   against polygon-room edges
//! - **Interaction**: pointer/keyboard event interpretation (select,
//!   drag-move, drag-resize, nudge, rotate, polygon drawing)
//! - **Renderer**: full redraw of the scene to an RGB image buffer
//! - **Serialization**: whole-plan JSON export/import
//!
//! ## Architecture
//!
//! ```text
//! FloorPlanEditor (instance handle, one scene per instance)
//!   ├── Scene (objects + selection)
//!   ├── EditorState (snap/measure/heatmap/layer, drag, polygon session)
//!   ├── Snapping (grid + wall)
//!   └── Renderer (raster output)
//! ```
//!
//! Control flow: raw input events -> editor event methods -> scene
//! mutation (with snapping assistance) -> host re-renders. Everything is
//! synchronous and single-threaded; every transition completes before
//! the next input event is processed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use homeplan_editor::{FloorPlanEditor, EditorOptions};
//!
//! let mut editor = FloorPlanEditor::new(EditorOptions::default());
//! editor.add_room();
//! let image = homeplan_editor::renderer::render(&editor, 800, 600);
//! ```

pub mod editor;
pub mod error;
pub mod font;
pub mod interaction;
pub mod renderer;
pub mod scene;
pub mod serialization;
pub mod snapping;

pub use editor::{
    EditorListener, EditorOptions, EditorState, FloorPlanEditor, GridOptions, Key, NullListener,
    SelectionSummary, ViewTransform,
};
pub use error::{PlanError, PlanResult};
pub use interaction::{handles, hit_handle, resize_with_handle, DragState, PolySession};
pub use renderer::render;
pub use scene::{MarkerObject, ObjectKind, ObjectPatch, PolyRoomObject, RectObject, Scene, SceneObject};
pub use serialization::{export_plan, load_plan, PlanDocument};
pub use snapping::{snap_point, snap_to_wall, snap_value};
