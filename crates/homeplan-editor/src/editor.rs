//! Floor-plan editor instance: options, interaction state, and host
//! notifications.
//!
//! Each editor instance is an explicit handle owned by the host; there
//! is no process-wide registry of live editors. The host feeds raw
//! pointer/keyboard events into the instance and re-renders after each
//! mutation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use homeplan_core::constants::{GRID_SIZE, MIN_POLY_POINTS, ROTATE_STEP_DEG, WALL_SNAP_THRESHOLD};
use homeplan_core::geometry::{rotated_bounding_box, Point};
use homeplan_core::units::{format_measure, UnitSystem};

use crate::interaction::{hit_handle, resize_with_handle, DragState, PolySession};
use crate::scene::{ObjectKind, ObjectPatch, Scene, SceneObject};
use crate::snapping::{snap_point, snap_to_wall, snap_value};

/// Grid display options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub size: f64,
    pub color: String,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            color: "#eee".to_string(),
        }
    }
}

/// Editor configuration, carried inside exported plans under `options`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub grid: GridOptions,
    pub units: UnitSystem,
}

/// Pan/zoom transform from screen (host pixel) space to scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTransform {
    pub scale: f64,
    pub ox: f64,
    pub oy: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            ox: 0.0,
            oy: 0.0,
        }
    }
}

impl ViewTransform {
    /// Converts a screen position to scene coordinates.
    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new((p.x - self.ox) / self.scale, (p.y - self.oy) / self.scale)
    }

    /// Converts a scene position to screen coordinates.
    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.ox, p.y * self.scale + self.oy)
    }
}

/// Per-instance interaction state.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub snap: bool,
    pub measure: bool,
    pub heatmap: bool,
    pub layer: String,
    pub drag: Option<DragState>,
    pub poly: Option<PolySession>,
    pub view: ViewTransform,
}

impl EditorState {
    fn new() -> Self {
        Self {
            snap: true,
            layer: "All".to_string(),
            ..Default::default()
        }
    }
}

/// Serializable summary of the selected object, sent to the host after
/// selection-affecting interactions. Size fields are zero for variants
/// without rectangular geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub layer: String,
}

/// Host notifications fired by the editor.
///
/// `on_selection_changed` fires after selection changes from any
/// interaction (select, drag release, keyboard nudge/rotate);
/// `on_measure_changed` fires continuously while measurement mode is
/// active.
pub trait EditorListener {
    fn on_selection_changed(&mut self, _summary: Option<&SelectionSummary>) {}
    fn on_measure_changed(&mut self, _text: &str) {}
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl EditorListener for NullListener {}

/// Keyboard inputs the editor interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// `R`: rotate the selection +5 degrees.
    RotateCw,
    /// `E`: rotate the selection -5 degrees.
    RotateCcw,
}

/// An interactive floor-plan editor holding exactly one scene.
pub struct FloorPlanEditor {
    scene: Scene,
    options: EditorOptions,
    state: EditorState,
    listener: Box<dyn EditorListener>,
}

impl FloorPlanEditor {
    /// Creates an editor with the given options and a no-op listener.
    pub fn new(options: EditorOptions) -> Self {
        Self::with_listener(options, Box::new(NullListener))
    }

    /// Creates an editor with a host listener.
    pub fn with_listener(options: EditorOptions, listener: Box<dyn EditorListener>) -> Self {
        Self {
            scene: Scene::new(),
            options,
            state: EditorState::new(),
            listener,
        }
    }

    /// Replaces the host listener.
    pub fn set_listener(&mut self, listener: Box<dyn EditorListener>) {
        self.listener = listener;
    }

    /// The scene being edited.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene (plan import replaces it wholesale).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The editor options.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Mutable access to the options (plan import replaces them).
    pub fn options_mut(&mut self) -> &mut EditorOptions {
        &mut self.options
    }

    /// The interaction state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The configured grid spacing.
    pub fn grid_size(&self) -> f64 {
        self.options.grid.size
    }

    /// Sets the measurement system used by the readout.
    pub fn set_units(&mut self, units: UnitSystem) {
        self.options.units = units;
    }

    /// Sets the active layer filter (display-time only).
    pub fn set_layer(&mut self, layer: impl Into<String>) {
        self.state.layer = layer.into();
    }

    /// Toggles grid/wall snapping.
    pub fn toggle_snap(&mut self) {
        self.state.snap = !self.state.snap;
    }

    /// Toggles the wifi heatmap overlay.
    pub fn toggle_heatmap(&mut self) {
        self.state.heatmap = !self.state.heatmap;
    }

    /// Toggles the measurement readout mode.
    pub fn toggle_measure(&mut self) {
        self.state.measure = !self.state.measure;
    }

    /// Sets the pan/zoom view transform.
    pub fn set_view(&mut self, view: ViewTransform) {
        self.state.view = view;
    }

    /// Sets the zoom factor, keeping the current pan offset.
    pub fn set_zoom(&mut self, scale: f64) {
        self.state.view.scale = scale;
    }

    /// Sets the pan offset in screen units.
    pub fn set_pan(&mut self, ox: f64, oy: f64) {
        self.state.view.ox = ox;
        self.state.view.oy = oy;
    }

    /// Converts a host pixel position to scene coordinates.
    pub fn screen_to_world(&self, p: Point) -> Point {
        self.state.view.screen_to_world(p)
    }

    // Object creation. Each variant has fixed default geometry/style.

    pub fn add_room(&mut self) -> usize {
        self.scene.add_room()
    }

    pub fn add_furniture(&mut self) -> usize {
        self.scene.add_furniture()
    }

    pub fn add_custom(&mut self) -> usize {
        self.scene.add_custom()
    }

    pub fn add_door(&mut self) -> usize {
        self.scene.add_door()
    }

    pub fn add_window(&mut self) -> usize {
        self.scene.add_window()
    }

    pub fn add_marker(&mut self, kind: impl Into<String>) -> usize {
        self.scene.add_marker(kind)
    }

    /// Merges a field patch into the current selection (no-op without
    /// one; inapplicable fields are ignored per variant).
    pub fn update_selected(&mut self, patch: &ObjectPatch) {
        if let Some(index) = self.scene.selected() {
            self.scene.update_fields(index, patch);
        }
    }

    /// Deletes the current selection, if any.
    pub fn delete_selected(&mut self) {
        self.scene.delete_selected();
    }

    /// Summary of the current selection for host notifications.
    pub fn selection_summary(&self) -> Option<SelectionSummary> {
        let object = self.scene.selected_object()?;
        let summary = match object {
            SceneObject::Marker(m) => SelectionSummary {
                kind: object.kind(),
                name: m.name.clone(),
                x: m.x,
                y: m.y,
                w: 0.0,
                h: 0.0,
                layer: m.layer.clone(),
            },
            SceneObject::PolyRoom(p) => SelectionSummary {
                kind: object.kind(),
                name: p.name.clone(),
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
                layer: p.layer.clone(),
            },
            SceneObject::Room(r)
            | SceneObject::Furniture(r)
            | SceneObject::Custom(r)
            | SceneObject::Door(r)
            | SceneObject::Window(r) => {
                SelectionSummary {
                    kind: object.kind(),
                    name: r.name.clone(),
                    x: r.x,
                    y: r.y,
                    w: r.w,
                    h: r.h,
                    layer: r.layer.clone(),
                }
            }
        };
        Some(summary)
    }

    fn emit_selection_changed(&mut self) {
        let summary = self.selection_summary();
        self.listener.on_selection_changed(summary.as_ref());
    }

    /// A click in host pixel coordinates.
    ///
    /// During a polygon session the click appends a (possibly
    /// grid-snapped) vertex; otherwise it resolves the selection via the
    /// scene hit test and notifies the host.
    pub fn click(&mut self, screen: Point) {
        let world = self.state.view.screen_to_world(screen);
        if let Some(poly) = &mut self.state.poly {
            let p = snap_point(world, self.options.grid.size, self.state.snap);
            poly.points.push(p);
            debug!(points = poly.points.len(), "polygon vertex added");
            return;
        }
        let hit = self.scene.hit_test(world);
        self.scene.set_selected(hit);
        self.emit_selection_changed();
    }

    /// Pointer-down in host pixel coordinates. Only acts while an
    /// object is selected: within 8 units of a resize handle enters a
    /// resize drag, anywhere else a move drag (markers grab with zero
    /// offset and move by absolute pointer position).
    pub fn pointer_down(&mut self, screen: Point) {
        if self.state.poly.is_some() {
            return;
        }
        let world = self.state.view.screen_to_world(screen);
        let Some(object) = self.scene.selected_object() else {
            return;
        };
        let drag = match object {
            SceneObject::Marker(_) => Some(DragState::Move { dx: 0.0, dy: 0.0 }),
            SceneObject::PolyRoom(_) => None,
            SceneObject::Room(r)
            | SceneObject::Furniture(r)
            | SceneObject::Custom(r)
            | SceneObject::Door(r)
            | SceneObject::Window(r) => {
                let bbox = rotated_bounding_box(r.rect(), r.angle);
                match hit_handle(bbox, world) {
                    Some(handle) => Some(DragState::Resize { handle }),
                    None => Some(DragState::Move {
                        dx: world.x - r.x,
                        dy: world.y - r.y,
                    }),
                }
            }
        };
        self.state.drag = drag;
    }

    /// Pointer-move in host pixel coordinates. Advances the active drag,
    /// updates the polygon preview cursor, or feeds the measurement
    /// readout, in that priority order.
    pub fn pointer_move(&mut self, screen: Point) {
        let world = self.state.view.screen_to_world(screen);
        let grid = self.options.grid.size;
        let snap_enabled = self.state.snap;

        if let Some(drag) = self.state.drag {
            let Some(index) = self.scene.selected() else {
                return;
            };
            match drag {
                DragState::Move { dx, dy } => {
                    self.move_selected_to(index, Point::new(world.x - dx, world.y - dy));
                }
                DragState::Resize { handle } => {
                    if let Some(r) = self
                        .scene
                        .get_mut(index)
                        .and_then(SceneObject::as_rect_mut)
                    {
                        resize_with_handle(r, handle, world, grid, snap_enabled);
                    }
                }
            }
            return;
        }

        if let Some(poly) = &mut self.state.poly {
            poly.cursor = Some(snap_point(world, grid, snap_enabled));
            return;
        }

        if self.state.measure {
            let text = format_measure(world, self.options.units);
            self.listener.on_measure_changed(&text);
        }
    }

    /// Pointer-up: ends any drag and notifies the host of the current
    /// selection.
    pub fn pointer_up(&mut self) {
        if self.state.drag.take().is_some() {
            self.emit_selection_changed();
        }
    }

    /// Keyboard input. Arrows nudge the selection by one unit (one grid
    /// cell with shift); `R`/`E` rotate non-marker objects by +/-5
    /// degrees. Any change re-runs door/window wall snapping and
    /// notifies the host.
    pub fn key_down(&mut self, key: Key, shift: bool) {
        let Some(index) = self.scene.selected() else {
            return;
        };
        let base = if shift { self.options.grid.size } else { 1.0 };
        let changed = match self.scene.get_mut(index) {
            Some(SceneObject::Marker(m)) => match key {
                Key::ArrowLeft => {
                    m.x -= base;
                    true
                }
                Key::ArrowRight => {
                    m.x += base;
                    true
                }
                Key::ArrowUp => {
                    m.y -= base;
                    true
                }
                Key::ArrowDown => {
                    m.y += base;
                    true
                }
                Key::RotateCw | Key::RotateCcw => false,
            },
            Some(SceneObject::PolyRoom(p)) => match key {
                Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => {
                    let (dx, dy) = match key {
                        Key::ArrowLeft => (-base, 0.0),
                        Key::ArrowRight => (base, 0.0),
                        Key::ArrowUp => (0.0, -base),
                        _ => (0.0, base),
                    };
                    for point in &mut p.points {
                        point.x += dx;
                        point.y += dy;
                    }
                    true
                }
                // Polygons carry no angle; rotation is unsupported.
                Key::RotateCw | Key::RotateCcw => false,
            },
            Some(
                SceneObject::Room(r)
                | SceneObject::Furniture(r)
                | SceneObject::Custom(r)
                | SceneObject::Door(r)
                | SceneObject::Window(r),
            ) => {
                match key {
                    Key::ArrowLeft => {
                        r.x -= base;
                        true
                    }
                    Key::ArrowRight => {
                        r.x += base;
                        true
                    }
                    Key::ArrowUp => {
                        r.y -= base;
                        true
                    }
                    Key::ArrowDown => {
                        r.y += base;
                        true
                    }
                    Key::RotateCw => {
                        r.angle += ROTATE_STEP_DEG;
                        true
                    }
                    Key::RotateCcw => {
                        r.angle -= ROTATE_STEP_DEG;
                        true
                    }
                }
            }
            None => false,
        };

        if changed {
            self.resnap_opening(index);
            self.emit_selection_changed();
        }
    }

    /// Starts (or restarts) a polygon drawing session.
    pub fn start_poly_room(&mut self) {
        self.state.poly = Some(PolySession::default());
    }

    /// Finishes the polygon session: commits a poly room when at least
    /// three points were collected, discards otherwise. Returns the new
    /// object's index on commit. A finish without an active session is
    /// a no-op.
    pub fn finish_poly_room(&mut self) -> Option<usize> {
        let session = self.state.poly.take()?;
        if session.points.len() >= MIN_POLY_POINTS {
            Some(self.scene.add_poly_room(session.points))
        } else {
            debug!(points = session.points.len(), "polygon discarded");
            None
        }
    }

    /// Cancels the polygon session unconditionally.
    pub fn cancel_poly_room(&mut self) {
        self.state.poly = None;
    }

    /// Repositions the selected object during a move drag, applying
    /// wall snapping for doors/windows (grid snap only as fallback) and
    /// grid snapping for everything else.
    fn move_selected_to(&mut self, index: usize, pos: Point) {
        let grid = self.options.grid.size;
        let snap_enabled = self.state.snap;
        let Some(object) = self.scene.get_mut(index) else {
            return;
        };
        match object {
            SceneObject::Marker(m) => {
                let p = snap_point(pos, grid, snap_enabled);
                m.x = p.x;
                m.y = p.y;
            }
            SceneObject::PolyRoom(_) => {}
            SceneObject::Room(r) | SceneObject::Furniture(r) | SceneObject::Custom(r) => {
                r.x = pos.x;
                r.y = pos.y;
                if snap_enabled {
                    r.x = snap_value(r.x, grid);
                    r.y = snap_value(r.y, grid);
                }
            }
            SceneObject::Door(r) | SceneObject::Window(r) => {
                // Wall snap first; grid snap only when no wall is in
                // range.
                r.x = pos.x;
                r.y = pos.y;
                let mut snapped = r.clone();
                let wall_hit =
                    snap_to_wall(&mut snapped, self.scene.objects(), WALL_SNAP_THRESHOLD);
                if let Some(r) = self.scene.get_mut(index).and_then(SceneObject::as_rect_mut) {
                    if wall_hit {
                        *r = snapped;
                    } else if snap_enabled {
                        r.x = snap_value(r.x, grid);
                        r.y = snap_value(r.y, grid);
                    }
                }
            }
        }
    }

    /// Re-runs wall snapping for a door/window after keyboard changes.
    fn resnap_opening(&mut self, index: usize) {
        let Some(object) = self.scene.get(index) else {
            return;
        };
        if !object.kind().is_opening() {
            return;
        }
        let Some(rect) = object.as_rect() else {
            return;
        };
        let mut snapped = rect.clone();
        if snap_to_wall(&mut snapped, self.scene.objects(), WALL_SNAP_THRESHOLD) {
            if let Some(r) = self.scene.get_mut(index).and_then(SceneObject::as_rect_mut) {
                *r = snapped;
            }
        }
    }
}

impl Default for FloorPlanEditor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
