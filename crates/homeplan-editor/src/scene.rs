//! Scene model: the ordered object list and per-object attributes.
//!
//! The scene owns its object sequence; insertion order is z-order (later
//! objects draw on top and are hit-tested first). Selection is an index
//! into the sequence and is revalidated across every mutation, so no
//! component ever holds a stale index across a removal.

use serde::{Deserialize, Serialize};
use std::fmt;

use homeplan_core::constants::MARKER_HIT_RADIUS_SQ;
use homeplan_core::geometry::{Point, Rect};

fn default_layer() -> String {
    "All".to_string()
}

/// A rectangular scene object: rooms, furniture, custom shapes, doors,
/// and windows all share this geometry. `angle` is degrees of rotation
/// about the rectangle's own center, accumulated in 5-degree steps and
/// reduced modulo 360 only at the trigonometry boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectObject {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub angle: f64,
    pub name: String,
    pub color: String,
    #[serde(default = "default_layer")]
    pub layer: String,
}

impl Default for RectObject {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            angle: 0.0,
            name: String::new(),
            color: "#ddd".to_string(),
            layer: default_layer(),
        }
    }
}

impl RectObject {
    /// The unrotated rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// The rectangle's center (unchanged by rotation).
    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

/// A point marker (e.g. a wifi access point) with a free-form kind tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerObject {
    pub x: f64,
    pub y: f64,
    pub kind: String,
    pub name: String,
    #[serde(default = "default_layer")]
    pub layer: String,
}

impl Default for MarkerObject {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            kind: "marker".to_string(),
            name: String::new(),
            layer: default_layer(),
        }
    }
}

/// A room boundary defined by an arbitrary polygon. Closed (fillable)
/// once it has at least three vertices; rotation is not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyRoomObject {
    pub points: Vec<Point>,
    pub name: String,
    pub color: String,
    #[serde(default = "default_layer")]
    pub layer: String,
}

impl Default for PolyRoomObject {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            name: "Room".to_string(),
            color: "rgba(219,234,254,0.6)".to_string(),
            layer: default_layer(),
        }
    }
}

impl PolyRoomObject {
    /// Axis-aligned bounds of the vertex list. `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Object kind discriminant, matching the wire tag of [`SceneObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Room,
    Furniture,
    Custom,
    Door,
    Window,
    Marker,
    PolyRoom,
}

impl ObjectKind {
    /// True for the rectangular variants.
    pub fn is_rect(self) -> bool {
        matches!(
            self,
            Self::Room | Self::Furniture | Self::Custom | Self::Door | Self::Window
        )
    }

    /// True for doors and windows, the variants that wall-snap.
    pub fn is_opening(self) -> bool {
        matches!(self, Self::Door | Self::Window)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room => write!(f, "room"),
            Self::Furniture => write!(f, "furniture"),
            Self::Custom => write!(f, "custom"),
            Self::Door => write!(f, "door"),
            Self::Window => write!(f, "window"),
            Self::Marker => write!(f, "marker"),
            Self::PolyRoom => write!(f, "polyroom"),
        }
    }
}

/// A floor-plan object. The tag field `type` matches the plan JSON
/// produced by export, so stored plans round-trip byte-compatibly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneObject {
    Room(RectObject),
    Furniture(RectObject),
    Custom(RectObject),
    Door(RectObject),
    Window(RectObject),
    Marker(MarkerObject),
    PolyRoom(PolyRoomObject),
}

impl SceneObject {
    /// The object's kind discriminant.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Room(_) => ObjectKind::Room,
            Self::Furniture(_) => ObjectKind::Furniture,
            Self::Custom(_) => ObjectKind::Custom,
            Self::Door(_) => ObjectKind::Door,
            Self::Window(_) => ObjectKind::Window,
            Self::Marker(_) => ObjectKind::Marker,
            Self::PolyRoom(_) => ObjectKind::PolyRoom,
        }
    }

    /// Rectangular geometry, when this is a rectangular variant.
    pub fn as_rect(&self) -> Option<&RectObject> {
        match self {
            Self::Room(r) | Self::Furniture(r) | Self::Custom(r) | Self::Door(r)
            | Self::Window(r) => Some(r),
            _ => None,
        }
    }

    /// Mutable rectangular geometry, when this is a rectangular variant.
    pub fn as_rect_mut(&mut self) -> Option<&mut RectObject> {
        match self {
            Self::Room(r) | Self::Furniture(r) | Self::Custom(r) | Self::Door(r)
            | Self::Window(r) => Some(r),
            _ => None,
        }
    }

    /// The object's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Room(r) | Self::Furniture(r) | Self::Custom(r) | Self::Door(r)
            | Self::Window(r) => &r.name,
            Self::Marker(m) => &m.name,
            Self::PolyRoom(p) => &p.name,
        }
    }

    /// The object's layer.
    pub fn layer(&self) -> &str {
        match self {
            Self::Room(r) | Self::Furniture(r) | Self::Custom(r) | Self::Door(r)
            | Self::Window(r) => &r.layer,
            Self::Marker(m) => &m.layer,
            Self::PolyRoom(p) => &p.layer,
        }
    }

    /// Display-time layer predicate. Filtering never mutates the model:
    /// an object is visible iff the filter is "All" or equals its layer.
    pub fn visible_on(&self, layer_filter: &str) -> bool {
        layer_filter == "All" || self.layer() == layer_filter
    }
}

/// Merge patch for the selected object's editable fields. `None` fields
/// are left unchanged; fields that do not apply to a variant (w/h on a
/// marker, any geometry on a poly room) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectPatch {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub angle: Option<f64>,
    pub color: Option<String>,
    pub layer: Option<String>,
}

/// The full set of floor-plan objects currently being edited, plus the
/// at-most-one selection.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selected: Option<usize>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// All objects in insertion (z-) order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true when the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The selected object's index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Sets the selection. An out-of-range index clears it.
    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.objects.len());
    }

    /// Gets an object by index.
    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// Gets a mutable object by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    /// The currently selected object, if any.
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected.and_then(|i| self.objects.get(i))
    }

    /// The currently selected object, mutably.
    pub fn selected_object_mut(&mut self) -> Option<&mut SceneObject> {
        match self.selected {
            Some(i) => self.objects.get_mut(i),
            None => None,
        }
    }

    /// Appends an object and returns its index.
    pub fn push(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Adds a room with default geometry and style.
    pub fn add_room(&mut self) -> usize {
        self.push(SceneObject::Room(RectObject {
            x: 40.0,
            y: 40.0,
            w: 200.0,
            h: 150.0,
            name: "Room".to_string(),
            color: "#dbeafe".to_string(),
            ..Default::default()
        }))
    }

    /// Adds a furniture item with default geometry and style.
    pub fn add_furniture(&mut self) -> usize {
        self.push(SceneObject::Furniture(RectObject {
            x: 80.0,
            y: 80.0,
            w: 80.0,
            h: 40.0,
            name: "Sofa".to_string(),
            color: "#fde68a".to_string(),
            ..Default::default()
        }))
    }

    /// Adds a custom rectangle with default geometry and style.
    pub fn add_custom(&mut self) -> usize {
        self.push(SceneObject::Custom(RectObject {
            x: 120.0,
            y: 120.0,
            w: 60.0,
            h: 60.0,
            name: "Custom".to_string(),
            color: "#e9d5ff".to_string(),
            ..Default::default()
        }))
    }

    /// Adds a door with default geometry and style.
    pub fn add_door(&mut self) -> usize {
        self.push(SceneObject::Door(RectObject {
            x: 50.0,
            y: 50.0,
            w: 40.0,
            h: 10.0,
            name: "Door".to_string(),
            color: "#cbd5e1".to_string(),
            ..Default::default()
        }))
    }

    /// Adds a window with default geometry and style.
    pub fn add_window(&mut self) -> usize {
        self.push(SceneObject::Window(RectObject {
            x: 70.0,
            y: 70.0,
            w: 60.0,
            h: 8.0,
            name: "Window".to_string(),
            color: "#bae6fd".to_string(),
            ..Default::default()
        }))
    }

    /// Adds a marker of the given kind at the default position.
    pub fn add_marker(&mut self, kind: impl Into<String>) -> usize {
        self.push(SceneObject::Marker(MarkerObject {
            x: 160.0,
            y: 160.0,
            kind: kind.into(),
            ..Default::default()
        }))
    }

    /// Adds a poly room from an ordered vertex list.
    pub fn add_poly_room(&mut self, points: Vec<Point>) -> usize {
        self.push(SceneObject::PolyRoom(PolyRoomObject {
            points,
            ..Default::default()
        }))
    }

    /// Merges `patch` into the object at `index`. A stale index is a
    /// silent no-op; fields inapplicable to the variant are ignored.
    pub fn update_fields(&mut self, index: usize, patch: &ObjectPatch) {
        let Some(object) = self.objects.get_mut(index) else {
            return;
        };
        match object {
            SceneObject::Room(r)
            | SceneObject::Furniture(r)
            | SceneObject::Custom(r)
            | SceneObject::Door(r)
            | SceneObject::Window(r) => {
                if let Some(name) = &patch.name {
                    r.name = name.clone();
                }
                if let Some(x) = patch.x {
                    r.x = x;
                }
                if let Some(y) = patch.y {
                    r.y = y;
                }
                if let Some(w) = patch.w {
                    r.w = w;
                }
                if let Some(h) = patch.h {
                    r.h = h;
                }
                if let Some(angle) = patch.angle {
                    r.angle = angle;
                }
                if let Some(color) = &patch.color {
                    r.color = color.clone();
                }
                if let Some(layer) = &patch.layer {
                    r.layer = layer.clone();
                }
            }
            SceneObject::Marker(m) => {
                // Size fields do not apply to a point marker.
                if let Some(name) = &patch.name {
                    m.name = name.clone();
                }
                if let Some(x) = patch.x {
                    m.x = x;
                }
                if let Some(y) = patch.y {
                    m.y = y;
                }
                if let Some(layer) = &patch.layer {
                    m.layer = layer.clone();
                }
            }
            SceneObject::PolyRoom(p) => {
                // Geometry is defined by the vertex list, not x/y/w/h.
                if let Some(name) = &patch.name {
                    p.name = name.clone();
                }
                if let Some(color) = &patch.color {
                    p.color = color.clone();
                }
                if let Some(layer) = &patch.layer {
                    p.layer = layer.clone();
                }
            }
        }
    }

    /// Removes the object at `index`. A stale index is a silent no-op.
    /// The selection is cleared when it referenced the removed object
    /// and shifted when it referenced a later one.
    pub fn delete_at(&mut self, index: usize) {
        if index >= self.objects.len() {
            return;
        }
        self.objects.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
    }

    /// Removes the selected object, clearing the selection.
    pub fn delete_selected(&mut self) {
        if let Some(index) = self.selected {
            self.delete_at(index);
        }
    }

    /// Topmost-first hit test.
    ///
    /// Markers hit within 10 units (squared distance < 100). Rectangular
    /// variants test inclusive containment in their own UNROTATED
    /// rectangle; rotated objects therefore have dead zones at their
    /// rotated corners. That asymmetry with the rotated selection
    /// outline is a known approximation kept for behavioral
    /// compatibility. Poly rooms test against the axis-aligned bounds of
    /// their vertices.
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        for (index, object) in self.objects.iter().enumerate().rev() {
            let hit = match object {
                SceneObject::Marker(m) => {
                    let dx = p.x - m.x;
                    let dy = p.y - m.y;
                    dx * dx + dy * dy < MARKER_HIT_RADIUS_SQ
                }
                SceneObject::PolyRoom(poly) => {
                    poly.bounds().is_some_and(|b| b.contains(p))
                }
                _ => object
                    .as_rect()
                    .is_some_and(|r| r.rect().contains(p)),
            };
            if hit {
                return Some(index);
            }
        }
        None
    }

    /// Replaces the object list wholesale and clears the selection.
    pub fn replace_objects(&mut self, objects: Vec<SceneObject>) {
        self.objects = objects;
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_defaults_are_hittable_at_center() {
        let mut scene = Scene::new();
        let room = scene.add_room();
        assert_eq!(scene.hit_test(Point::new(140.0, 115.0)), Some(room));

        let mut scene = Scene::new();
        let marker = scene.add_marker("wifi");
        assert_eq!(scene.hit_test(Point::new(160.0, 160.0)), Some(marker));
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut scene = Scene::new();
        scene.add_room();
        let top = scene.add_custom();
        // Custom default (120,120 60x60) overlaps the room's rectangle.
        assert_eq!(scene.hit_test(Point::new(130.0, 130.0)), Some(top));
    }

    #[test]
    fn test_hit_test_marker_radius() {
        let mut scene = Scene::new();
        let marker = scene.add_marker("wifi");
        assert_eq!(scene.hit_test(Point::new(169.0, 160.0)), Some(marker));
        // Squared distance exactly 100 misses (strict comparison).
        assert_eq!(scene.hit_test(Point::new(170.0, 160.0)), None);
    }

    #[test]
    fn test_hit_test_ignores_rotation() {
        let mut scene = Scene::new();
        let room = scene.add_room();
        if let Some(r) = scene.get_mut(room).and_then(SceneObject::as_rect_mut) {
            r.angle = 45.0;
        }
        // Still hit-tested against the unrotated rectangle.
        assert_eq!(scene.hit_test(Point::new(41.0, 41.0)), Some(room));
    }

    #[test]
    fn test_delete_shifts_selection() {
        let mut scene = Scene::new();
        scene.add_room();
        let furniture = scene.add_furniture();
        scene.set_selected(Some(furniture));

        scene.delete_at(0);
        assert_eq!(scene.selected(), Some(0));
        assert_eq!(scene.len(), 1);

        scene.delete_selected();
        assert_eq!(scene.selected(), None);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_delete_stale_index_is_noop() {
        let mut scene = Scene::new();
        scene.add_room();
        scene.delete_at(7);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_update_fields_ignores_inapplicable() {
        let mut scene = Scene::new();
        let marker = scene.add_marker("wifi");
        scene.update_fields(
            marker,
            &ObjectPatch {
                name: Some("AP".to_string()),
                w: Some(99.0),
                h: Some(99.0),
                layer: Some("Electrical".to_string()),
                ..Default::default()
            },
        );
        let SceneObject::Marker(m) = &scene.objects()[marker] else {
            panic!("expected marker");
        };
        assert_eq!(m.name, "AP");
        assert_eq!(m.layer, "Electrical");
    }

    #[test]
    fn test_layer_filter_is_pure() {
        let mut scene = Scene::new();
        let room = scene.add_room();
        scene.update_fields(
            room,
            &ObjectPatch {
                layer: Some("Walls".to_string()),
                ..Default::default()
            },
        );
        let obj = &scene.objects()[room];
        assert!(obj.visible_on("All"));
        assert!(obj.visible_on("Walls"));
        assert!(!obj.visible_on("Furniture"));
        // Predicate evaluation leaves the object untouched.
        assert_eq!(obj.layer(), "Walls");
    }

    #[test]
    fn test_set_selected_out_of_range_clears() {
        let mut scene = Scene::new();
        scene.add_room();
        scene.set_selected(Some(5));
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn test_scene_object_wire_tags() {
        let mut scene = Scene::new();
        scene.add_door();
        let json = serde_json::to_value(&scene.objects()[0]).unwrap();
        assert_eq!(json["type"], "door");
        assert_eq!(json["w"], 40.0);

        let poly = serde_json::to_value(SceneObject::PolyRoom(PolyRoomObject::default())).unwrap();
        assert_eq!(poly["type"], "polyroom");
    }
}
