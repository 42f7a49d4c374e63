//! Plan export/import.
//!
//! Plans are stored as a single JSON document with two top-level keys:
//! `options` (grid + units) and `objects` (the scene, in z-order). The
//! object entries carry a `type` tag, so plans survive round-trips
//! without loss and older documents with unknown extra fields still
//! load.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::editor::{EditorOptions, FloorPlanEditor};
use crate::error::PlanResult;
use crate::scene::SceneObject;

/// On-disk plan document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub options: EditorOptions,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

/// Exports the editor's options and scene as pretty-printed JSON.
pub fn export_plan(editor: &FloorPlanEditor) -> PlanResult<String> {
    let doc = PlanDocument {
        options: editor.options().clone(),
        objects: editor.scene().objects().to_vec(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Loads a plan into the editor, replacing the scene and clearing the
/// selection.
///
/// Only acts when the document carries a well-formed `objects` array;
/// malformed input is logged and leaves the editor untouched, so a bad
/// import never destroys the open plan. Options are taken from the
/// document when present.
pub fn load_plan(editor: &mut FloorPlanEditor, json: &str) {
    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "ignoring malformed plan document");
            return;
        }
    };
    if !value.get("objects").is_some_and(serde_json::Value::is_array) {
        warn!("ignoring plan document without an objects array");
        return;
    }
    let doc: PlanDocument = match serde_json::from_value(value) {
        Ok(doc) => doc,
        Err(err) => {
            warn!(%err, "ignoring plan document with invalid objects");
            return;
        }
    };
    editor.scene_mut().replace_objects(doc.objects);
    *editor.options_mut() = doc.options;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorOptions;
    use homeplan_core::units::UnitSystem;

    #[test]
    fn test_export_then_load_round_trips() {
        let mut editor = FloorPlanEditor::new(EditorOptions::default());
        editor.add_room();
        editor.add_door();
        editor.add_marker("wifi");
        editor.set_units(UnitSystem::Metric);

        let json = export_plan(&editor).unwrap();

        let mut restored = FloorPlanEditor::default();
        load_plan(&mut restored, &json);
        assert_eq!(restored.scene().objects(), editor.scene().objects());
        assert_eq!(restored.options(), editor.options());
        assert_eq!(restored.scene().selected(), None);
    }

    #[test]
    fn test_load_clears_selection() {
        let mut editor = FloorPlanEditor::default();
        editor.add_room();
        editor.scene_mut().set_selected(Some(0));

        load_plan(&mut editor, r#"{"objects": []}"#);
        assert_eq!(editor.scene().len(), 0);
        assert_eq!(editor.scene().selected(), None);
    }

    #[test]
    fn test_malformed_json_leaves_scene_untouched() {
        let mut editor = FloorPlanEditor::default();
        editor.add_room();

        load_plan(&mut editor, "not json at all");
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn test_document_without_objects_is_ignored() {
        let mut editor = FloorPlanEditor::default();
        editor.add_room();

        load_plan(&mut editor, "{}");
        assert_eq!(editor.scene().len(), 1);

        load_plan(&mut editor, r#"{"objects": 42}"#);
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn test_unknown_object_type_is_rejected_whole() {
        let mut editor = FloorPlanEditor::default();
        editor.add_room();

        load_plan(
            &mut editor,
            r#"{"objects": [{"type": "spaceship", "x": 1}]}"#,
        );
        assert_eq!(editor.scene().len(), 1);
    }
}
