//! # HomePlan
//!
//! A home floor-plan editor: draw rooms, place furniture, doors,
//! windows, and markers, and save plans as JSON documents.
//!
//! ## Architecture
//!
//! HomePlan is organized as a workspace with multiple crates:
//!
//! 1. **homeplan-core** - Geometry primitives, units, shared constants
//! 2. **homeplan-editor** - Scene model, snapping, interaction, renderer,
//!    plan serialization
//! 3. **homeplan-store** - Persistent key-value store of saved plans
//! 4. **homeplan** - Main binary that integrates all crates
//!
//! ## Features
//!
//! - **Scene Editing**: rooms, furniture, custom shapes, doors, windows,
//!   point markers, and free-form polygon rooms
//! - **Snapping**: grid snapping plus wall-aware door/window placement
//! - **Rendering**: deterministic raster output of the whole plan
//! - **Persistence**: JSON plan documents in a simple on-disk store

pub use homeplan_core as core;
pub use homeplan_editor as editor;
pub use homeplan_store as store;

pub use homeplan_core::{
    constants, format_measure, CoreError, Point, Rect, UnitSystem,
};

pub use homeplan_editor::{
    export_plan, load_plan, render, EditorListener, EditorOptions, FloorPlanEditor, GridOptions,
    Key, ObjectKind, ObjectPatch, PlanDocument, Scene, SceneObject, SelectionSummary,
    ViewTransform,
};

pub use homeplan_store::{NewPlan, PlanPatch, PlanRecord, PlanStore, PlanSummary, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
