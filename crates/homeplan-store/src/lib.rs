//! # HomePlan Store
//!
//! Persistent storage for saved floor plans: a flat key-value store of
//! plan documents keyed by id, held in a single JSON file on disk. The
//! plan JSON itself is opaque to this crate; the editor produces and
//! consumes it.

pub mod error;
pub mod model;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use model::{NewPlan, PlanPatch, PlanRecord, PlanSummary};
pub use store::PlanStore;
