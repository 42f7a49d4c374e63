use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored floor plan. The plan body is an opaque JSON blob produced by
/// the editor's plan export; the store never inspects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRecord {
    pub id: String,
    pub name: String,
    pub json: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for PlanRecord {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            json: "{}".to_string(),
            updated_at: Utc::now(),
        }
    }
}

impl PlanRecord {
    /// Returns the listing view of this record.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Listing view of a stored plan (no body).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a plan. Absent fields take server-side defaults:
/// a fresh v4 id, name "Untitled", body "{}".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlan {
    pub id: Option<String>,
    pub name: Option<String>,
    pub json: Option<String>,
}

/// Partial update of a stored plan. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub json: Option<String>,
}
