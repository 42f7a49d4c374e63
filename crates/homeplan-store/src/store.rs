//! Disk-backed plan document store.
//!
//! Plans are kept in a single JSON database file and written back after
//! every mutation. There is no retry logic; a failed read or write is
//! reported synchronously to the caller and the in-memory state is left
//! as it was.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::{NewPlan, PlanPatch, PlanRecord, PlanSummary};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PlanDatabase {
    plans: Vec<PlanRecord>,
}

/// Key-value store of floor-plan documents, persisted as a JSON file.
#[derive(Debug)]
pub struct PlanStore {
    path: PathBuf,
    db: PlanDatabase,
}

impl PlanStore {
    /// Opens the store at `path`, loading any existing database file.
    /// A missing file yields an empty store; a corrupt file is an error.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let db = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| StoreError::LoadError(e.to_string()))?
        } else {
            PlanDatabase::default()
        };
        debug!(plans = db.plans.len(), path = %path.display(), "opened plan store");
        Ok(Self { path, db })
    }

    /// Lists all stored plans, newest first.
    pub fn list(&self) -> Vec<PlanSummary> {
        let mut summaries: Vec<PlanSummary> =
            self.db.plans.iter().map(PlanRecord::summary).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries
    }

    /// Gets a plan by id.
    pub fn get(&self, id: &str) -> StoreResult<PlanRecord> {
        self.db
            .plans
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::PlanNotFound(id.to_string()))
    }

    /// Creates a plan. Absent fields take defaults (fresh id, name
    /// "Untitled", body "{}"); `updated_at` is set to now.
    pub fn create(&mut self, new: NewPlan) -> StoreResult<PlanRecord> {
        let record = PlanRecord {
            id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new.name.unwrap_or_else(|| "Untitled".to_string()),
            json: new.json.unwrap_or_else(|| "{}".to_string()),
            updated_at: Utc::now(),
        };
        self.db.plans.push(record.clone());
        self.save()?;
        debug!(id = %record.id, name = %record.name, "created plan");
        Ok(record)
    }

    /// Applies a partial update to a stored plan and bumps `updated_at`.
    pub fn update(&mut self, id: &str, patch: PlanPatch) -> StoreResult<PlanRecord> {
        let record = self
            .db
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PlanNotFound(id.to_string()))?;
        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(json) = patch.json {
            record.json = json;
        }
        record.updated_at = Utc::now();
        let updated = record.clone();
        self.save()?;
        Ok(updated)
    }

    /// Deletes a plan by id. Deleting a nonexistent id is not an error.
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        let before = self.db.plans.len();
        self.db.plans.retain(|p| p.id != id);
        if self.db.plans.len() == before {
            warn!(id, "delete of unknown plan id ignored");
            return Ok(());
        }
        self.save()
    }

    /// Returns the number of stored plans.
    pub fn len(&self) -> usize {
        self.db.plans.len()
    }

    /// Returns true when the store holds no plans.
    pub fn is_empty(&self) -> bool {
        self.db.plans.is_empty()
    }

    fn save(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.db)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
