use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ids::next_id;
use super::{KeyValueStore, StorageError, StoreEvent, StoreEvents};

/// Storage key holding the whole objective list as one JSON array.
pub const OKR_STORAGE_KEY: &str = "intern_okr";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub title: String,
    /// Display order is insertion order.
    #[serde(rename = "keyResults", default)]
    pub key_results: Vec<KeyResult>,
}

impl Objective {
    pub fn done_count(&self) -> usize {
        self.key_results.iter().filter(|kr| kr.done).count()
    }

    fn key_result_mut(&mut self, kr_id: &str) -> Option<&mut KeyResult> {
        self.key_results.iter_mut().find(|kr| kr.id == kr_id)
    }
}

/// Objectives and their key results, kept entirely in local storage.
///
/// Every mutation writes the full snapshot back under [`OKR_STORAGE_KEY`]. Mutators
/// return `Ok(false)` without touching storage when the input is blank or an id is
/// unknown.
pub struct OkrStore {
    storage: Box<dyn KeyValueStore>,
    objectives: Vec<Objective>,
    events: StoreEvents,
}

impl std::fmt::Debug for OkrStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OkrStore")
            .field("objectives", &self.objectives)
            .finish_non_exhaustive()
    }
}

impl OkrStore {
    /// Build a store and load whatever snapshot the storage holds.
    pub fn open(storage: Box<dyn KeyValueStore>, events: StoreEvents) -> Self {
        let mut store = Self {
            storage,
            objectives: Vec::new(),
            events,
        };
        store.load();
        store
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn get(&self, id: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    /// Re-read the snapshot. Missing or unreadable data yields an empty list.
    pub fn load(&mut self) {
        self.objectives = match self.storage.get(OKR_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Objective>>(&raw) {
                Ok(objectives) => objectives,
                Err(e) => {
                    warn!(error = %e, "stored OKR snapshot is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read OKR snapshot, starting empty");
                Vec::new()
            }
        };
        debug!(count = self.objectives.len(), "loaded objectives");
        self.events.publish(StoreEvent::OkrChanged);
    }

    /// Serialize and write the whole objective list.
    pub fn save(&mut self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.objectives)?;
        self.storage.set(OKR_STORAGE_KEY, &raw)?;
        self.events.publish(StoreEvent::OkrChanged);
        Ok(())
    }

    /// Append a new objective with no key results. Returns its id.
    pub fn create_objective(&mut self, title: &str) -> Result<Option<String>, StorageError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let id = self.fresh_id("o");
        self.objectives.push(Objective {
            id: id.clone(),
            title: title.to_string(),
            key_results: Vec::new(),
        });
        self.save()?;
        Ok(Some(id))
    }

    pub fn update_objective_title(&mut self, id: &str, title: &str) -> Result<bool, StorageError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(false);
        }
        let Some(objective) = self.objectives.iter_mut().find(|o| o.id == id) else {
            return Ok(false);
        };
        objective.title = title.to_string();
        self.save()?;
        Ok(true)
    }

    /// Remove an objective together with all of its key results.
    ///
    /// Callers must have confirmed the deletion with the user first.
    pub fn delete_objective(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.objectives.len();
        self.objectives.retain(|o| o.id != id);
        if self.objectives.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Append a not-yet-done key result. Returns its id.
    pub fn add_key_result(
        &mut self,
        objective_id: &str,
        content: &str,
    ) -> Result<Option<String>, StorageError> {
        let content = content.trim();
        if content.is_empty() || self.get(objective_id).is_none() {
            return Ok(None);
        }
        let id = self.fresh_id("kr");
        if let Some(objective) = self.objectives.iter_mut().find(|o| o.id == objective_id) {
            objective.key_results.push(KeyResult {
                id: id.clone(),
                content: content.to_string(),
                done: false,
            });
        }
        self.save()?;
        Ok(Some(id))
    }

    pub fn toggle_key_result(&mut self, objective_id: &str, kr_id: &str) -> Result<bool, StorageError> {
        let Some(kr) = self
            .objectives
            .iter_mut()
            .find(|o| o.id == objective_id)
            .and_then(|o| o.key_result_mut(kr_id))
        else {
            return Ok(false);
        };
        kr.done = !kr.done;
        self.save()?;
        Ok(true)
    }

    pub fn delete_key_result(&mut self, objective_id: &str, kr_id: &str) -> Result<bool, StorageError> {
        let Some(objective) = self.objectives.iter_mut().find(|o| o.id == objective_id) else {
            return Ok(false);
        };
        let before = objective.key_results.len();
        objective.key_results.retain(|kr| kr.id != kr_id);
        if objective.key_results.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Generated id that no objective or key result in the snapshot already uses.
    fn fresh_id(&self, prefix: &str) -> String {
        loop {
            let id = next_id(prefix);
            let taken = self.objectives.iter().any(|o| {
                o.id == id || o.key_results.iter().any(|kr| kr.id == id)
            });
            if !taken {
                return id;
            }
        }
    }
}
