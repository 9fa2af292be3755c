//! In-memory incident store

use crate::store::{Incident, IncidentId, IncidentStore, StoreError};
use rustc_hash::FxHashMap;

/// Incidents held in a hash map; ids are allocated sequentially from 1
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    next_id: IncidentId,
    incidents: FxHashMap<IncidentId, Incident>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored incidents
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}

impl IncidentStore for MemoryStore {
    fn save(&mut self, incident: Incident) -> Result<IncidentId, StoreError> {
        self.next_id += 1;
        self.incidents.insert(self.next_id, incident);
        Ok(self.next_id)
    }

    fn load(&self, id: IncidentId) -> Result<Incident, StoreError> {
        self.incidents
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn update(&mut self, id: IncidentId, incident: Incident) -> Result<(), StoreError> {
        match self.incidents.get_mut(&id) {
            Some(slot) => {
                *slot = incident;
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn ids(&self) -> Result<Vec<IncidentId>, StoreError> {
        let mut ids: Vec<IncidentId> = self.incidents.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
