//! JSON file incident store
//!
//! The whole store is one pretty-printed document. Every write goes to a
//! sibling temp file first and is then renamed over the original, so a crash
//! mid-write leaves the previous document intact.

use crate::store::{Incident, IncidentId, IncidentStore, StoreError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    next_id: IncidentId,
    incidents: Vec<Record>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    id: IncidentId,
    #[serde(flatten)]
    incident: Incident,
}

/// Incidents persisted in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`. The file is created on first save; a missing
    /// file reads as an empty store.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Document, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(StoreError::LoadFailed(e.to_string())),
        };
        serde_json::from_str(&contents).map_err(|e| StoreError::ParseFailed(e.to_string()))
    }

    fn write(&self, doc: &Document) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(doc)
            .map_err(|e| StoreError::SerializeFailed(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, contents).map_err(|e| StoreError::SaveFailed(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::SaveFailed(e.to_string()))?;

        debug!(path = %self.path.display(), incidents = doc.incidents.len(), "Saved incident store");
        Ok(())
    }
}

impl IncidentStore for JsonFileStore {
    fn save(&mut self, incident: Incident) -> Result<IncidentId, StoreError> {
        let mut doc = self.read()?;
        doc.next_id += 1;
        let id = doc.next_id;
        doc.incidents.push(Record { id, incident });
        self.write(&doc)?;
        Ok(id)
    }

    fn load(&self, id: IncidentId) -> Result<Incident, StoreError> {
        self.read()?
            .incidents
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| r.incident)
            .ok_or(StoreError::NotFound(id))
    }

    fn update(&mut self, id: IncidentId, incident: Incident) -> Result<(), StoreError> {
        let mut doc = self.read()?;
        let record = doc
            .incidents
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.incident = incident;
        self.write(&doc)
    }

    fn ids(&self) -> Result<Vec<IncidentId>, StoreError> {
        let mut ids: Vec<IncidentId> = self.read()?.incidents.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{exercise_store, sample_incident};

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "poisk_store_{name}_{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_json_store_contract() {
        let path = temp_path("contract");
        let mut store = JsonFileStore::new(&path);
        exercise_store(&mut store);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_survives_reopen() {
        let path = temp_path("reopen");
        let id = JsonFileStore::new(&path)
            .save(sample_incident("Lifeboat 3"))
            .unwrap();
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load(id).unwrap().name, "Lifeboat 3");
        assert!(!path.with_extension("json.tmp").exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert!(store.ids().unwrap().is_empty());
        assert_eq!(store.load(1), Err(StoreError::NotFound(1)));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.ids(), Err(StoreError::ParseFailed(_))));
        let _ = fs::remove_file(&path);
    }
}
