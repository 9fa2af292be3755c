//! Incident persistence
//!
//! One storage capability with swappable backends:
//!
//! - [`MemoryStore`]: in-process map, for tests and short-lived sessions
//! - [`JsonFileStore`]: single pretty-printed JSON document on disk
//!
//! Callers hold a `dyn IncidentStore` (or a generic) and never care which
//! backend is behind it.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::core_types::{DriftResult, Hours, Position, VectorReading};
use crate::drift::DriftEstimator;
use crate::error::SarError;
use serde::{Deserialize, Serialize};

/// Identifier assigned by a store on first save
pub type IncidentId = u64;

/// A SAR case as entered by the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub name: String,
    /// Last known position
    pub lkp: Position,
    /// Wind observations, averaged before use
    #[serde(default)]
    pub winds: Vec<VectorReading>,
    /// Current observations, averaged before use
    #[serde(default)]
    pub currents: Vec<VectorReading>,
    /// Time since the LKP
    pub elapsed: Hours,
    /// Last computed datum, if any
    #[serde(default)]
    pub drifted: Option<Position>,
    #[serde(default)]
    pub notes: String,
}

impl Incident {
    /// Incident with no readings yet
    pub fn new(name: impl Into<String>, lkp: Position, elapsed: Hours) -> Self {
        Self {
            name: name.into(),
            lkp,
            winds: Vec::new(),
            currents: Vec::new(),
            elapsed,
            drifted: None,
            notes: String::new(),
        }
    }

    /// Run the estimator on the stored readings and record the datum.
    ///
    /// # Errors
    /// See [`DriftEstimator::estimate_from_readings`].
    pub fn update_drift(&mut self, estimator: &DriftEstimator) -> Result<DriftResult, SarError> {
        let result =
            estimator.estimate_from_readings(self.lkp, &self.winds, &self.currents, self.elapsed)?;
        self.drifted = Some(result.drifted);
        Ok(result)
    }
}

/// Storage interface shared by every backend
pub trait IncidentStore {
    /// Store a new incident and return its id
    ///
    /// # Errors
    /// Returns error if the backend cannot be read or written
    fn save(&mut self, incident: Incident) -> Result<IncidentId, StoreError>;

    /// Fetch an incident
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for an unknown id, or a backend error
    fn load(&self, id: IncidentId) -> Result<Incident, StoreError>;

    /// Replace an existing incident
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for an unknown id, or a backend error
    fn update(&mut self, id: IncidentId, incident: Incident) -> Result<(), StoreError>;

    /// All stored ids in ascending order
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn ids(&self) -> Result<Vec<IncidentId>, StoreError>;
}

/// Errors that can occur with incident storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No incident with this id
    NotFound(IncidentId),
    /// Failed to read the backing file
    LoadFailed(String),
    /// Failed to parse the backing file
    ParseFailed(String),
    /// Failed to serialize incidents
    SerializeFailed(String),
    /// Failed to write the backing file
    SaveFailed(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Incident {id} not found"),
            StoreError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            StoreError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            StoreError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            StoreError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
