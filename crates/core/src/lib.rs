//! Poisk-More SAR Core Library
//!
//! Drift and search-geometry calculator for maritime search and rescue
//! planning. Given a last known position (LKP), wind and current readings and
//! the elapsed time, the core estimates where the search object has drifted
//! and builds the search area around that datum.
//!
//! ## Pipeline
//!
//! - [`geo`]: great-circle bearing, vector mean, haversine distance and the
//!   local metric frame used for every distance-to-degree conversion
//! - [`drift`]: leeway plus current composition, drift envelopes, probable
//!   error and survival tables
//! - [`search`]: expanding square, sector, parallel sweep and convex hull
//! - [`probability`]: linear-falloff grid and seeded point sampling
//! - [`sru`]: nearest-unit assignment and route checks
//! - [`store`]: incident persistence behind one trait
//!
//! Everything is pure and synchronous; results are plain data handed to the
//! host for rendering.

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Computation modules
pub mod drift;
pub mod geo;
pub mod probability;
pub mod search;
pub mod sru;
pub mod store;

// Re-export core types
pub use config::{DriftConfig, FieldConfig, SarConfig};
pub use core_types::{
    Degrees, DriftResult, Fraction, Hours, Kilometers, KilometersPerHour, Knots, Meters,
    MetersPerSecond, NauticalMiles, Position, VectorReading,
};
pub use error::{Result, SarError};

// Re-export computation entry points
pub use drift::{
    estimate_drift, DriftEnvelope, DriftEstimator, PersonInWater, ProbableError, SearchObject,
};
pub use geo::{bearing, haversine_distance, initial_bearing, vector_mean, LocalFrame};
pub use probability::{ProbabilityGrid, SampledField, WeightedPoint};
pub use search::{
    generate, generate_by_name, BoundingBox, Extent, Hull, SearchGenerator, SearchGeometry,
    SearchMethod, SearchParams, SearchPattern,
};
pub use sru::{assign_nearest, Assignment, SearchRegion, Sru};
pub use store::{Incident, IncidentStore, JsonFileStore, MemoryStore, StoreError};
