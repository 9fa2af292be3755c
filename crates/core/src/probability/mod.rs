//! Probability field generator
//!
//! Two representations of where the search object is likely to be, both
//! centred on the drifted datum:
//!
//! - [`ProbabilityGrid`]: dense, deterministic, linear falloff to zero at `radius`
//! - [`SampledField`]: random points with placeholder weights, reproducible by seed

pub mod grid;
pub mod sampled;

pub use grid::ProbabilityGrid;
pub use sampled::{SampledField, WeightedPoint};

use crate::core_types::{DriftResult, Meters};
use crate::error::Result;

impl ProbabilityGrid {
    /// Grid centred on the drifted datum of an estimate.
    ///
    /// # Errors
    /// See [`ProbabilityGrid::generate_with`].
    pub fn from_drift(drift: &DriftResult, radius: Meters, resolution: Meters) -> Result<Self> {
        Self::generate(drift.drifted, radius, resolution)
    }
}

impl SampledField {
    /// Point cloud centred on the drifted datum of an estimate.
    ///
    /// # Errors
    /// See [`SampledField::generate_with`].
    pub fn from_drift(
        drift: &DriftResult,
        radius: Meters,
        count: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        Self::generate(drift.drifted, radius, count, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Degrees, Hours, MetersPerSecond, Position, VectorReading};
    use crate::drift::estimate_drift;

    #[test]
    fn test_fields_follow_the_drift() {
        let lkp = Position::new(45.0, -30.0).unwrap();
        let wind = VectorReading::new(Degrees::new(270.0), MetersPerSecond::new(12.0));
        let drift = estimate_drift(lkp, &wind, &VectorReading::CALM, Hours::new(3.0)).unwrap();

        let grid = ProbabilityGrid::from_drift(&drift, Meters::new(1500.0), Meters::new(100.0)).unwrap();
        assert_eq!(grid.center(), drift.drifted);
        assert!(grid.center().lon() < lkp.lon());

        let field = SampledField::from_drift(&drift, Meters::new(1500.0), 10, Some(3)).unwrap();
        assert_eq!(field.center(), drift.drifted);
        assert_eq!(field.len(), 10);
    }
}
