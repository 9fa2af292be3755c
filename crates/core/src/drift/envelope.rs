//! Drift divergence envelope and probable error of the datum

use crate::core_types::{Degrees, DriftResult, Meters, NauticalMiles, Position};
use crate::error::{ensure_finite, ensure_non_negative, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Share of the drift distance counted as drift error
pub const DRIFT_ERROR_RATIO: f64 = 0.1;

/// Safety factor applied to the total probable error to get the search radius
pub const SEARCH_RADIUS_FACTOR: f64 = 1.5;

/// Centre datum plus left and right extremes of the drift.
///
/// Left and right are the total drift vector rotated by -divergence and
/// +divergence around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftEnvelope {
    pub center: DriftResult,
    pub left: Position,
    pub right: Position,
    pub divergence: Degrees,
}

impl DriftEnvelope {
    /// Left, centre and right datums, in that order
    pub fn datums(&self) -> [Position; 3] {
        [self.left, self.center.drifted, self.right]
    }
}

/// Error budget around a drifted datum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbableError {
    /// Position error of the LKP itself
    pub initial: Meters,
    /// Error proportional to the drift distance
    pub drift: Meters,
    /// Cross-track error from divergence
    pub divergence: Meters,
    /// Root-sum-square of the three components
    pub total: Meters,
    /// Radius of the search area around the datum
    pub search_radius: Meters,
}

impl ProbableError {
    /// Combine the error components for a drift estimate.
    ///
    /// # Errors
    /// Returns [`crate::SarError::InvalidInput`] for a negative or non-finite
    /// initial error, or a non-finite divergence.
    pub fn new(drift: &DriftResult, initial: Meters, divergence: Degrees) -> Result<Self> {
        let initial = ensure_non_negative("initial_error", *initial)?;
        let divergence = ensure_finite("divergence", *divergence)?;

        let distance = *drift.distance();
        let drift_error = distance * DRIFT_ERROR_RATIO;
        let divergence_error = distance * divergence.to_radians().sin().abs();
        let total = (initial.powi(2) + drift_error.powi(2) + divergence_error.powi(2)).sqrt();

        Ok(Self {
            initial: Meters::new(initial),
            drift: Meters::new(drift_error),
            divergence: Meters::new(divergence_error),
            total: Meters::new(total),
            search_radius: Meters::new(total * SEARCH_RADIUS_FACTOR),
        })
    }

    /// Search area in square metres
    pub fn area_m2(&self) -> f64 {
        PI * self.search_radius.powi(2)
    }

    /// Search area in square nautical miles, the unit SAR forms report
    pub fn area_nm2(&self) -> f64 {
        PI * self.search_radius.to_nautical_miles().powi(2)
    }

    /// Search radius in nautical miles
    pub fn search_radius_nm(&self) -> NauticalMiles {
        self.search_radius.to_nautical_miles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Hours;
    use approx::assert_relative_eq;

    fn drift_of(east: f64, north: f64) -> DriftResult {
        let p = Position::new(0.0, 0.0).unwrap();
        DriftResult {
            origin: p,
            drifted: p,
            elapsed: Hours::new(1.0),
            east: Meters::new(east),
            north: Meters::new(north),
        }
    }

    #[test]
    fn test_probable_error_components() {
        let err = ProbableError::new(&drift_of(0.0, 10_000.0), Meters::new(1852.0), Degrees::new(30.0))
            .unwrap();
        assert_relative_eq!(*err.drift, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(*err.divergence, 5000.0, epsilon = 1e-6);
        let expected = (1852.0f64.powi(2) + 1000.0f64.powi(2) + 5000.0f64.powi(2)).sqrt();
        assert_relative_eq!(*err.total, expected, epsilon = 1e-6);
        assert_relative_eq!(*err.search_radius, expected * 1.5, epsilon = 1e-6);
        assert_relative_eq!(err.area_m2(), PI * (expected * 1.5).powi(2), max_relative = 1e-12);
    }

    #[test]
    fn test_no_drift_keeps_initial_error() {
        let err = ProbableError::new(&drift_of(0.0, 0.0), Meters::new(926.0), Degrees::new(20.0))
            .unwrap();
        assert_eq!(*err.total, 926.0);
        assert_relative_eq!(*err.search_radius_nm(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_negative_initial_error() {
        assert!(
            ProbableError::new(&drift_of(1.0, 1.0), Meters::new(-1.0), Degrees::new(10.0)).is_err()
        );
    }
}
