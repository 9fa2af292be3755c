//! Drift estimator
//!
//! Composes wind-induced leeway and surface current into a displacement of the
//! search object, then converts it into a drifted datum through
//! [`LocalFrame`].
//!
//! # Model
//!
//! ```text
//! leeway   = leeway_factor · wind.speed · elapsed
//! current  = current.speed · elapsed
//! east     = Σ distance · sin(direction)
//! north    = Σ distance · cos(direction)
//! ```
//!
//! Directions are compass bearings the medium carries the object toward.
//! The conversion to degrees is spherical and short-range (see [`LocalFrame`]).
//!
//! # Usage
//! ```
//! use poisk_core::{estimate_drift, Degrees, Hours, MetersPerSecond, Position, VectorReading};
//!
//! let lkp = Position::new(60.0, 30.0).unwrap();
//! let wind = VectorReading::new(Degrees::new(45.0), MetersPerSecond::new(6.0));
//! let result = estimate_drift(lkp, &wind, &VectorReading::CALM, Hours::new(2.0)).unwrap();
//! assert!(result.drifted.lat() > 60.0 && result.drifted.lon() > 30.0);
//! ```

pub mod envelope;
pub mod object;

pub use envelope::{DriftEnvelope, ProbableError};
pub use object::{survival_time, PersonInWater, SearchObject};

use crate::config::DriftConfig;
use crate::core_types::{Degrees, DriftResult, Hours, Meters, Position, VectorReading};
use crate::error::{ensure_positive, Result, SarError};
use crate::geo::{vector_mean, LocalFrame};
use nalgebra::{Rotation2, Vector2};
use tracing::{debug, trace};

/// Drift estimator bound to one set of constants
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriftEstimator {
    config: DriftConfig,
}

impl DriftEstimator {
    /// Create an estimator.
    ///
    /// # Errors
    /// Returns [`SarError::Config`] when the configuration is out of range.
    pub fn new(config: DriftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Estimator using the leeway of a catalogued search object
    pub fn for_object(object: SearchObject) -> Self {
        Self {
            config: DriftConfig::for_object(object),
        }
    }

    /// Active constants
    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Estimate the drifted datum after `elapsed` hours.
    ///
    /// Zero wind and zero current return the origin unchanged.
    ///
    /// # Errors
    /// - [`SarError::InvalidInput`] for zero, negative or non-finite elapsed
    ///   time, or a reading with non-finite values or negative speed
    /// - [`SarError::Drift`] when the origin is at or next to a pole
    pub fn estimate(
        &self,
        origin: Position,
        wind: &VectorReading,
        current: &VectorReading,
        elapsed: Hours,
    ) -> Result<DriftResult> {
        ensure_positive("elapsed", *elapsed)?;
        wind.validate()?;
        current.validate()?;

        let frame = LocalFrame::new(origin, &self.config)?;
        let displacement = self.displacement(wind, current, elapsed);
        let drifted = frame.offset(Meters::new(displacement.x), Meters::new(displacement.y))?;

        debug!(
            %origin,
            %drifted,
            east_m = displacement.x,
            north_m = displacement.y,
            elapsed_h = *elapsed,
            "Estimated drift"
        );

        Ok(DriftResult {
            origin,
            drifted,
            elapsed,
            east: Meters::new(displacement.x),
            north: Meters::new(displacement.y),
        })
    }

    /// Average several wind and current readings with [`vector_mean`], then
    /// estimate. Empty slices count as calm.
    ///
    /// # Errors
    /// Same as [`Self::estimate`]; every reading is validated before averaging.
    pub fn estimate_from_readings(
        &self,
        origin: Position,
        winds: &[VectorReading],
        currents: &[VectorReading],
        elapsed: Hours,
    ) -> Result<DriftResult> {
        for reading in winds.iter().chain(currents) {
            reading.validate()?;
        }
        let wind = vector_mean(winds);
        let current = vector_mean(currents);
        trace!(%wind, %current, "Averaged readings");
        self.estimate(origin, &wind, &current, elapsed)
    }

    /// Centre datum plus the left and right datums at ∓`divergence`.
    ///
    /// # Errors
    /// Same as [`Self::estimate`], plus [`SarError::InvalidInput`] for a
    /// non-finite divergence.
    pub fn estimate_envelope(
        &self,
        origin: Position,
        wind: &VectorReading,
        current: &VectorReading,
        elapsed: Hours,
        divergence: Degrees,
    ) -> Result<DriftEnvelope> {
        if !divergence.is_finite() {
            return Err(SarError::invalid("divergence", "must be finite"));
        }
        let center = self.estimate(origin, wind, current, elapsed)?;
        let frame = LocalFrame::new(origin, &self.config)?;
        let total = Vector2::new(*center.east, *center.north);

        // Compass bearings grow clockwise, nalgebra rotations counter-clockwise
        let side = |angle: Degrees| -> Result<Position> {
            let rotated = Rotation2::new(-angle.to_radians()) * total;
            frame.offset(Meters::new(rotated.x), Meters::new(rotated.y))
        };

        Ok(DriftEnvelope {
            center,
            left: side(Degrees::new(-*divergence))?,
            right: side(divergence)?,
            divergence,
        })
    }

    /// Drift line: positions at `steps + 1` evenly spaced times from the LKP
    /// (time 0) to `elapsed`.
    ///
    /// # Errors
    /// [`SarError::InvalidInput`] when `steps` is zero, plus the errors of
    /// [`Self::estimate`].
    pub fn drift_track(
        &self,
        origin: Position,
        wind: &VectorReading,
        current: &VectorReading,
        elapsed: Hours,
        steps: u32,
    ) -> Result<Vec<Position>> {
        if steps == 0 {
            return Err(SarError::invalid("steps", "must be at least 1"));
        }
        ensure_positive("elapsed", *elapsed)?;

        let mut track = Vec::with_capacity(steps as usize + 1);
        track.push(origin);
        for step in 1..=steps {
            let t = *elapsed * f64::from(step) / f64::from(steps);
            track.push(self.estimate(origin, wind, current, Hours::new(t))?.drifted);
        }
        Ok(track)
    }

    /// East/north displacement in metres
    fn displacement(
        &self,
        wind: &VectorReading,
        current: &VectorReading,
        elapsed: Hours,
    ) -> Vector2<f64> {
        let leg = |reading: &VectorReading, factor: f64| -> Vector2<f64> {
            let distance = *(reading.speed * elapsed) * factor;
            let rad = reading.direction.to_radians();
            Vector2::new(distance * rad.sin(), distance * rad.cos())
        };
        leg(wind, self.config.leeway_factor) + leg(current, 1.0)
    }
}

/// Estimate drift with the default constants (3 % leeway, 111 km per degree).
///
/// # Errors
/// See [`DriftEstimator::estimate`].
pub fn estimate_drift(
    origin: Position,
    wind: &VectorReading,
    current: &VectorReading,
    elapsed: Hours,
) -> Result<DriftResult> {
    DriftEstimator::default().estimate(origin, wind, current, elapsed)
}
