//! Environmental vector readings (wind, current)

use crate::core_types::units::{Degrees, MetersPerSecond};
use crate::error::{ensure_finite, ensure_non_negative, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single wind or current observation.
///
/// `direction` is the compass bearing the medium carries an object toward
/// (0 = north, clockwise). Callers holding meteorological "from" directions
/// must add 180° before building a reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorReading {
    /// Compass bearing of the set, degrees
    pub direction: Degrees,
    /// Speed, internal unit
    pub speed: MetersPerSecond,
}

impl VectorReading {
    /// Calm reading: no movement
    pub const CALM: VectorReading = VectorReading {
        direction: Degrees::NORTH,
        speed: MetersPerSecond::ZERO,
    };

    /// Create a reading from any speed unit convertible to m/s
    pub fn new(direction: Degrees, speed: impl Into<MetersPerSecond>) -> Self {
        Self {
            direction,
            speed: speed.into(),
        }
    }

    /// Check that direction and speed are finite and speed is not negative.
    ///
    /// # Errors
    /// Returns [`crate::SarError::InvalidInput`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("direction", *self.direction)?;
        ensure_non_negative("speed", *self.speed)?;
        Ok(())
    }

    /// East and north components in m/s (compass convention)
    pub fn components(&self) -> (f64, f64) {
        let rad = self.direction.to_radians();
        (*self.speed * rad.sin(), *self.speed * rad.cos())
    }
}

impl fmt::Display for VectorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.speed, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::Knots;

    #[test]
    fn test_new_converts_knots() {
        let r = VectorReading::new(Degrees::new(90.0), Knots::new(2.0));
        assert!((*r.speed - 1.028889).abs() < 1e-5);
    }

    #[test]
    fn test_components_compass_convention() {
        let east = VectorReading::new(Degrees::new(90.0), MetersPerSecond::new(2.0));
        let (x, y) = east.components();
        assert!((x - 2.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);

        let north = VectorReading::new(Degrees::new(0.0), MetersPerSecond::new(3.0));
        let (x, y) = north.components();
        assert!(x.abs() < 1e-12);
        assert!((y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(VectorReading::CALM.validate().is_ok());
        let negative = VectorReading::new(Degrees::new(0.0), MetersPerSecond::new(-1.0));
        assert!(negative.validate().is_err());
        let nan = VectorReading::new(Degrees::new(f64::NAN), MetersPerSecond::new(1.0));
        assert!(nan.validate().is_err());
    }
}
