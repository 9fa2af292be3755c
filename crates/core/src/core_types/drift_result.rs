//! Outcome of a single drift estimate

use crate::core_types::position::Position;
use crate::core_types::units::{Degrees, Hours, Meters};
use serde::{Deserialize, Serialize};

/// Drifted datum plus the displacement that produced it.
///
/// Created fresh per estimate and handed to the caller; nothing here is
/// persisted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftResult {
    /// Last known position
    pub origin: Position,
    /// Estimated position after `elapsed`
    pub drifted: Position,
    /// Time since the LKP (always > 0)
    pub elapsed: Hours,
    /// Displacement toward east
    pub east: Meters,
    /// Displacement toward north
    pub north: Meters,
}

impl DriftResult {
    /// Total drift distance
    pub fn distance(&self) -> Meters {
        Meters::new(self.east.hypot(*self.north))
    }

    /// Direction of the total drift (the "set"), compass degrees in [0, 360).
    /// Zero displacement reports north.
    pub fn set(&self) -> Degrees {
        if *self.east == 0.0 && *self.north == 0.0 {
            return Degrees::NORTH;
        }
        Degrees::new(self.east.atan2(*self.north).to_degrees()).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(east: f64, north: f64) -> DriftResult {
        let p = Position::new(10.0, 10.0).unwrap();
        DriftResult {
            origin: p,
            drifted: p,
            elapsed: Hours::new(1.0),
            east: Meters::new(east),
            north: Meters::new(north),
        }
    }

    #[test]
    fn test_distance_and_set() {
        let r = result(300.0, 400.0);
        assert!((*r.distance() - 500.0).abs() < 1e-9);
        assert!((*r.set() - 36.8699).abs() < 1e-3);

        let west = result(-100.0, 0.0);
        assert!((*west.set() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_displacement_sets_north() {
        assert_eq!(result(0.0, 0.0).set(), Degrees::NORTH);
    }
}
