//! Great-circle bearing, distance and vector averaging

use crate::core_types::{Degrees, Meters, MetersPerSecond, Position, VectorReading};
use nalgebra::Vector2;
use tracing::trace;

/// Mean earth radius (IUGG), metres
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Initial great-circle bearing from point 1 to point 2, degrees in [0, 360).
///
/// Identical points return 0. Any NaN input also returns 0: this is a
/// fallback, not validation, so callers must check their inputs upstream.
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Degrees {
    if lat1.is_nan() || lon1.is_nan() || lat2.is_nan() || lon2.is_nan() {
        trace!(lat1, lon1, lat2, lon2, "NaN in bearing input, falling back to 0");
        return Degrees::NORTH;
    }
    if lat1 == lat2 && lon1 == lon2 {
        return Degrees::NORTH;
    }

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let x = delta_lon.sin() * lat2_rad.cos();
    let y = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    let bearing = Degrees::new(x.atan2(y).to_degrees()).normalized();
    if bearing.is_finite() {
        bearing
    } else {
        // Infinite coordinates survive the NaN check but not the trigonometry
        trace!(lat1, lon1, lat2, lon2, "Non-finite bearing, falling back to 0");
        Degrees::NORTH
    }
}

/// Initial bearing between two validated positions
pub fn bearing(from: &Position, to: &Position) -> Degrees {
    initial_bearing(from.lat(), from.lon(), to.lat(), to.lon())
}

/// Haversine great-circle distance on the mean-radius sphere
pub fn haversine_distance(from: &Position, to: &Position) -> Meters {
    let lat1_rad = from.lat().to_radians();
    let lat2_rad = to.lat().to_radians();
    let delta_lat = (to.lat() - from.lat()).to_radians();
    let delta_lon = (to.lon() - from.lon()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    Meters::new(EARTH_RADIUS_M * c)
}

/// Vector mean of wind or current readings.
///
/// Each reading is resolved into east/north components with the compass
/// convention (east = speed·sin(dir), north = speed·cos(dir)), the components
/// are averaged, and the resultant is converted back to speed and bearing.
///
/// - No readings: calm (speed 0, direction 0)
/// - One reading: that reading with its direction wrapped into [0, 360)
pub fn vector_mean(readings: &[VectorReading]) -> VectorReading {
    match readings {
        [] => VectorReading::CALM,
        [single] => VectorReading::new(single.direction.normalized(), single.speed),
        _ => {
            let sum = readings
                .iter()
                .map(|r| {
                    let (east, north) = r.components();
                    Vector2::new(east, north)
                })
                .fold(Vector2::zeros(), |acc, v| acc + v);
            let mean = sum / readings.len() as f64;

            let speed = mean.norm();
            let direction = if speed == 0.0 {
                Degrees::NORTH
            } else {
                Degrees::new(mean.x.atan2(mean.y).to_degrees()).normalized()
            };
            VectorReading::new(direction, MetersPerSecond::new(speed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cardinal_bearings() {
        assert_relative_eq!(*initial_bearing(0.0, 0.0, 1.0, 0.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(*initial_bearing(0.0, 0.0, 0.0, 1.0), 90.0, epsilon = 1e-9);
        assert_relative_eq!(*initial_bearing(0.0, 0.0, -1.0, 0.0), 180.0, epsilon = 1e-9);
        assert_relative_eq!(*initial_bearing(0.0, 0.0, 0.0, -1.0), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_range() {
        let b = initial_bearing(60.0, 30.0, 59.0, 29.0);
        assert!((0.0..360.0).contains(&*b));
        assert!(*b > 180.0 && *b < 270.0);
    }

    #[test]
    fn test_identical_points_bearing_zero() {
        let p = Position::new(60.0, 30.0).unwrap();
        assert_eq!(bearing(&p, &p), Degrees::NORTH);
    }

    #[test]
    fn test_nan_bearing_zero() {
        assert_eq!(initial_bearing(f64::NAN, 0.0, 1.0, 1.0), Degrees::NORTH);
        assert_eq!(initial_bearing(f64::NAN, f64::NAN, f64::NAN, f64::NAN), Degrees::NORTH);
        assert_eq!(initial_bearing(0.0, 0.0, f64::INFINITY, 1.0), Degrees::NORTH);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let a = Position::new(0.0, 0.0).unwrap();
        let b = Position::new(1.0, 0.0).unwrap();
        assert_relative_eq!(*haversine_distance(&a, &b), 111_195.08, epsilon = 0.1);
        assert_eq!(*haversine_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_vector_mean_empty_is_calm() {
        let mean = vector_mean(&[]);
        assert_eq!(*mean.speed, 0.0);
        assert_eq!(*mean.direction, 0.0);
    }

    #[test]
    fn test_vector_mean_single_is_exact() {
        let r = VectorReading::new(Degrees::new(370.0), MetersPerSecond::new(4.2));
        let mean = vector_mean(&[r]);
        assert_eq!(*mean.speed, 4.2);
        assert_eq!(*mean.direction, 10.0);
    }

    #[test]
    fn test_vector_mean_opposite_cancels() {
        let readings = [
            VectorReading::new(Degrees::new(90.0), MetersPerSecond::new(5.0)),
            VectorReading::new(Degrees::new(270.0), MetersPerSecond::new(5.0)),
        ];
        let mean = vector_mean(&readings);
        assert!(*mean.speed < 1e-12);
    }

    #[test]
    fn test_vector_mean_wraps_through_north() {
        let readings = [
            VectorReading::new(Degrees::new(350.0), MetersPerSecond::new(2.0)),
            VectorReading::new(Degrees::new(10.0), MetersPerSecond::new(2.0)),
        ];
        let mean = vector_mean(&readings);
        assert!(*mean.direction < 1e-9 || *mean.direction > 360.0 - 1e-9);
        assert_relative_eq!(*mean.speed, 2.0 * 10f64.to_radians().cos(), epsilon = 1e-12);
    }
}
