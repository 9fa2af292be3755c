//! Local metric frame around a reference position
//!
//! The one place where linear distances become angular offsets. Uses the
//! spherical short-range approximation
//!
//! ```text
//! delta_lat = north / k
//! delta_lon = east / (k · cos(lat))
//! ```
//!
//! with `k` metres per degree of latitude (111 km by default). Accurate enough
//! for drift and search areas spanning tens of kilometres; it is not a
//! geodesic solver.

use crate::config::DriftConfig;
use crate::core_types::{Meters, Position};
use crate::error::{ensure_finite, Result, SarError};

/// East/north metric frame anchored at a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    origin: Position,
    meters_per_degree: f64,
    cos_lat: f64,
}

impl LocalFrame {
    /// Anchor a frame at `origin`.
    ///
    /// # Errors
    /// Returns [`SarError::Drift`] when |cos(latitude)| is below the configured
    /// pole epsilon, since the longitude delta is undefined there.
    pub fn new(origin: Position, config: &DriftConfig) -> Result<Self> {
        let cos_lat = origin.lat().to_radians().cos();
        if cos_lat.abs() < config.pole_epsilon {
            return Err(SarError::Drift {
                latitude: origin.lat(),
            });
        }
        Ok(Self {
            origin,
            meters_per_degree: config.km_per_degree * 1000.0,
            cos_lat,
        })
    }

    /// Anchor position
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Metres per degree of latitude
    pub fn meters_per_degree(&self) -> f64 {
        self.meters_per_degree
    }

    /// Position displaced by `east` and `north` metres from the origin.
    ///
    /// A zero offset returns the origin bit for bit. Longitude is wrapped
    /// across the antimeridian.
    ///
    /// # Errors
    /// Returns [`SarError::InvalidInput`] for non-finite offsets and
    /// [`SarError::Drift`] when the offset carries the latitude past a pole
    /// or moves the longitude by more than 180° (near-polar origins).
    pub fn offset(&self, east: Meters, north: Meters) -> Result<Position> {
        let east = ensure_finite("east", *east)?;
        let north = ensure_finite("north", *north)?;
        if east == 0.0 && north == 0.0 {
            return Ok(self.origin);
        }

        let lat = self.origin.lat() + north / self.meters_per_degree;
        let delta_lon = east / (self.meters_per_degree * self.cos_lat);
        if !(-90.0..=90.0).contains(&lat) || delta_lon.abs() > 180.0 {
            return Err(SarError::Drift { latitude: lat });
        }
        Position::wrapped(lat, self.origin.lon() + delta_lon)
    }

    /// East/north metres of `p` relative to the origin (inverse of [`Self::offset`])
    pub fn project(&self, p: &Position) -> (Meters, Meters) {
        let mut delta_lon = p.lon() - self.origin.lon();
        if delta_lon > 180.0 {
            delta_lon -= 360.0;
        } else if delta_lon < -180.0 {
            delta_lon += 360.0;
        }
        let east = delta_lon * self.meters_per_degree * self.cos_lat;
        let north = (p.lat() - self.origin.lat()) * self.meters_per_degree;
        (Meters::new(east), Meters::new(north))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(lat: f64, lon: f64) -> LocalFrame {
        LocalFrame::new(Position::new(lat, lon).unwrap(), &DriftConfig::default()).unwrap()
    }

    #[test]
    fn test_north_offset_uses_111_km() {
        let p = frame(0.0, 0.0)
            .offset(Meters::new(0.0), Meters::new(111_000.0))
            .unwrap();
        assert_relative_eq!(p.lat(), 1.0, epsilon = 1e-12);
        assert_eq!(p.lon(), 0.0);
    }

    #[test]
    fn test_east_offset_scales_with_latitude() {
        let p = frame(60.0, 30.0)
            .offset(Meters::new(55_500.0), Meters::new(0.0))
            .unwrap();
        assert_relative_eq!(p.lon(), 31.0, epsilon = 1e-9);
        assert_eq!(p.lat(), 60.0);
    }

    #[test]
    fn test_zero_offset_is_exact() {
        let origin = Position::new(12.345678901, -98.7654321).unwrap();
        let f = LocalFrame::new(origin, &DriftConfig::default()).unwrap();
        assert_eq!(f.offset(Meters::new(0.0), Meters::new(-0.0)).unwrap(), origin);
    }

    #[test]
    fn test_pole_is_rejected() {
        let pole = Position::new(90.0, 0.0).unwrap();
        let err = LocalFrame::new(pole, &DriftConfig::default()).unwrap_err();
        assert!(matches!(err, SarError::Drift { latitude } if latitude == 90.0));
        assert!(LocalFrame::new(Position::new(-90.0, 10.0).unwrap(), &DriftConfig::default()).is_err());
    }

    #[test]
    fn test_offset_past_pole_is_rejected() {
        let err = frame(89.9, 0.0)
            .offset(Meters::new(0.0), Meters::new(50_000.0))
            .unwrap_err();
        assert!(matches!(err, SarError::Drift { .. }));
    }

    #[test]
    fn test_near_pole_east_offset_is_rejected() {
        let f = frame(89.9999, 0.0);
        let err = f.offset(Meters::new(1000.0), Meters::new(0.0)).unwrap_err();
        assert!(matches!(err, SarError::Drift { .. }));
        assert!(f.offset(Meters::new(1.0), Meters::new(0.0)).is_ok());
    }

    #[test]
    fn test_offset_wraps_antimeridian() {
        let p = frame(0.0, 179.9)
            .offset(Meters::new(22_200.0), Meters::new(0.0))
            .unwrap();
        assert_relative_eq!(p.lon(), -179.9, epsilon = 1e-9);
    }

    #[test]
    fn test_project_inverts_offset() {
        let f = frame(45.0, 10.0);
        let p = f.offset(Meters::new(1234.0), Meters::new(-567.0)).unwrap();
        let (east, north) = f.project(&p);
        assert_relative_eq!(*east, 1234.0, epsilon = 1e-6);
        assert_relative_eq!(*north, -567.0, epsilon = 1e-6);
    }
}
