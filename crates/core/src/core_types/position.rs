//! Geodetic position (WGS84 degrees)

use crate::error::{ensure_finite, Result, SarError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude/longitude in degrees.
///
/// Invariant: latitude in [-90, 90], longitude in [-180, 180], both finite.
/// Fields are private so every value passes through a validating constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    lat: f64,
    lon: f64,
}

impl Position {
    /// Create a position, rejecting non-finite or out-of-range coordinates.
    ///
    /// # Errors
    /// Returns [`SarError::InvalidInput`] for NaN/infinite values, latitude
    /// outside [-90, 90] or longitude outside [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let lat = ensure_finite("latitude", lat)?;
        let lon = ensure_finite("longitude", lon)?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(SarError::invalid(
                "latitude",
                format!("must be in [-90, 90], got {lat}"),
            ));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(SarError::invalid(
                "longitude",
                format!("must be in [-180, 180], got {lon}"),
            ));
        }
        Ok(Self { lat, lon })
    }

    /// Create a position, wrapping a longitude outside [-180, 180] into
    /// [-180, 180). In-range longitudes pass through untouched.
    ///
    /// Used for generated vertices that may step across the antimeridian.
    /// Latitude is not wrapped: a shape that crosses a pole is an error.
    ///
    /// # Errors
    /// Returns [`SarError::InvalidInput`] for non-finite values or latitude
    /// outside [-90, 90].
    pub fn wrapped(lat: f64, lon: f64) -> Result<Self> {
        let lon = ensure_finite("longitude", lon)?;
        if (-180.0..=180.0).contains(&lon) {
            return Self::new(lat, lon);
        }
        Self::new(lat, (lon + 180.0).rem_euclid(360.0) - 180.0)
    }

    /// Latitude in degrees
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lon < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.6}°{ns} {:.6}°{ew}",
            self.lat.abs(),
            self.lon.abs()
        )
    }
}

/// Unvalidated wire form; deserialization goes through [`Position::new`].
#[derive(Serialize, Deserialize)]
struct RawPosition {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawPosition> for Position {
    type Error = SarError;

    fn try_from(raw: RawPosition) -> Result<Self> {
        Position::new(raw.lat, raw.lon)
    }
}

impl From<Position> for RawPosition {
    fn from(p: Position) -> Self {
        RawPosition {
            lat: p.lat,
            lon: p.lon,
        }
    }
}
