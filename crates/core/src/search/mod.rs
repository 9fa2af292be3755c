//! Search geometry generator
//!
//! Builds the standard SAR search patterns around a datum:
//!
//! - **Expanding square**: concentric square rings, one per leg
//! - **Sector**: evenly spaced boundary vertices on a circle
//! - **Parallel sweep**: `2k + 1` parallel tracks
//! - **Convex hull**: boundary of an arbitrary set of drift points
//!
//! Extents are unit-tagged. [`Extent::Degrees`] offsets coordinates directly;
//! [`Extent::Meters`] goes through [`crate::geo::LocalFrame`].
//!
//! # Usage
//! ```
//! use poisk_core::{generate_by_name, Extent, Position, SearchParams};
//!
//! let center = Position::new(0.0, 0.0).unwrap();
//! let params = SearchParams { radius: Extent::Degrees(1.0), legs: 4, ..SearchParams::default() };
//! let geometry = generate_by_name("expanding_square", center, &params).unwrap();
//! let bbox = geometry.bounding_box().unwrap();
//! assert_eq!((bbox.min_lat, bbox.max_lat), (-4.0, 4.0));
//!
//! assert!(generate_by_name("spiral", center, &params).is_err());
//! ```

pub mod geometry;
pub mod hull;
mod patterns;

pub use geometry::{BoundingBox, Hull, SearchGeometry};
pub use hull::convex_hull;

use crate::config::DriftConfig;
use crate::core_types::{Degrees, Kilometers, Meters, NauticalMiles, Position};
use crate::error::{ensure_finite, ensure_positive, Result, SarError};
use patterns::Plane;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Largest vertex count a single generated pattern may hold
pub const MAX_PATTERN_VERTICES: u64 = 1_000_000;

/// Reject counts that would produce more than [`MAX_PATTERN_VERTICES`] vertices
fn ensure_vertex_budget(parameter: &'static str, vertices: u64) -> Result<()> {
    if vertices > MAX_PATTERN_VERTICES {
        return Err(SarError::invalid(
            parameter,
            format!("pattern would have {vertices} vertices, limit is {MAX_PATTERN_VERTICES}"),
        ));
    }
    Ok(())
}

/// Pattern radius or spacing with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Extent {
    /// Coordinate degrees, added to latitude and longitude as-is
    Degrees(f64),
    /// Ground distance through the local metric frame
    Meters(Meters),
}

impl Extent {
    /// Numeric value in the extent's own unit
    pub fn magnitude(self) -> f64 {
        match self {
            Extent::Degrees(d) => d,
            Extent::Meters(m) => *m,
        }
    }

    fn same_unit(self, other: Extent) -> bool {
        matches!(
            (self, other),
            (Extent::Degrees(_), Extent::Degrees(_)) | (Extent::Meters(_), Extent::Meters(_))
        )
    }
}

impl From<Meters> for Extent {
    fn from(m: Meters) -> Self {
        Extent::Meters(m)
    }
}

impl From<NauticalMiles> for Extent {
    fn from(nm: NauticalMiles) -> Self {
        Extent::Meters(nm.into())
    }
}

impl From<Kilometers> for Extent {
    fn from(km: Kilometers) -> Self {
        Extent::Meters(km.into())
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Degrees(d) => write!(f, "{d}°"),
            Extent::Meters(m) => write!(f, "{m}"),
        }
    }
}

/// Supported search-geometry methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    ExpandingSquare,
    Sector,
    ParallelSweep,
    ConvexHull,
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 4] = [
        SearchMethod::ExpandingSquare,
        SearchMethod::Sector,
        SearchMethod::ParallelSweep,
        SearchMethod::ConvexHull,
    ];

    /// Stable `snake_case` name
    pub fn name(self) -> &'static str {
        match self {
            SearchMethod::ExpandingSquare => "expanding_square",
            SearchMethod::Sector => "sector",
            SearchMethod::ParallelSweep => "parallel_sweep",
            SearchMethod::ConvexHull => "convex_hull",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMethod {
    type Err = SarError;

    /// Case-insensitive; `_`, `-` and spaces are ignored, so
    /// `"Expanding Square"`, `"expanding-square"` and `"ExpandingSquare"` all match.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "expandingsquare" => Ok(SearchMethod::ExpandingSquare),
            "sector" => Ok(SearchMethod::Sector),
            "parallelsweep" => Ok(SearchMethod::ParallelSweep),
            "convexhull" => Ok(SearchMethod::ConvexHull),
            _ => Err(SarError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Loosely typed parameter set, as collected from a host form. Each method
/// reads only the fields it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Ring increment, sector radius or half track length
    pub radius: Extent,
    /// Expanding square ring count
    pub legs: u32,
    /// Sector count
    pub sectors: u32,
    /// Bearing of the first sector vertex
    pub orientation: Degrees,
    /// Track spacing for parallel sweep (same unit as `radius`)
    pub spacing: Extent,
    /// Parallel sweep tracks on each side of the centre track
    pub tracks_per_side: u32,
    /// Direction the parallel sweep tracks run
    pub sweep_bearing: Degrees,
    /// Input points for the convex hull
    pub points: Vec<Position>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            radius: NauticalMiles::new(1.0).into(),
            legs: 4,
            sectors: 6,
            orientation: Degrees::NORTH,
            spacing: NauticalMiles::new(1.0).into(),
            tracks_per_side: 2,
            sweep_bearing: Degrees::new(90.0),
            points: Vec::new(),
        }
    }
}

/// Fully typed search pattern request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchPattern {
    ExpandingSquare {
        center: Position,
        radius: Extent,
        legs: u32,
    },
    Sector {
        center: Position,
        radius: Extent,
        sectors: u32,
        orientation: Degrees,
    },
    ParallelSweep {
        center: Position,
        radius: Extent,
        spacing: Extent,
        tracks_per_side: u32,
        sweep_bearing: Degrees,
    },
    ConvexHull {
        points: Vec<Position>,
    },
}

impl SearchPattern {
    /// Pick the fields `method` needs out of a loose parameter set.
    /// The convex hull uses `params.points` and ignores `center`.
    pub fn from_params(method: SearchMethod, center: Position, params: &SearchParams) -> Self {
        match method {
            SearchMethod::ExpandingSquare => SearchPattern::ExpandingSquare {
                center,
                radius: params.radius,
                legs: params.legs,
            },
            SearchMethod::Sector => SearchPattern::Sector {
                center,
                radius: params.radius,
                sectors: params.sectors,
                orientation: params.orientation,
            },
            SearchMethod::ParallelSweep => SearchPattern::ParallelSweep {
                center,
                radius: params.radius,
                spacing: params.spacing,
                tracks_per_side: params.tracks_per_side,
                sweep_bearing: params.sweep_bearing,
            },
            SearchMethod::ConvexHull => SearchPattern::ConvexHull {
                points: params.points.clone(),
            },
        }
    }

    /// Method this request asks for
    pub fn method(&self) -> SearchMethod {
        match self {
            SearchPattern::ExpandingSquare { .. } => SearchMethod::ExpandingSquare,
            SearchPattern::Sector { .. } => SearchMethod::Sector,
            SearchPattern::ParallelSweep { .. } => SearchMethod::ParallelSweep,
            SearchPattern::ConvexHull { .. } => SearchMethod::ConvexHull,
        }
    }
}

/// Search geometry generator bound to the frame constants used for metric
/// extents
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchGenerator {
    config: DriftConfig,
}

impl SearchGenerator {
    /// Create a generator.
    ///
    /// # Errors
    /// Returns [`SarError::Config`] when the configuration is out of range.
    pub fn new(config: DriftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build the geometry for a typed request.
    ///
    /// # Errors
    /// - [`SarError::InvalidInput`] for a non-positive or non-finite radius or
    ///   spacing, mixed units, zero legs, fewer than 3 sectors, a pattern
    ///   above [`MAX_PATTERN_VERTICES`], or vertices falling past a pole in
    ///   degree space
    /// - [`SarError::Drift`] for a metric extent centred at a pole
    pub fn generate(&self, pattern: &SearchPattern) -> Result<SearchGeometry> {
        let geometry = match *pattern {
            SearchPattern::ExpandingSquare {
                center,
                radius,
                legs,
            } => {
                let r = ensure_positive("radius", radius.magnitude())?;
                if legs == 0 {
                    return Err(SarError::invalid("legs", "must be at least 1"));
                }
                ensure_vertex_budget("legs", 4 * u64::from(legs) + 1)?;
                let plane = Plane::new(center, radius, &self.config)?;
                SearchGeometry::ExpandingSquare {
                    center,
                    radius,
                    legs,
                    vertices: patterns::expanding_square(&plane, r, legs)?,
                }
            }
            SearchPattern::Sector {
                center,
                radius,
                sectors,
                orientation,
            } => {
                let r = ensure_positive("radius", radius.magnitude())?;
                ensure_finite("orientation", *orientation)?;
                if sectors < 3 {
                    return Err(SarError::invalid(
                        "sectors",
                        format!("must be at least 3, got {sectors}"),
                    ));
                }
                ensure_vertex_budget("sectors", u64::from(sectors) + 1)?;
                let plane = Plane::new(center, radius, &self.config)?;
                SearchGeometry::Sector {
                    center,
                    radius,
                    sectors,
                    orientation,
                    vertices: patterns::sector(&plane, r, sectors, orientation)?,
                }
            }
            SearchPattern::ParallelSweep {
                center,
                radius,
                spacing,
                tracks_per_side,
                sweep_bearing,
            } => {
                let r = ensure_positive("radius", radius.magnitude())?;
                let s = ensure_positive("spacing", spacing.magnitude())?;
                ensure_finite("sweep_bearing", *sweep_bearing)?;
                if !radius.same_unit(spacing) {
                    return Err(SarError::invalid(
                        "spacing",
                        "must use the same unit as radius",
                    ));
                }
                ensure_vertex_budget("tracks_per_side", 4 * u64::from(tracks_per_side) + 2)?;
                let plane = Plane::new(center, radius, &self.config)?;
                SearchGeometry::ParallelSweep {
                    center,
                    radius,
                    spacing,
                    tracks_per_side,
                    sweep_bearing,
                    segments: patterns::parallel_sweep(
                        &plane,
                        r,
                        s,
                        tracks_per_side,
                        sweep_bearing,
                    )?,
                }
            }
            SearchPattern::ConvexHull { ref points } => {
                SearchGeometry::ConvexHull(convex_hull(points))
            }
        };

        debug!(
            method = %pattern.method(),
            vertices = geometry.vertices().len(),
            "Generated search geometry"
        );
        Ok(geometry)
    }

    /// Parse `method` and build its geometry from a loose parameter set.
    ///
    /// # Errors
    /// [`SarError::UnsupportedMethod`] for an unknown method name, otherwise
    /// the errors of [`Self::generate`].
    pub fn generate_by_name(
        &self,
        method: &str,
        center: Position,
        params: &SearchParams,
    ) -> Result<SearchGeometry> {
        let method: SearchMethod = method.parse()?;
        self.generate(&SearchPattern::from_params(method, center, params))
    }
}

/// Build a geometry with the default frame constants.
///
/// # Errors
/// See [`SearchGenerator::generate`].
pub fn generate(pattern: &SearchPattern) -> Result<SearchGeometry> {
    SearchGenerator::default().generate(pattern)
}

/// Build a geometry by method name with the default frame constants.
///
/// # Errors
/// See [`SearchGenerator::generate_by_name`].
pub fn generate_by_name(
    method: &str,
    center: Position,
    params: &SearchParams,
) -> Result<SearchGeometry> {
    SearchGenerator::default().generate_by_name(method, center, params)
}
