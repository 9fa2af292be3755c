//! Generated search geometry
//!
//! Plain data handed to the host for rendering. Coordinates are (lat, lon)
//! positions; planar tests (bounding box, containment) treat longitude as x
//! and latitude as y, with longitudes unwrapped against the first vertex so
//! shapes straddling the antimeridian stay contiguous.

use crate::core_types::{Degrees, Position};
use crate::search::Extent;
use serde::{Deserialize, Serialize};

/// Result of a convex hull computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Hull {
    /// No input points
    Empty,
    /// All inputs coincide
    Point(Position),
    /// All inputs are collinear: the two extreme points
    Line([Position; 2]),
    /// Closed ring, counter-clockwise in (lon, lat), first vertex repeated last
    Polygon(Vec<Position>),
}

/// Search pattern or boundary, tagged with the parameters that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchGeometry {
    /// Concentric square rings, corners SW, SE, NE, NW per ring, closed
    ExpandingSquare {
        center: Position,
        radius: Extent,
        legs: u32,
        vertices: Vec<Position>,
    },
    /// One vertex per sector boundary at `radius`, closed
    Sector {
        center: Position,
        radius: Extent,
        sectors: u32,
        orientation: Degrees,
        vertices: Vec<Position>,
    },
    /// `2k + 1` parallel tracks, each a `[start, end]` segment
    ParallelSweep {
        center: Position,
        radius: Extent,
        spacing: Extent,
        tracks_per_side: u32,
        sweep_bearing: Degrees,
        segments: Vec<[Position; 2]>,
    },
    /// Boundary of an arbitrary point set
    ConvexHull(Hull),
}

/// `lon` shifted by a multiple of 360° to lie within 180° of `reference`
fn unwrap_lon(lon: f64, reference: f64) -> f64 {
    let delta = lon - reference;
    if delta > 180.0 {
        lon - 360.0
    } else if delta < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Axis-aligned box in degrees.
///
/// Longitudes are unwrapped against the first point, so a box across the
/// antimeridian has `max_lon` above 180 or `min_lon` below -180.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Smallest box around `points`; `None` when empty
    pub fn around(points: &[Position]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let reference = first.lon();
        let init = BoundingBox {
            min_lat: first.lat(),
            min_lon: first.lon(),
            max_lat: first.lat(),
            max_lon: first.lon(),
        };
        Some(rest.iter().fold(init, |b, p| {
            let lon = unwrap_lon(p.lon(), reference);
            BoundingBox {
                min_lat: b.min_lat.min(p.lat()),
                min_lon: b.min_lon.min(lon),
                max_lat: b.max_lat.max(p.lat()),
                max_lon: b.max_lon.max(lon),
            }
        }))
    }

    /// Inclusive containment test, longitude compared modulo 360°
    pub fn contains(&self, p: &Position) -> bool {
        let lons = self.min_lon..=self.max_lon;
        (self.min_lat..=self.max_lat).contains(&p.lat())
            && [p.lon(), p.lon() - 360.0, p.lon() + 360.0]
                .iter()
                .any(|lon| lons.contains(lon))
    }
}

impl SearchGeometry {
    /// All vertices in emission order. Sweep segments are flattened as
    /// start, end, start, end, ...
    pub fn vertices(&self) -> Vec<Position> {
        match self {
            SearchGeometry::ExpandingSquare { vertices, .. }
            | SearchGeometry::Sector { vertices, .. } => vertices.clone(),
            SearchGeometry::ParallelSweep { segments, .. } => {
                segments.iter().flat_map(|s| s.iter().copied()).collect()
            }
            SearchGeometry::ConvexHull(hull) => match hull {
                Hull::Empty => Vec::new(),
                Hull::Point(p) => vec![*p],
                Hull::Line(ends) => ends.to_vec(),
                Hull::Polygon(ring) => ring.clone(),
            },
        }
    }

    /// True when the vertex sequence repeats its first vertex at the end
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            SearchGeometry::ExpandingSquare { .. }
                | SearchGeometry::Sector { .. }
                | SearchGeometry::ConvexHull(Hull::Polygon(_))
        )
    }

    /// Bounding box of all vertices; `None` for an empty hull
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::around(&self.vertices())
    }

    /// Closed ring enclosing the searched area, if the geometry has one.
    ///
    /// - Expanding square: the outermost ring
    /// - Sector and hull polygon: the boundary itself
    /// - Parallel sweep: first and last tracks joined into a quadrilateral
    pub fn area_ring(&self) -> Option<Vec<Position>> {
        match self {
            SearchGeometry::ExpandingSquare { vertices, .. } => {
                // Last ring's four corners sit just before the closing vertex
                let n = vertices.len();
                if n < 5 {
                    return None;
                }
                let mut ring = vertices[n - 5..n - 1].to_vec();
                ring.push(ring[0]);
                Some(ring)
            }
            SearchGeometry::Sector { vertices, .. }
            | SearchGeometry::ConvexHull(Hull::Polygon(vertices)) => Some(vertices.clone()),
            SearchGeometry::ParallelSweep { segments, .. } => {
                if segments.len() < 2 {
                    return None;
                }
                let (first, last) = (segments.first()?, segments.last()?);
                Some(vec![first[0], first[1], last[1], last[0], first[0]])
            }
            SearchGeometry::ConvexHull(_) => None,
        }
    }

    /// Whether `p` lies inside the searched area (even-odd ray casting).
    ///
    /// Points, lines and empty hulls contain nothing. Results for points
    /// exactly on the boundary are unspecified.
    pub fn contains(&self, p: &Position) -> bool {
        self.area_ring().is_some_and(|ring| point_in_ring(&ring, p))
    }
}

/// Even-odd ray casting against a closed ring, x = lon, y = lat.
/// Longitudes are unwrapped against the first vertex.
pub(crate) fn point_in_ring(ring: &[Position], p: &Position) -> bool {
    let Some(first) = ring.first() else {
        return false;
    };
    let reference = first.lon();
    let (x, y) = (unwrap_lon(p.lon(), reference), p.lat());
    let mut inside = false;
    for edge in ring.windows(2) {
        let (a, b) = (&edge[0], &edge[1]);
        let (xa, ya) = (unwrap_lon(a.lon(), reference), a.lat());
        let (xb, yb) = (unwrap_lon(b.lon(), reference), b.lat());
        if (ya > y) != (yb > y) {
            let x_cross = xa + (y - ya) * (xb - xa) / (yb - ya);
            if x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon).unwrap()
    }

    fn square() -> Vec<Position> {
        vec![
            pos(-1.0, -1.0),
            pos(-1.0, 1.0),
            pos(1.0, 1.0),
            pos(1.0, -1.0),
            pos(-1.0, -1.0),
        ]
    }

    #[test]
    fn test_point_in_ring() {
        let ring = square();
        assert!(point_in_ring(&ring, &pos(0.0, 0.0)));
        assert!(point_in_ring(&ring, &pos(0.9, -0.9)));
        assert!(!point_in_ring(&ring, &pos(1.5, 0.0)));
        assert!(!point_in_ring(&ring, &pos(0.0, -2.0)));
    }

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::around(&square()).unwrap();
        assert_eq!(bbox.min_lat, -1.0);
        assert_eq!(bbox.max_lon, 1.0);
        assert!(bbox.contains(&pos(1.0, 1.0)));
        assert!(BoundingBox::around(&[]).is_none());
    }

    #[test]
    fn test_antimeridian_square() {
        let ring = vec![
            pos(-1.0, 179.0),
            pos(-1.0, -179.0),
            pos(1.0, -179.0),
            pos(1.0, 179.0),
            pos(-1.0, 179.0),
        ];
        let bbox = BoundingBox::around(&ring).unwrap();
        assert_eq!(bbox.min_lon, 179.0);
        assert_eq!(bbox.max_lon, 181.0);
        assert!(bbox.contains(&pos(0.0, -179.5)));
        assert!(bbox.contains(&pos(0.0, 179.5)));
        assert!(!bbox.contains(&pos(0.0, 0.0)));

        let hull = SearchGeometry::ConvexHull(Hull::Polygon(ring));
        assert!(hull.contains(&pos(0.0, -179.5)));
        assert!(hull.contains(&pos(0.5, 179.5)));
        assert!(!hull.contains(&pos(0.0, 0.0)));
        assert!(!hull.contains(&pos(0.0, 178.0)));
    }

    #[test]
    fn test_degenerate_hulls_contain_nothing() {
        let point = SearchGeometry::ConvexHull(Hull::Point(pos(0.0, 0.0)));
        assert!(!point.contains(&pos(0.0, 0.0)));
        assert_eq!(point.vertices().len(), 1);
        assert!(!point.is_closed());

        let empty = SearchGeometry::ConvexHull(Hull::Empty);
        assert!(empty.vertices().is_empty());
        assert!(empty.bounding_box().is_none());
    }

    #[test]
    fn test_polygon_hull_contains() {
        let hull = SearchGeometry::ConvexHull(Hull::Polygon(square()));
        assert!(hull.is_closed());
        assert!(hull.contains(&pos(0.2, 0.3)));
        assert!(!hull.contains(&pos(2.0, 0.3)));
    }
}
