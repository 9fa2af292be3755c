//! Search and rescue unit (SRU) assignment and routing
//!
//! Each search region goes to the SRU closest to its centroid (haversine
//! distance). Routes are straight-line waypoint sequences; two routes
//! conflict when they share a waypoint.

use crate::core_types::{Meters, Position};
use crate::error::{Result, SarError};
use crate::geo::haversine_distance;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A search unit available for tasking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sru {
    pub name: String,
    pub position: Position,
}

/// A search region to be covered by one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRegion {
    pub id: u32,
    /// Boundary ring; a closing vertex equal to the first is allowed
    pub boundary: Vec<Position>,
}

impl SearchRegion {
    /// Mean of the boundary vertices, ignoring a repeated closing vertex.
    /// `None` for an empty boundary.
    pub fn centroid(&self) -> Option<Position> {
        let ring = match self.boundary.as_slice() {
            [] => return None,
            [first, .., last] if first == last => &self.boundary[..self.boundary.len() - 1],
            all => all,
        };
        let n = ring.len() as f64;
        let (lat, lon) = ring
            .iter()
            .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat(), lon + p.lon()));
        Position::new(lat / n, lon / n).ok()
    }
}

/// Outcome of assigning one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub region_id: u32,
    /// Name of the assigned unit; `None` when no unit could be assigned
    pub sru: Option<String>,
    /// Distance from the region centroid to the unit
    pub distance: Option<Meters>,
}

/// Assign every region the SRU nearest to its centroid.
///
/// Regions without a centroid, or any region when `units` is empty, get
/// `sru: None` and a warning in the log.
pub fn assign_nearest(regions: &[SearchRegion], units: &[Sru]) -> Vec<Assignment> {
    regions
        .iter()
        .map(|region| {
            let nearest = region.centroid().and_then(|c| {
                units
                    .iter()
                    .map(|u| (u, haversine_distance(&c, &u.position)))
                    .min_by(|a, b| a.1.cmp(&b.1))
            });
            match nearest {
                Some((unit, distance)) => {
                    debug!(region = region.id, sru = %unit.name, %distance, "Assigned SRU");
                    Assignment {
                        region_id: region.id,
                        sru: Some(unit.name.clone()),
                        distance: Some(distance),
                    }
                }
                None => {
                    warn!(region = region.id, "No SRU available for region");
                    Assignment {
                        region_id: region.id,
                        sru: None,
                        distance: None,
                    }
                }
            }
        })
        .collect()
}

/// Straight route from `start` to `end` with `steps + 1` evenly spaced
/// waypoints (linear in latitude and longitude).
///
/// # Errors
/// Returns [`SarError::InvalidInput`] when `steps` is zero.
pub fn interpolate_route(start: Position, end: Position, steps: u32) -> Result<Vec<Position>> {
    if steps == 0 {
        return Err(SarError::invalid("steps", "must be at least 1"));
    }
    (0..=steps)
        .map(|i| {
            let t = f64::from(i) / f64::from(steps);
            Position::new(
                start.lat() + (end.lat() - start.lat()) * t,
                start.lon() + (end.lon() - start.lon()) * t,
            )
        })
        .collect()
}

/// Two routes passing through the same waypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteConflict {
    /// Index of the first route
    pub first: usize,
    /// Index of the second route (always greater than `first`)
    pub second: usize,
    pub waypoint: Position,
}

/// Every (route pair, shared waypoint) combination, ordered by route indices
/// and then by the waypoint's position in the first route. Waypoints repeated
/// within a single route do not count.
pub fn route_conflicts(routes: &[Vec<Position>]) -> Vec<RouteConflict> {
    let key = |p: &Position| ((p.lat() + 0.0).to_bits(), (p.lon() + 0.0).to_bits());

    // Waypoint -> routes visiting it, in route order
    let mut visits: FxHashMap<(u64, u64), Vec<usize>> = FxHashMap::default();
    for (idx, route) in routes.iter().enumerate() {
        for p in route {
            let owners = visits.entry(key(p)).or_default();
            if owners.last() != Some(&idx) {
                owners.push(idx);
            }
        }
    }

    let mut conflicts = Vec::new();
    for (first, route) in routes.iter().enumerate() {
        let mut reported: Vec<(u64, u64)> = Vec::new();
        for p in route {
            let k = key(p);
            if reported.contains(&k) {
                continue;
            }
            reported.push(k);
            let owners = visits.get(&k).map_or(&[][..], Vec::as_slice);
            for &second in owners.iter().filter(|&&o| o > first) {
                conflicts.push(RouteConflict {
                    first,
                    second,
                    waypoint: *p,
                });
            }
        }
    }
    conflicts.sort_by_key(|c| (c.first, c.second));
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon).unwrap()
    }

    fn unit(name: &str, lat: f64, lon: f64) -> Sru {
        Sru {
            name: name.to_string(),
            position: pos(lat, lon),
        }
    }

    #[test]
    fn test_centroid_ignores_closing_vertex() {
        let region = SearchRegion {
            id: 1,
            boundary: vec![pos(0.0, 0.0), pos(0.0, 2.0), pos(2.0, 2.0), pos(2.0, 0.0), pos(0.0, 0.0)],
        };
        assert_eq!(region.centroid(), Some(pos(1.0, 1.0)));
        let empty = SearchRegion { id: 2, boundary: vec![] };
        assert_eq!(empty.centroid(), None);
    }

    #[test]
    fn test_assign_nearest() {
        let regions = vec![
            SearchRegion { id: 1, boundary: vec![pos(60.0, 30.0)] },
            SearchRegion { id: 2, boundary: vec![pos(59.0, 25.0)] },
        ];
        let units = vec![unit("Spasatel", 59.9, 30.2), unit("Helicopter-2", 59.2, 24.8)];
        let assignments = assign_nearest(&regions, &units);
        assert_eq!(assignments[0].sru.as_deref(), Some("Spasatel"));
        assert_eq!(assignments[1].sru.as_deref(), Some("Helicopter-2"));
        assert!(assignments.iter().all(|a| a.distance.is_some()));
    }

    #[test]
    fn test_assign_without_units() {
        let regions = vec![SearchRegion { id: 7, boundary: vec![pos(1.0, 1.0)] }];
        let assignments = assign_nearest(&regions, &[]);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].region_id, 7);
        assert!(assignments[0].sru.is_none());
    }

    #[test]
    fn test_interpolate_route() {
        let route = interpolate_route(pos(0.0, 0.0), pos(1.0, 2.0), 4).unwrap();
        assert_eq!(route.len(), 5);
        assert_eq!(route[0], pos(0.0, 0.0));
        assert_eq!(route[2], pos(0.5, 1.0));
        assert_eq!(route[4], pos(1.0, 2.0));
        assert!(interpolate_route(pos(0.0, 0.0), pos(1.0, 1.0), 0).is_err());
    }

    #[test]
    fn test_route_conflicts() {
        let separate = vec![vec![pos(0.0, 0.0), pos(1.0, 1.0)], vec![pos(2.0, 2.0), pos(3.0, 3.0)]];
        assert!(route_conflicts(&separate).is_empty());

        let touching = vec![vec![pos(0.0, 0.0), pos(1.0, 1.0)], vec![pos(1.0, 1.0), pos(2.0, 2.0)]];
        let conflicts = route_conflicts(&touching);
        assert_eq!(conflicts.len(), 1);
        assert_eq!((conflicts[0].first, conflicts[0].second), (0, 1));
        assert_eq!(conflicts[0].waypoint, pos(1.0, 1.0));
    }

    #[test]
    fn test_route_conflicts_three_routes() {
        let shared = pos(5.0, 5.0);
        let routes = vec![
            vec![pos(0.0, 0.0), shared, shared],
            vec![shared],
            vec![pos(9.0, 9.0), shared],
        ];
        let pairs: Vec<(usize, usize)> = route_conflicts(&routes)
            .iter()
            .map(|c| (c.first, c.second))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }
}
