//! Vertex generation for the standard SAR patterns

use crate::config::DriftConfig;
use crate::core_types::{Degrees, Meters, Position};
use crate::error::Result;
use crate::geo::LocalFrame;
use crate::search::Extent;

/// Drawing plane around a pattern centre. Offsets are expressed in the unit
/// of the pattern's [`Extent`].
pub(crate) enum Plane {
    /// Offsets added directly to latitude and longitude
    Degrees(Position),
    /// Offsets in metres through a local frame
    Metric(LocalFrame),
}

impl Plane {
    pub(crate) fn new(center: Position, unit: Extent, config: &DriftConfig) -> Result<Self> {
        Ok(match unit {
            Extent::Degrees(_) => Plane::Degrees(center),
            Extent::Meters(_) => Plane::Metric(LocalFrame::new(center, config)?),
        })
    }

    fn at(&self, east: f64, north: f64) -> Result<Position> {
        match self {
            Plane::Degrees(center) => Position::wrapped(center.lat() + north, center.lon() + east),
            Plane::Metric(frame) => frame.offset(Meters::new(east), Meters::new(north)),
        }
    }

    /// Point `distance` away from the centre along a compass bearing
    fn polar(&self, bearing: Degrees, distance: f64) -> Result<Position> {
        let rad = bearing.to_radians();
        self.at(distance * rad.sin(), distance * rad.cos())
    }
}

/// Rings 1..=legs at half-width `i · radius`, each traversed SW, SE, NE, NW,
/// then the first vertex repeated to close the polyline.
pub(crate) fn expanding_square(plane: &Plane, radius: f64, legs: u32) -> Result<Vec<Position>> {
    let mut vertices = Vec::with_capacity(legs as usize * 4 + 1);
    for ring in 1..=legs {
        let h = radius * f64::from(ring);
        for (east, north) in [(-h, -h), (h, -h), (h, h), (-h, h)] {
            vertices.push(plane.at(east, north)?);
        }
    }
    if let Some(&first) = vertices.first() {
        vertices.push(first);
    }
    Ok(vertices)
}

/// `sectors` boundary vertices at `radius`, bearings `orientation + k · 360 / sectors`,
/// closed.
pub(crate) fn sector(
    plane: &Plane,
    radius: f64,
    sectors: u32,
    orientation: Degrees,
) -> Result<Vec<Position>> {
    let step = 360.0 / f64::from(sectors);
    let mut vertices = (0..sectors)
        .map(|k| plane.polar(Degrees::new(*orientation + step * f64::from(k)), radius))
        .collect::<Result<Vec<_>>>()?;
    if let Some(&first) = vertices.first() {
        vertices.push(first);
    }
    Ok(vertices)
}

/// `2k + 1` tracks spaced `spacing` apart across the sweep, each running from
/// `-radius` to `+radius` along `sweep_bearing`. Tracks are ordered from the
/// left of the sweep direction to its right.
pub(crate) fn parallel_sweep(
    plane: &Plane,
    radius: f64,
    spacing: f64,
    tracks_per_side: u32,
    sweep_bearing: Degrees,
) -> Result<Vec<[Position; 2]>> {
    let along = sweep_bearing.to_radians();
    let across = (*sweep_bearing - 90.0).to_radians();
    let (along_e, along_n) = (along.sin(), along.cos());
    let (across_e, across_n) = (across.sin(), across.cos());

    let k = i64::from(tracks_per_side);
    (-k..=k)
        .rev()
        .map(|j| {
            let offset = spacing * j as f64;
            let (ce, cn) = (offset * across_e, offset * across_n);
            Ok([
                plane.at(ce - radius * along_e, cn - radius * along_n)?,
                plane.at(ce + radius * along_e, cn + radius * along_n)?,
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn origin_plane() -> Plane {
        Plane::Degrees(Position::new(0.0, 0.0).unwrap())
    }

    #[test]
    fn test_expanding_square_corner_order() {
        let v = expanding_square(&origin_plane(), 1.0, 2).unwrap();
        assert_eq!(v.len(), 9);
        let corners: Vec<(f64, f64)> = v.iter().map(|p| (p.lon(), p.lat())).collect();
        assert_eq!(corners[0], (-1.0, -1.0));
        assert_eq!(corners[1], (1.0, -1.0));
        assert_eq!(corners[2], (1.0, 1.0));
        assert_eq!(corners[3], (-1.0, 1.0));
        assert_eq!(corners[4], (-2.0, -2.0));
        assert_eq!(v[8], v[0]);
    }

    #[test]
    fn test_sector_vertices_on_circle() {
        let v = sector(&origin_plane(), 2.0, 6, Degrees::new(0.0)).unwrap();
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], v[6]);
        assert_relative_eq!(v[0].lat(), 2.0, epsilon = 1e-12);
        for p in &v {
            assert_relative_eq!(p.lat().hypot(p.lon()), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parallel_sweep_default_bearing_runs_east_west() {
        let segs = parallel_sweep(&origin_plane(), 3.0, 0.5, 2, Degrees::new(90.0)).unwrap();
        assert_eq!(segs.len(), 5);
        for [start, end] in &segs {
            assert_relative_eq!(start.lon(), -3.0, epsilon = 1e-12);
            assert_relative_eq!(end.lon(), 3.0, epsilon = 1e-12);
            assert_relative_eq!(start.lat(), end.lat(), epsilon = 1e-12);
        }
        // Left of an eastbound sweep is north
        assert_relative_eq!(segs[0][0].lat(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(segs[2][0].lat(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(segs[4][0].lat(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_metric_plane() {
        let frame = LocalFrame::new(Position::new(0.0, 0.0).unwrap(), &DriftConfig::default())
            .unwrap();
        let v = expanding_square(&Plane::Metric(frame), 111_000.0, 1).unwrap();
        assert_relative_eq!(v[2].lat(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v[2].lon(), 1.0, epsilon = 1e-12);
    }
}
