//! Convex hull of a drift point cloud (monotone chain)

use crate::core_types::Position;
use crate::search::geometry::Hull;
use rustc_hash::FxHashSet;
use tracing::trace;

/// z-component of (a - o) × (b - o) with x = lon, y = lat.
/// Positive for a left (counter-clockwise) turn.
fn cross(o: &Position, a: &Position, b: &Position) -> f64 {
    (a.lon() - o.lon()) * (b.lat() - o.lat()) - (a.lat() - o.lat()) * (b.lon() - o.lon())
}

/// Append `p` to a chain, first popping every point that would make a
/// non-left turn
fn push_left_turn(chain: &mut Vec<Position>, p: Position) {
    while chain.len() >= 2 && cross(&chain[chain.len() - 2], &chain[chain.len() - 1], &p) <= 0.0 {
        chain.pop();
    }
    chain.push(p);
}

/// Convex hull of `points`.
///
/// Exact duplicates are removed first. Points are sorted by (lon, lat) and
/// swept into lower and upper chains. Degenerate inputs give degenerate
/// shapes instead of errors: no points, one distinct point, or a collinear
/// set collapsing to its two extremes.
pub fn convex_hull(points: &[Position]) -> Hull {
    let mut seen = FxHashSet::default();
    let mut unique: Vec<Position> = points
        .iter()
        .copied()
        // +0.0 folds negative zero into positive zero before hashing bits
        .filter(|p| seen.insert(((p.lat() + 0.0).to_bits(), (p.lon() + 0.0).to_bits())))
        .collect();

    unique.sort_by(|a, b| {
        a.lon()
            .total_cmp(&b.lon())
            .then_with(|| a.lat().total_cmp(&b.lat()))
    });
    trace!(input = points.len(), unique = unique.len(), "Computing convex hull");

    match unique.as_slice() {
        [] => return Hull::Empty,
        [only] => return Hull::Point(*only),
        _ => {}
    }

    let mut lower: Vec<Position> = Vec::with_capacity(unique.len());
    for p in &unique {
        push_left_turn(&mut lower, *p);
    }
    let mut upper: Vec<Position> = Vec::with_capacity(unique.len());
    for p in unique.iter().rev() {
        push_left_turn(&mut upper, *p);
    }

    // Each chain ends where the other begins
    lower.pop();
    upper.pop();
    lower.append(&mut upper);

    match lower.len() {
        0 | 1 => Hull::Point(unique[0]),
        2 => Hull::Line([lower[0], lower[1]]),
        _ => {
            lower.push(lower[0]);
            Hull::Polygon(lower)
        }
    }
}
