//! Dense probability grid with linear falloff
//!
//! Cell (row, col) sits at offset `((col - size/2)·res, (row - size/2)·res)`
//! metres (east, north) from the datum, so the centre cell lands exactly on
//! it. Each cell holds `max(0, 1 - d / radius)`.

use crate::config::{DriftConfig, SarConfig};
use crate::core_types::{Meters, Position};
use crate::error::{ensure_positive, Result, SarError};
use crate::geo::LocalFrame;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Square grid of presence probabilities around a datum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityGrid {
    center: Position,
    radius: Meters,
    resolution: Meters,
    size: usize,
    /// Row-major, `size * size` values in [0, 1]; row 0 is the southern edge
    values: Vec<f64>,
    #[serde(skip)]
    frame_config: DriftConfig,
}

impl ProbabilityGrid {
    /// Generate a grid with the default limits and frame constants.
    ///
    /// # Errors
    /// See [`Self::generate_with`].
    pub fn generate(center: Position, radius: Meters, resolution: Meters) -> Result<Self> {
        Self::generate_with(center, radius, resolution, &SarConfig::default())
    }

    /// Generate a grid of `floor(2·radius/resolution)` cells per axis.
    ///
    /// # Errors
    /// - [`SarError::InvalidInput`] if radius or resolution is not finite and
    ///   positive, or the size falls outside `1..=max_cells_per_axis`
    /// - [`SarError::Drift`] if the centre is at a pole
    pub fn generate_with(
        center: Position,
        radius: Meters,
        resolution: Meters,
        config: &SarConfig,
    ) -> Result<Self> {
        let r = ensure_positive("radius", *radius)?;
        let res = ensure_positive("resolution", *resolution)?;
        // Cell centres are placed through the frame, so reject poles up front
        LocalFrame::new(center, &config.drift)?;

        let cells = (2.0 * r / res).floor();
        if cells < 1.0 {
            return Err(SarError::invalid(
                "resolution",
                format!("{resolution} is coarser than the diameter {}", radius * 2.0),
            ));
        }
        let max = config.field.max_cells_per_axis;
        if cells > max as f64 {
            return Err(SarError::invalid(
                "resolution",
                format!("grid would be {cells} cells per axis, limit is {max}"),
            ));
        }
        let size = cells as usize;
        let half = (size / 2) as f64;

        let mut values = vec![0.0; size * size];
        values
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(row, row_values)| {
                let north = (row as f64 - half) * res;
                for (col, cell) in row_values.iter_mut().enumerate() {
                    let east = (col as f64 - half) * res;
                    let d = east.hypot(north);
                    *cell = (1.0 - d / r).max(0.0);
                }
            });

        debug!(%center, size, resolution = res, "Generated probability grid");
        Ok(Self {
            center,
            radius,
            resolution,
            size,
            values,
            frame_config: config.drift,
        })
    }

    /// Datum the grid is centred on
    pub fn center(&self) -> Position {
        self.center
    }

    /// Falloff radius
    pub fn radius(&self) -> Meters {
        self.radius
    }

    /// Cell edge length
    pub fn resolution(&self) -> Meters {
        self.resolution
    }

    /// Cells per axis
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major values, row 0 southernmost
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of one cell, `None` when out of bounds
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.size && col < self.size {
            Some(self.values[row * self.size + col])
        } else {
            None
        }
    }

    /// Index of the centre cell, which holds the peak value 1
    pub fn peak(&self) -> (usize, usize) {
        (self.size / 2, self.size / 2)
    }

    /// East/north offset of a cell centre from the datum
    pub fn cell_offset(&self, row: usize, col: usize) -> (Meters, Meters) {
        let half = (self.size / 2) as f64;
        (
            self.resolution * (col as f64 - half),
            self.resolution * (row as f64 - half),
        )
    }

    /// Geographic position of a cell centre.
    ///
    /// # Errors
    /// [`SarError::InvalidInput`] when the cell is out of bounds, or
    /// [`SarError::Drift`] when the cell falls past a pole.
    pub fn cell_center(&self, row: usize, col: usize) -> Result<Position> {
        let size = self.size;
        if row >= size || col >= size {
            return Err(SarError::invalid(
                "cell",
                format!("({row}, {col}) outside {size}x{size} grid"),
            ));
        }
        let (east, north) = self.cell_offset(row, col);
        LocalFrame::new(self.center, &self.frame_config)?.offset(east, north)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid(radius: f64, resolution: f64) -> ProbabilityGrid {
        ProbabilityGrid::generate(
            Position::new(60.0, 30.0).unwrap(),
            Meters::new(radius),
            Meters::new(resolution),
        )
        .unwrap()
    }

    #[test]
    fn test_size_from_radius_and_resolution() {
        assert_eq!(grid(1000.0, 100.0).size(), 20);
        assert_eq!(grid(1000.0, 300.0).size(), 6);
        assert_eq!(grid(50.0, 100.0).size(), 1);
        assert_eq!(grid(1000.0, 100.0).values().len(), 400);
    }

    #[test]
    fn test_center_cell_is_one() {
        let g = grid(1000.0, 100.0);
        let (row, col) = g.peak();
        assert_eq!(g.value(row, col), Some(1.0));
        assert_eq!(g.cell_center(row, col).unwrap(), g.center());
    }

    #[test]
    fn test_edge_cells() {
        let g = grid(1000.0, 100.0);
        // (0, 10): 1000 m south of the datum
        assert_eq!(g.value(0, 10), Some(0.0));
        assert_eq!(g.value(0, 0), Some(0.0));
        assert_relative_eq!(g.value(10, 15).unwrap(), 0.5, epsilon = 1e-12);
        assert_eq!(g.value(20, 0), None);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let g = grid(2500.0, 70.0);
        assert!(g.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_cell_center_positions() {
        let g = grid(1000.0, 100.0);
        let north = g.cell_center(15, 10).unwrap();
        assert_relative_eq!(north.lat() - 60.0, 500.0 / 111_000.0, epsilon = 1e-12);
        assert!(g.cell_center(20, 0).is_err());
    }

    #[test]
    fn test_rejects_bad_input() {
        let c = Position::new(0.0, 0.0).unwrap();
        assert!(ProbabilityGrid::generate(c, Meters::new(-1.0), Meters::new(1.0)).is_err());
        assert!(ProbabilityGrid::generate(c, Meters::new(1.0), Meters::new(0.0)).is_err());
        assert!(ProbabilityGrid::generate(c, Meters::new(f64::NAN), Meters::new(1.0)).is_err());
        // Resolution coarser than the diameter gives zero cells
        assert!(ProbabilityGrid::generate(c, Meters::new(10.0), Meters::new(25.0)).is_err());
        // 20 000 cells per axis exceeds the default limit
        assert!(ProbabilityGrid::generate(c, Meters::new(10_000.0), Meters::new(1.0)).is_err());
    }

    #[test]
    fn test_custom_cell_limit() {
        let mut cfg = SarConfig::default();
        cfg.field.max_cells_per_axis = 10;
        let c = Position::new(0.0, 0.0).unwrap();
        assert!(ProbabilityGrid::generate_with(c, Meters::new(500.0), Meters::new(100.0), &cfg).is_ok());
        assert!(ProbabilityGrid::generate_with(c, Meters::new(600.0), Meters::new(100.0), &cfg).is_err());
    }
}
