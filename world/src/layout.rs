//! Arrangement of tile grids into an addressable world.

use thiserror::Error;
use tilewalk_core::{
    canonicalize, CanonicalPosition, LookupError, RawPosition, TileGrid, WorldMetrics,
};

/// Reasons a world layout cannot be assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The number of grids does not equal `grid_count_x * grid_count_y`.
    #[error("layout expects {expected} grids, got {actual}")]
    GridCountMismatch {
        /// Number of grids implied by the metrics.
        expected: usize,
        /// Number of grids supplied.
        actual: usize,
    },
    /// A grid's dimensions differ from the uniform tile counts in the metrics.
    #[error(
        "grid #{index} is {columns}x{rows} tiles, expected {expected_columns}x{expected_rows}"
    )]
    NonUniformGrid {
        /// Row-major index of the offending grid.
        index: usize,
        /// Columns in the offending grid.
        columns: u32,
        /// Rows in the offending grid.
        rows: u32,
        /// Columns required by the metrics.
        expected_columns: u32,
        /// Rows required by the metrics.
        expected_rows: u32,
    },
}

/// Read-only world made of equally sized tile grids.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldLayout {
    metrics: WorldMetrics,
    grids: Vec<TileGrid>,
}

impl WorldLayout {
    /// Assembles a layout from grids listed in row-major grid order.
    pub fn new(metrics: WorldMetrics, grids: Vec<TileGrid>) -> Result<Self, LayoutError> {
        let expected = metrics.grid_count_x() as usize * metrics.grid_count_y() as usize;
        if grids.len() != expected {
            return Err(LayoutError::GridCountMismatch {
                expected,
                actual: grids.len(),
            });
        }

        for (index, grid) in grids.iter().enumerate() {
            if grid.columns() != metrics.tiles_per_grid_x()
                || grid.rows() != metrics.tiles_per_grid_y()
            {
                return Err(LayoutError::NonUniformGrid {
                    index,
                    columns: grid.columns(),
                    rows: grid.rows(),
                    expected_columns: metrics.tiles_per_grid_x(),
                    expected_rows: metrics.tiles_per_grid_y(),
                });
            }
        }

        Ok(Self { metrics, grids })
    }

    /// Measurements shared by every grid.
    #[must_use]
    pub const fn metrics(&self) -> &WorldMetrics {
        &self.metrics
    }

    /// Returns the grid at the provided grid coordinate.
    pub fn grid_at(&self, grid_x: i32, grid_y: i32) -> Result<&TileGrid, LookupError> {
        self.index_of(grid_x, grid_y)
            .and_then(|index| self.grids.get(index))
            .ok_or(LookupError::GridOutOfRange {
                x: grid_x,
                y: grid_y,
                count_x: self.metrics.grid_count_x(),
                count_y: self.metrics.grid_count_y(),
            })
    }

    /// Returns the grid that owns a canonical position.
    pub fn grid_of(&self, position: &CanonicalPosition) -> Result<&TileGrid, LookupError> {
        self.grid_at(position.grid_x(), position.grid_y())
    }

    /// Normalizes a raw position against this layout's metrics.
    #[must_use]
    pub fn canonicalize(&self, raw: RawPosition) -> CanonicalPosition {
        canonicalize(&self.metrics, raw)
    }

    fn index_of(&self, grid_x: i32, grid_y: i32) -> Option<usize> {
        let column = u32::try_from(grid_x).ok()?;
        let row = u32::try_from(grid_y).ok()?;
        if column >= self.metrics.grid_count_x() || row >= self.metrics.grid_count_y() {
            return None;
        }
        Some(row as usize * self.metrics.grid_count_x() as usize + column as usize)
    }
}
