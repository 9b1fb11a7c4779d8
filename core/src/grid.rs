//! Fixed-size tile grids and the lookup errors shared by every grid query.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier stored in a single tile. Zero marks a passable tile.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TileId(u32);

impl TileId {
    /// Passable tile.
    pub const EMPTY: Self = Self(0);

    /// Canonical solid tile used by the builtin level data.
    pub const WALL: Self = Self(1);

    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the tile can be walked through.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Raised when a tile or grid index falls outside the addressed bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Tile index outside `[0, columns) x [0, rows)` of a single grid.
    #[error("tile ({x}, {y}) lies outside a {columns}x{rows} grid")]
    TileOutOfRange {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
    /// Grid index outside the world layout.
    #[error("grid ({x}, {y}) lies outside a {count_x}x{count_y} world")]
    GridOutOfRange {
        /// Requested grid column.
        x: i32,
        /// Requested grid row.
        y: i32,
        /// Number of grid columns in the world.
        count_x: u32,
        /// Number of grid rows in the world.
        count_y: u32,
    },
}

/// Reasons a tile grid cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grids must contain at least one column and one row.
    #[error("tile grid dimensions must be positive (received {columns}x{rows})")]
    EmptyDimensions {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
    /// The tile buffer length does not equal `columns * rows`.
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch {
        /// Number of tiles implied by the dimensions.
        expected: usize,
        /// Number of tiles supplied.
        actual: usize,
    },
    /// A row supplied to [`TileGrid::from_rows`] has the wrong width.
    #[error("row {row} holds {actual} tiles, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
}

/// Rectangular, row-major array of tile identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<TileId>,
}

impl TileGrid {
    /// Creates a grid from a row-major tile buffer.
    pub fn new(columns: u32, rows: u32, tiles: Vec<TileId>) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::EmptyDimensions { columns, rows });
        }

        let expected = columns as usize * rows as usize;
        let actual = tiles.len();
        if expected != actual {
            return Err(GridError::TileCountMismatch { expected, actual });
        }

        Ok(Self {
            columns,
            rows,
            tiles,
        })
    }

    /// Creates a grid from nested rows of raw tile values, top row first.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, GridError>
    where
        R: AsRef<[u32]>,
    {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: index,
                    expected: width,
                    actual: row.len(),
                });
            }
            tiles.extend(row.iter().copied().map(TileId::new));
        }

        let columns = u32::try_from(width).unwrap_or(u32::MAX);
        let row_count = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        Self::new(columns, row_count, tiles)
    }

    /// Number of tile columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the tile stored at the provided column and row.
    pub fn tile_at(&self, x: i32, y: i32) -> Result<TileId, LookupError> {
        self.index_of(x, y)
            .and_then(|index| self.tiles.get(index).copied())
            .ok_or(LookupError::TileOutOfRange {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            })
    }

    /// Iterates over every tile as `(column, row, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, TileId)> + '_ {
        let columns = self.columns;
        (0_u32..)
            .zip(self.tiles.iter())
            .map(move |(index, tile)| (index % columns, index / columns, *tile))
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let column = u32::try_from(x).ok()?;
        let row = u32::try_from(y).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }
}
