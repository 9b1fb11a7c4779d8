//! Tile-world coordinate system.
//!
//! A location is expressed as the grid that owns it, the tile inside that
//! grid and a sub-tile offset measured in world units from the tile's upper
//! left corner. [`canonicalize`] folds any overflow in the offset into the
//! tile index and any overflow in the tile index into the grid index, so that
//! every [`CanonicalPosition`] observed by callers satisfies
//! `0 <= tile < tiles_per_grid` and `0 <= offset < tile_side` on both axes.
//!
//! Positions that would leave the defined world are clamped: stepping past
//! the first grid pins the axis to tile zero, stepping past the last grid
//! pins it to the last tile, and in both cases the excess offset is dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Uniform measurements shared by every grid in a world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldMetrics {
    tiles_per_grid_x: u32,
    tiles_per_grid_y: u32,
    grid_count_x: u32,
    grid_count_y: u32,
    tile_side_in_world_units: f32,
    tile_side_in_pixels: f32,
}

/// Reasons a set of world measurements is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum MetricsError {
    /// Tile and grid counts must be positive and addressable with an `i32`.
    #[error("{axis} count {value} must lie within 1..={max}", max = i32::MAX)]
    InvalidCount {
        /// Name of the offending measurement.
        axis: &'static str,
        /// Provided value.
        value: u32,
    },
    /// Tile sides must be positive and finite.
    #[error("{unit} tile side must be positive and finite (received {value})")]
    InvalidTileSide {
        /// Unit the side was expressed in.
        unit: &'static str,
        /// Provided value.
        value: f32,
    },
}

impl WorldMetrics {
    /// Validates and creates a new set of world measurements.
    pub fn new(
        tiles_per_grid_x: u32,
        tiles_per_grid_y: u32,
        grid_count_x: u32,
        grid_count_y: u32,
        tile_side_in_world_units: f32,
        tile_side_in_pixels: f32,
    ) -> Result<Self, MetricsError> {
        for (axis, value) in [
            ("tiles per grid x", tiles_per_grid_x),
            ("tiles per grid y", tiles_per_grid_y),
            ("grid x", grid_count_x),
            ("grid y", grid_count_y),
        ] {
            if value == 0 || i32::try_from(value).is_err() {
                return Err(MetricsError::InvalidCount { axis, value });
            }
        }

        for (unit, value) in [
            ("world unit", tile_side_in_world_units),
            ("pixel", tile_side_in_pixels),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MetricsError::InvalidTileSide { unit, value });
            }
        }

        Ok(Self {
            tiles_per_grid_x,
            tiles_per_grid_y,
            grid_count_x,
            grid_count_y,
            tile_side_in_world_units,
            tile_side_in_pixels,
        })
    }

    /// Number of tile columns in every grid.
    #[must_use]
    pub const fn tiles_per_grid_x(&self) -> u32 {
        self.tiles_per_grid_x
    }

    /// Number of tile rows in every grid.
    #[must_use]
    pub const fn tiles_per_grid_y(&self) -> u32 {
        self.tiles_per_grid_y
    }

    /// Number of grid columns in the world.
    #[must_use]
    pub const fn grid_count_x(&self) -> u32 {
        self.grid_count_x
    }

    /// Number of grid rows in the world.
    #[must_use]
    pub const fn grid_count_y(&self) -> u32 {
        self.grid_count_y
    }

    /// Side of a square tile in world units.
    #[must_use]
    pub const fn tile_side_in_world_units(&self) -> f32 {
        self.tile_side_in_world_units
    }

    /// Side of a square tile in pixels.
    #[must_use]
    pub const fn tile_side_in_pixels(&self) -> f32 {
        self.tile_side_in_pixels
    }

    /// Scale factor converting world units into pixels.
    #[must_use]
    pub fn pixels_per_world_unit(&self) -> f32 {
        self.tile_side_in_pixels / self.tile_side_in_world_units
    }
}

/// Displacement applied to a position during a single simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Horizontal distance in world units, positive toward increasing columns.
    pub dx: f32,
    /// Vertical distance in world units, positive toward increasing rows.
    pub dy: f32,
}

impl Displacement {
    /// Displacement that leaves a position untouched.
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Creates a new displacement.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Reports whether the displacement moves in neither axis.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Position whose tile indices and offsets may lie outside their ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPosition {
    /// Grid column.
    pub grid_x: i32,
    /// Grid row.
    pub grid_y: i32,
    /// Tile column within the grid.
    pub tile_x: i32,
    /// Tile row within the grid.
    pub tile_y: i32,
    /// Horizontal offset from the tile's left edge in world units.
    pub offset_x: f32,
    /// Vertical offset from the tile's top edge in world units.
    pub offset_y: f32,
}

/// Normalized position. Only [`canonicalize`] produces values of this type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CanonicalPosition {
    grid_x: i32,
    grid_y: i32,
    tile_x: i32,
    tile_y: i32,
    offset_x: f32,
    offset_y: f32,
}

impl CanonicalPosition {
    /// Grid column.
    #[must_use]
    pub const fn grid_x(&self) -> i32 {
        self.grid_x
    }

    /// Grid row.
    #[must_use]
    pub const fn grid_y(&self) -> i32 {
        self.grid_y
    }

    /// Tile column within the grid.
    #[must_use]
    pub const fn tile_x(&self) -> i32 {
        self.tile_x
    }

    /// Tile row within the grid.
    #[must_use]
    pub const fn tile_y(&self) -> i32 {
        self.tile_y
    }

    /// Horizontal offset inside the tile, in `[0, tile_side)`.
    #[must_use]
    pub const fn offset_x(&self) -> f32 {
        self.offset_x
    }

    /// Vertical offset inside the tile, in `[0, tile_side)`.
    #[must_use]
    pub const fn offset_y(&self) -> f32 {
        self.offset_y
    }

    /// Drops the canonical guarantee so the position can be edited freely.
    #[must_use]
    pub const fn to_raw(&self) -> RawPosition {
        RawPosition {
            grid_x: self.grid_x,
            grid_y: self.grid_y,
            tile_x: self.tile_x,
            tile_y: self.tile_y,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }

    /// Adds a displacement to the in-tile offset without normalizing.
    #[must_use]
    pub fn displaced(&self, displacement: Displacement) -> RawPosition {
        let mut raw = self.to_raw();
        raw.offset_x += displacement.dx;
        raw.offset_y += displacement.dy;
        raw
    }
}

/// Normalizes a raw position against the provided world measurements.
///
/// Pure and idempotent: canonical input is returned unchanged.
#[must_use]
pub fn canonicalize(metrics: &WorldMetrics, raw: RawPosition) -> CanonicalPosition {
    let side = metrics.tile_side_in_world_units;

    let x = canonicalize_axis(
        raw.grid_x,
        raw.tile_x,
        raw.offset_x,
        metrics.tiles_per_grid_x,
        metrics.grid_count_x,
        side,
    );
    let y = canonicalize_axis(
        raw.grid_y,
        raw.tile_y,
        raw.offset_y,
        metrics.tiles_per_grid_y,
        metrics.grid_count_y,
        side,
    );

    CanonicalPosition {
        grid_x: x.grid,
        grid_y: y.grid,
        tile_x: x.tile,
        tile_y: y.tile,
        offset_x: x.offset,
        offset_y: y.offset,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct AxisPosition {
    grid: i32,
    tile: i32,
    offset: f32,
}

fn canonicalize_axis(
    grid: i32,
    tile: i32,
    offset: f32,
    tiles_per_grid: u32,
    grid_count: u32,
    side: f32,
) -> AxisPosition {
    let (carried_tiles, offset) = split_offset(offset, side);

    let tiles_per_grid = i64::from(tiles_per_grid);
    let tile = i64::from(tile).saturating_add(carried_tiles);
    let grid = i64::from(grid).saturating_add(tile.div_euclid(tiles_per_grid));
    let tile = tile.rem_euclid(tiles_per_grid);

    let last_grid = i64::from(grid_count) - 1;
    let (grid, tile, offset) = if grid < 0 {
        (0, 0, 0.0)
    } else if grid > last_grid {
        (last_grid, tiles_per_grid - 1, 0.0)
    } else {
        (grid, tile, offset)
    };

    // Counts are validated to fit an i32 by `WorldMetrics::new`.
    AxisPosition {
        grid: i32::try_from(grid).unwrap_or(i32::MAX),
        tile: i32::try_from(tile).unwrap_or(i32::MAX),
        offset,
    }
}

/// Splits an offset into whole tiles (floor division) and a remainder in
/// `[0, side)`.
fn split_offset(offset: f32, side: f32) -> (i64, f32) {
    let tiles = (offset / side).floor();
    let mut carried = tiles as i64;
    let mut remainder = offset - tiles * side;

    // Rounding can leave the remainder a hair outside the half-open range.
    if remainder < 0.0 {
        remainder += side;
        carried = carried.saturating_sub(1);
    }
    if remainder >= side {
        remainder -= side;
        carried = carried.saturating_add(1);
    }
    if !(0.0..side).contains(&remainder) {
        remainder = 0.0;
    }

    (carried, remainder)
}
