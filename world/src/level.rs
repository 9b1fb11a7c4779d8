//! Load-once level data describing the world layout and the player's spawn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilewalk_core::{GridError, MetricsError, RawPosition, TileGrid, WorldMetrics};

use crate::{
    collision::is_empty,
    layout::{LayoutError, WorldLayout},
    movement::PlayerState,
};

/// Serializable description of a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Uniform measurements shared by every grid.
    pub metrics: MetricsDefinition,
    /// Size of the player's bounding box.
    pub player: PlayerDefinition,
    /// Starting position; normalized when the level is built.
    pub spawn: RawPosition,
    /// Tile data for every grid slot in the world.
    pub grids: Vec<GridDefinition>,
}

/// Unvalidated form of [`WorldMetrics`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsDefinition {
    /// Tile columns per grid.
    pub tiles_per_grid_x: u32,
    /// Tile rows per grid.
    pub tiles_per_grid_y: u32,
    /// Grid columns in the world.
    pub grid_count_x: u32,
    /// Grid rows in the world.
    pub grid_count_y: u32,
    /// Tile side in world units.
    pub tile_side_in_world_units: f32,
    /// Tile side in pixels.
    pub tile_side_in_pixels: f32,
}

/// Player bounding box in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerDefinition {
    /// Width of the bounding box.
    pub width: f32,
    /// Height of the bounding box.
    pub height: f32,
}

/// Tile data for a single grid slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridDefinition {
    /// Grid column the tiles belong to.
    pub x: u32,
    /// Grid row the tiles belong to.
    pub y: u32,
    /// Row-major tile identifiers, top row first.
    pub rows: Vec<Vec<u32>>,
}

/// Reasons a level definition is rejected.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The world measurements are invalid.
    #[error("invalid level metrics")]
    Metrics(#[from] MetricsError),
    /// A grid's tile data is malformed.
    #[error("grid ({x}, {y}) has malformed tile data")]
    Grid {
        /// Grid column.
        x: u32,
        /// Grid row.
        y: u32,
        /// Underlying grid error.
        #[source]
        source: GridError,
    },
    /// A grid lies outside the world described by the metrics.
    #[error("grid ({x}, {y}) lies outside the {count_x}x{count_y} world")]
    GridOutOfBounds {
        /// Grid column.
        x: u32,
        /// Grid row.
        y: u32,
        /// Grid columns in the world.
        count_x: u32,
        /// Grid rows in the world.
        count_y: u32,
    },
    /// The same grid slot was defined more than once.
    #[error("grid ({x}, {y}) is defined more than once")]
    DuplicateGrid {
        /// Grid column.
        x: u32,
        /// Grid row.
        y: u32,
    },
    /// A grid slot was never defined.
    #[error("grid ({x}, {y}) is missing")]
    MissingGrid {
        /// Grid column.
        x: u32,
        /// Grid row.
        y: u32,
    },
    /// The grids could not be assembled into a layout.
    #[error("grids do not form a uniform layout")]
    Layout(#[from] LayoutError),
    /// The player's bounding box is not positive and finite.
    #[error("player size {width}x{height} must be positive and finite")]
    InvalidPlayerSize {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
    /// The spawn point lands on a solid tile.
    #[error("spawn point lands on a solid tile")]
    SpawnBlocked,
}

/// Validated level ready to seed a world.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    /// Load-once layout of every grid.
    pub layout: WorldLayout,
    /// Player placed at the canonical spawn point.
    pub spawn: PlayerState,
}

impl LevelDefinition {
    /// Validates the definition and builds its layout and spawn state.
    pub fn build(&self) -> Result<Level, LevelError> {
        let m = self.metrics;
        let metrics = WorldMetrics::new(
            m.tiles_per_grid_x,
            m.tiles_per_grid_y,
            m.grid_count_x,
            m.grid_count_y,
            m.tile_side_in_world_units,
            m.tile_side_in_pixels,
        )?;

        let count_x = metrics.grid_count_x();
        let count_y = metrics.grid_count_y();
        let mut slots = BTreeMap::new();
        for definition in &self.grids {
            let (x, y) = (definition.x, definition.y);
            if x >= count_x || y >= count_y {
                return Err(LevelError::GridOutOfBounds {
                    x,
                    y,
                    count_x,
                    count_y,
                });
            }

            let grid = TileGrid::from_rows(&definition.rows)
                .map_err(|source| LevelError::Grid { x, y, source })?;
            if slots.insert((y, x), grid).is_some() {
                return Err(LevelError::DuplicateGrid { x, y });
            }
        }

        // Stops at the first gap, so the walk never outgrows the defined grids.
        let mut grids = Vec::with_capacity(slots.len());
        for y in 0..count_y {
            for x in 0..count_x {
                let grid = slots
                    .remove(&(y, x))
                    .ok_or(LevelError::MissingGrid { x, y })?;
                grids.push(grid);
            }
        }

        let layout = WorldLayout::new(metrics, grids)?;

        let PlayerDefinition { width, height } = self.player;
        let valid_size = |value: f32| value.is_finite() && value > 0.0;
        if !valid_size(width) || !valid_size(height) {
            return Err(LevelError::InvalidPlayerSize { width, height });
        }

        let position = layout.canonicalize(self.spawn);
        if !is_empty(&layout, &position) {
            return Err(LevelError::SpawnBlocked);
        }

        tracing::info!(
            grids_x = count_x,
            grids_y = count_y,
            tiles_x = metrics.tiles_per_grid_x(),
            tiles_y = metrics.tiles_per_grid_y(),
            "level built"
        );

        Ok(Level {
            layout,
            spawn: PlayerState {
                position,
                width,
                height,
            },
        })
    }

    /// Two-by-two world of tilemaps joined by doorways.
    #[must_use]
    pub fn builtin() -> Self {
        const TILE_SIDE_IN_WORLD_UNITS: f32 = 1.4;
        const PLAYER_HEIGHT: f32 = 1.4;

        let grids = [
            (0, 0, BUILTIN_NORTH_WEST),
            (1, 0, BUILTIN_NORTH_EAST),
            (0, 1, BUILTIN_SOUTH_WEST),
            (1, 1, BUILTIN_SOUTH_EAST),
        ]
        .into_iter()
        .map(|(x, y, rows)| GridDefinition {
            x,
            y,
            rows: rows.iter().map(|row| row.to_vec()).collect(),
        })
        .collect();

        Self {
            metrics: MetricsDefinition {
                tiles_per_grid_x: BUILTIN_COLUMNS as u32,
                tiles_per_grid_y: BUILTIN_ROWS as u32,
                grid_count_x: 2,
                grid_count_y: 2,
                tile_side_in_world_units: TILE_SIDE_IN_WORLD_UNITS,
                tile_side_in_pixels: 60.0,
            },
            player: PlayerDefinition {
                width: 0.75 * PLAYER_HEIGHT,
                height: PLAYER_HEIGHT,
            },
            spawn: RawPosition {
                grid_x: 0,
                grid_y: 0,
                tile_x: 3,
                tile_y: 3,
                offset_x: 0.5 * TILE_SIDE_IN_WORLD_UNITS,
                offset_y: 0.5 * TILE_SIDE_IN_WORLD_UNITS,
            },
            grids,
        }
    }
}

const BUILTIN_COLUMNS: usize = 17;
const BUILTIN_ROWS: usize = 9;

type BuiltinGrid = [[u32; BUILTIN_COLUMNS]; BUILTIN_ROWS];

// Doorways: row 4 joins west and east grids, column 8 joins north and south.
const BUILTIN_NORTH_WEST: BuiltinGrid = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1],
];

const BUILTIN_NORTH_EAST: BuiltinGrid = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1],
];

const BUILTIN_SOUTH_WEST: BuiltinGrid = [
    [1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const BUILTIN_SOUTH_EAST: BuiltinGrid = [
    [1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];
