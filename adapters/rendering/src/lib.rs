#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tilewalk adapters.

use glam::Vec2;
use thiserror::Error;
use tilewalk_core::{CanonicalPosition, WorldMetrics};
use tilewalk_world::{PlayerState, WorldLayout};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque gray with every channel set to `level`.
    #[must_use]
    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level, 1.0)
    }
}

/// How a tile should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// Walkable tile.
    Empty,
    /// Any non-zero tile.
    Solid,
    /// The tile the player's feet currently occupy.
    Occupied,
}

impl TileKind {
    /// Fill color used for this kind of tile.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Empty => Color::gray(0.5),
            Self::Solid => Color::gray(1.0),
            Self::Occupied => Color::gray(0.0),
        }
    }
}

/// Screen-space rectangle for a single tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileRect {
    /// Column of the tile within its grid.
    pub column: u32,
    /// Row of the tile within its grid.
    pub row: u32,
    /// Top-left corner in pixels.
    pub min: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
    /// Presentation category of the tile.
    pub kind: TileKind,
    /// Fill color.
    pub color: Color,
}

/// Screen-space rectangle for the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerRect {
    /// Top-left corner in pixels.
    pub min: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

impl PlayerRect {
    /// Color the player is drawn with.
    pub const COLOR: Color = Color::from_rgb_u8(255, 255, 0);

    /// Point the player's position maps to: the bottom-center of the rectangle.
    #[must_use]
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.min.x + 0.5 * self.size.x, self.min.y + self.size.y)
    }
}

/// Scene description for the grid the player currently occupies.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid coordinate being shown.
    pub grid: (i32, i32),
    /// Columns in the shown grid.
    pub columns: u32,
    /// Rows in the shown grid.
    pub rows: u32,
    /// One rectangle per tile in row-major order.
    pub tiles: Vec<TileRect>,
    /// Rectangle covering the player.
    pub player: PlayerRect,
}

impl Scene {
    /// Builds the scene for the grid under the player, anchored at `origin` in pixels.
    pub fn build(
        layout: &WorldLayout,
        player: &PlayerState,
        origin: Vec2,
    ) -> Result<Self, RenderingError> {
        let position = player.position;
        let grid = layout
            .grid_of(&position)
            .map_err(|_| RenderingError::MissingGrid {
                x: position.grid_x(),
                y: position.grid_y(),
            })?;
        let metrics = layout.metrics();
        let side = metrics.tile_side_in_pixels();
        let occupied = (position.tile_x(), position.tile_y());

        let tiles = grid
            .iter()
            .map(|(column, row, tile)| {
                let kind = if (column as i32, row as i32) == occupied {
                    TileKind::Occupied
                } else if tile.is_empty() {
                    TileKind::Empty
                } else {
                    TileKind::Solid
                };
                TileRect {
                    column,
                    row,
                    min: origin + Vec2::new(column as f32, row as f32) * side,
                    size: Vec2::splat(side),
                    kind,
                    color: kind.color(),
                }
            })
            .collect();

        let size = Vec2::new(player.width, player.height) * metrics.pixels_per_world_unit();
        let anchor = pixel_position(metrics, &position, origin);
        let player = PlayerRect {
            min: Vec2::new(anchor.x - 0.5 * size.x, anchor.y - size.y),
            size,
            color: PlayerRect::COLOR,
        };

        Ok(Self {
            grid: (position.grid_x(), position.grid_y()),
            columns: grid.columns(),
            rows: grid.rows(),
            tiles,
            player,
        })
    }

    /// Returns the tile rectangle at the provided grid-local coordinate.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<&TileRect> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.tiles.get(row as usize * self.columns as usize + column as usize)
    }

    /// Pixel dimensions covered by the tiles.
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        self.tiles.first().map_or(Vec2::ZERO, |tile| {
            Vec2::new(self.columns as f32, self.rows as f32) * tile.size
        })
    }
}

/// Converts a canonical position into pixels within its grid.
///
/// `origin` is the pixel location of the grid's top-left corner.
#[must_use]
pub fn pixel_position(
    metrics: &WorldMetrics,
    position: &CanonicalPosition,
    origin: Vec2,
) -> Vec2 {
    let tile = Vec2::new(position.tile_x() as f32, position.tile_y() as f32);
    let offset = Vec2::new(position.offset_x(), position.offset_y());
    origin + tile * metrics.tile_side_in_pixels() + offset * metrics.pixels_per_world_unit()
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// The player's grid is not part of the layout.
    #[error("grid ({x}, {y}) is missing from the layout")]
    MissingGrid {
        /// Grid column that was requested.
        x: i32,
        /// Grid row that was requested.
        y: i32,
    },
}
