#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Tilewalk experience.

use tilewalk_core::{TileGrid, WorldMetrics};
use tilewalk_world::{query, PlayerState, World, WorldLayout};

/// Produces data required to greet the player and frame the first scene.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the grids and metrics the world was loaded with.
    #[must_use]
    pub fn layout<'world>(&self, world: &'world World) -> &'world WorldLayout {
        query::layout(world)
    }

    /// Exposes the world metrics required for rendering.
    #[must_use]
    pub fn metrics<'world>(&self, world: &'world World) -> &'world WorldMetrics {
        query::layout(world).metrics()
    }

    /// Exposes the grid the player currently stands in.
    ///
    /// Returns `None` if the player's grid is missing from the layout.
    #[must_use]
    pub fn active_grid<'world>(&self, world: &'world World) -> Option<&'world TileGrid> {
        let player = query::player(world);
        query::layout(world).grid_of(&player.position).ok()
    }

    /// Exposes the player for presentation purposes.
    #[must_use]
    pub fn player(&self, world: &World) -> PlayerState {
        query::player(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_builtin_world_for_presentation() {
        let world = World::new();
        let bootstrap = Bootstrap;

        assert_eq!(bootstrap.welcome_banner(&world), "Welcome to Tilewalk.");
        assert_eq!(bootstrap.metrics(&world).tiles_per_grid_x(), 17);

        let grid = bootstrap.active_grid(&world).expect("spawn grid exists");
        assert_eq!((grid.columns(), grid.rows()), (17, 9));

        let player = bootstrap.player(&world);
        assert_eq!(player.position.tile_x(), 3);
        assert!((player.height - 1.4).abs() < 1e-6);
    }
}
