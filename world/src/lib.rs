#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tilewalk.

pub mod collision;
pub mod layout;
pub mod level;
pub mod movement;

use tilewalk_core::{Command, Event, WELCOME_BANNER};

pub use layout::{LayoutError, WorldLayout};
pub use level::{Level, LevelDefinition, LevelError};
pub use movement::{step_player, PlayerState, StepOutcome};

/// Represents the authoritative Tilewalk world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    layout: WorldLayout,
    spawn: PlayerState,
    player: PlayerState,
    tick_index: u64,
}

impl World {
    /// Creates a new world seeded with the builtin level.
    ///
    /// # Panics
    ///
    /// Panics if the builtin level fails validation. The builtin data is
    /// covered by tests, so this only fires if those constants are edited
    /// into an invalid shape. Use [`World::from_level`] for untrusted data.
    #[must_use]
    pub fn new() -> Self {
        let level = LevelDefinition::builtin();
        match Self::from_level(&level) {
            Ok(world) => world,
            Err(error) => unreachable!("builtin level failed validation: {error}"),
        }
    }

    /// Creates a world from a level definition, validating it first.
    pub fn from_level(definition: &LevelDefinition) -> Result<Self, LevelError> {
        let Level { layout, spawn } = definition.build()?;
        Ok(Self {
            banner: WELCOME_BANNER,
            layout,
            spawn,
            player: spawn,
            tick_index: 0,
        })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { displacement } => {
            match step_player(&world.layout, &world.player, displacement) {
                StepOutcome::Moved { from, to } => {
                    world.player.position = to;
                    tracing::debug!(tick = world.tick_index, ?to, "player moved");
                    out_events.push(Event::PlayerMoved { from, to });
                }
                StepOutcome::Blocked { attempted } => {
                    tracing::debug!(tick = world.tick_index, ?attempted, "player blocked");
                    out_events.push(Event::PlayerBlocked {
                        at: world.player.position,
                        attempted,
                    });
                }
            }
        }
        Command::RespawnPlayer => {
            world.player = world.spawn;
            out_events.push(Event::PlayerRespawned {
                position: world.player.position,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{PlayerState, World, WorldLayout};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's grids and metrics.
    #[must_use]
    pub fn layout(world: &World) -> &WorldLayout {
        &world.layout
    }

    /// Snapshot of the player's committed state.
    #[must_use]
    pub fn player(world: &World) -> PlayerState {
        world.player
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
