#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tilewalk engine.
//!
//! This crate defines the tile-world coordinate system and the message
//! surface that connects adapters, the authoritative world, and pure systems.
//! Adapters submit [`Command`] values describing desired mutations, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values for systems to react to deterministically.

use std::time::Duration;

mod canonical;
mod grid;

pub use canonical::{
    canonicalize, CanonicalPosition, Displacement, MetricsError, RawPosition, WorldMetrics,
};
pub use grid::{GridError, LookupError, TileGrid, TileId};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tilewalk.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player be displaced for the current frame.
    ///
    /// The world commits the move only when every collision probe lands on an
    /// empty tile; otherwise the player stays where it was.
    MovePlayer {
        /// Displacement in world units, already scaled by speed and frame time.
        displacement: Displacement,
    },
    /// Returns the player to the level's spawn point.
    RespawnPlayer,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player committed a move.
    PlayerMoved {
        /// Position held before the move.
        from: CanonicalPosition,
        /// Position held after the move.
        to: CanonicalPosition,
    },
    /// Reports that a move was rejected because a probe hit a solid tile.
    PlayerBlocked {
        /// Position the player keeps.
        at: CanonicalPosition,
        /// Candidate position that failed the collision check.
        attempted: CanonicalPosition,
    },
    /// Confirms that the player was returned to the spawn point.
    PlayerRespawned {
        /// Spawn position now occupied by the player.
        position: CanonicalPosition,
    },
}

#[cfg(test)]
mod tests {
    use super::{Displacement, RawPosition, TileId};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn raw_position_round_trips_through_bincode() {
        assert_round_trip(&RawPosition {
            grid_x: 1,
            grid_y: -2,
            tile_x: 17,
            tile_y: 3,
            offset_x: -0.25,
            offset_y: 90.5,
        });
    }

    #[test]
    fn tile_id_and_displacement_round_trip_through_bincode() {
        assert_round_trip(&TileId::new(7));
        assert_round_trip(&Displacement::new(0.5, -1.25));
    }

    #[test]
    fn zero_tile_is_the_only_empty_tile() {
        assert!(TileId::EMPTY.is_empty());
        assert!(!TileId::WALL.is_empty());
        assert!(!TileId::new(42).is_empty());
    }
}
