//! Per-frame player movement with three-point collision sampling.

use tilewalk_core::{CanonicalPosition, Displacement};

use crate::{collision::is_empty, layout::WorldLayout};

/// Persistent player state carried across frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    /// Committed position of the player's feet.
    pub position: CanonicalPosition,
    /// Width of the player's bounding box in world units.
    pub width: f32,
    /// Height of the player's bounding box in world units.
    pub height: f32,
}

/// Result of attempting a single movement step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// All probes were empty; the candidate position should be committed.
    Moved {
        /// Position before the step.
        from: CanonicalPosition,
        /// Candidate position that passed every probe.
        to: CanonicalPosition,
    },
    /// At least one probe hit a solid tile; the player keeps its position.
    Blocked {
        /// Candidate position that failed the check.
        attempted: CanonicalPosition,
    },
}

/// Evaluates one frame of player displacement against the layout.
///
/// The candidate is sampled at its center and at both horizontal edges of the
/// player's width. The step is accepted or rejected as a whole; there is no
/// sliding along walls.
#[must_use]
pub fn step_player(
    layout: &WorldLayout,
    player: &PlayerState,
    displacement: Displacement,
) -> StepOutcome {
    let candidate = layout.canonicalize(player.position.displaced(displacement));
    let half_width = 0.5 * player.width;
    let left = layout.canonicalize(candidate.displaced(Displacement::new(-half_width, 0.0)));
    let right = layout.canonicalize(candidate.displaced(Displacement::new(half_width, 0.0)));

    if is_empty(layout, &candidate) && is_empty(layout, &left) && is_empty(layout, &right) {
        StepOutcome::Moved {
            from: player.position,
            to: candidate,
        }
    } else {
        StepOutcome::Blocked {
            attempted: candidate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewalk_core::{RawPosition, TileGrid, WorldMetrics};

    // Corridor with a wall at column 4 and a pillar at column 1.
    fn layout() -> WorldLayout {
        let metrics = WorldMetrics::new(6, 3, 1, 1, 60.0, 60.0).expect("valid metrics");
        let grid = TileGrid::from_rows(&[
            [1_u32, 1, 1, 1, 1, 1],
            [0, 1, 0, 0, 1, 0],
            [1, 1, 1, 1, 1, 1],
        ])
        .expect("valid grid");
        WorldLayout::new(metrics, vec![grid]).expect("valid layout")
    }

    fn player(layout: &WorldLayout, tile_x: i32, offset_x: f32, width: f32) -> PlayerState {
        PlayerState {
            position: layout.canonicalize(RawPosition {
                tile_x,
                tile_y: 1,
                offset_x,
                offset_y: 30.0,
                ..RawPosition::default()
            }),
            width,
            height: 60.0,
        }
    }

    #[test]
    fn move_into_empty_tile_is_accepted() {
        let layout = layout();
        let player = player(&layout, 2, 30.0, 20.0);

        let outcome = step_player(&layout, &player, Displacement::new(60.0, 0.0));

        let StepOutcome::Moved { from, to } = outcome else {
            panic!("expected the move to be accepted, got {outcome:?}");
        };
        assert_eq!(from, player.position);
        assert_eq!((to.tile_x(), to.tile_y()), (3, 1));
        assert!((to.offset_x() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn move_into_solid_tile_is_rejected() {
        let layout = layout();
        let player = player(&layout, 3, 30.0, 20.0);

        let outcome = step_player(&layout, &player, Displacement::new(60.0, 0.0));

        let StepOutcome::Blocked { attempted } = outcome else {
            panic!("expected the move to be rejected, got {outcome:?}");
        };
        assert_eq!((attempted.tile_x(), attempted.tile_y()), (4, 1));
    }

    #[test]
    fn edge_probe_blocks_when_center_is_clear() {
        let layout = layout();
        // Center lands at column 3 offset 10; the right edge reaches column 4.
        let player = player(&layout, 3, 0.0, 120.0);

        let outcome = step_player(&layout, &player, Displacement::new(10.0, 0.0));

        assert!(matches!(outcome, StepOutcome::Blocked { .. }));
    }

    #[test]
    fn left_edge_probe_blocks_against_pillar() {
        let layout = layout();
        let player = player(&layout, 2, 40.0, 60.0);

        let outcome = step_player(&layout, &player, Displacement::new(-20.0, 0.0));

        assert!(matches!(outcome, StepOutcome::Blocked { .. }));
    }

    #[test]
    fn vertical_move_into_wall_row_is_rejected() {
        let layout = layout();
        let player = player(&layout, 2, 30.0, 20.0);

        let outcome = step_player(&layout, &player, Displacement::new(0.0, -40.0));

        assert!(matches!(outcome, StepOutcome::Blocked { .. }));
    }

    fn two_grid_layout(east_doorway: u32) -> WorldLayout {
        let metrics = WorldMetrics::new(3, 3, 2, 1, 60.0, 60.0).expect("valid metrics");
        let west = TileGrid::from_rows(&[[1_u32, 1, 1], [1, 0, 0], [1, 1, 1]]).expect("grid");
        let east =
            TileGrid::from_rows(&[[1_u32, 1, 1], [east_doorway, 0, 1], [1, 1, 1]]).expect("grid");
        WorldLayout::new(metrics, vec![west, east]).expect("valid layout")
    }

    #[test]
    fn right_edge_probe_checks_the_neighbouring_grid() {
        let blocked = two_grid_layout(1);
        let player = player(&blocked, 2, 30.0, 60.0);
        let displacement = Displacement::new(10.0, 0.0);

        let candidate = blocked.canonicalize(player.position.displaced(displacement));
        let right_edge = blocked.canonicalize(candidate.displaced(Displacement::new(30.0, 0.0)));
        assert_eq!((candidate.grid_x(), candidate.tile_x()), (0, 2));
        assert_eq!((right_edge.grid_x(), right_edge.tile_x()), (1, 0));
        assert!(matches!(
            step_player(&blocked, &player, displacement),
            StepOutcome::Blocked { .. }
        ));

        let open = two_grid_layout(0);
        let outcome = step_player(&open, &player, displacement);
        let StepOutcome::Moved { to, .. } = outcome else {
            panic!("expected the doorway to be open, got {outcome:?}");
        };
        assert_eq!((to.grid_x(), to.tile_x()), (0, 2));
        assert!((to.offset_x() - 40.0).abs() < 1e-4);
    }

    #[test]
    fn zero_displacement_keeps_position() {
        let layout = layout();
        let player = player(&layout, 2, 30.0, 20.0);

        let outcome = step_player(&layout, &player, Displacement::ZERO);

        assert_eq!(
            outcome,
            StepOutcome::Moved {
                from: player.position,
                to: player.position,
            }
        );
    }
}
