use std::time::Duration;

use tilewalk_core::{Command, Event};
use tilewalk_system_movement::{ControllerInput, Movement};
use tilewalk_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(100);

#[test]
fn deterministic_replay_produces_expected_snapshot() {
    let first = replay(&scripted_inputs());
    let second = replay(&scripted_inputs());

    assert_eq!(first, second, "replay diverged between runs");

    assert_eq!(first.tick_index, 35);
    assert_eq!(first.moved(), 28);
    assert_eq!(first.blocked(), 7);

    // Right 2.0, down until row 4 blocks at 5.5, up 1.0, left 2.0.
    let (grid, tile, offset) = first.final_position;
    assert_eq!(grid, (0, 0));
    assert_eq!(tile, (3, 3));
    assert!((offset.0 - 0.7).abs() < 1e-3, "offset x {}", offset.0);
    assert!((offset.1 - 0.3).abs() < 1e-3, "offset y {}", offset.1);
}

#[test]
fn respawn_after_replay_returns_to_spawn() {
    let mut world = World::new();
    let spawn = query::player(&world).position;
    let _ = replay_into(&mut world, &scripted_inputs());

    let mut events = Vec::new();
    world::apply(&mut world, Command::RespawnPlayer, &mut events);

    assert_eq!(query::player(&world).position, spawn);
}

fn replay(inputs: &[(ControllerInput, usize)]) -> ReplayOutcome {
    let mut world = World::new();
    let events = replay_into(&mut world, inputs);
    let position = query::player(&world).position;

    ReplayOutcome {
        tick_index: query::tick_index(&world),
        final_position: (
            (position.grid_x(), position.grid_y()),
            (position.tile_x(), position.tile_y()),
            (position.offset_x(), position.offset_y()),
        ),
        events,
    }
}

fn replay_into(world: &mut World, inputs: &[(ControllerInput, usize)]) -> Vec<Event> {
    let mut movement = Movement::default();
    let mut log = Vec::new();

    for (input, frames) in inputs {
        movement.set_input(*input);
        for _ in 0..*frames {
            let mut events = Vec::new();
            world::apply(world, Command::Tick { dt: FRAME }, &mut events);
            log.extend(events.iter().cloned());
            process_movement(world, &mut movement, events, &mut log);
        }
    }

    log
}

fn process_movement(
    world: &mut World,
    movement: &mut Movement,
    pending_events: Vec<Event>,
    log: &mut Vec<Event>,
) {
    let mut events = pending_events;

    loop {
        if events.is_empty() {
            break;
        }

        let mut commands = Vec::new();
        movement.handle(&events, &mut commands);

        if commands.is_empty() {
            break;
        }

        events.clear();
        for command in commands {
            let mut generated_events = Vec::new();
            world::apply(world, command, &mut generated_events);
            log.extend(generated_events.iter().cloned());
            events.extend(generated_events);
        }
    }
}

fn scripted_inputs() -> Vec<(ControllerInput, usize)> {
    vec![
        (ControllerInput::digital(false, false, false, true), 10),
        (ControllerInput::digital(false, true, false, false), 10),
        (ControllerInput::digital(true, false, false, false), 5),
        (ControllerInput::digital(false, false, true, false), 10),
    ]
}

type PositionRecord = ((i32, i32), (i32, i32), (f32, f32));

#[derive(Clone, Debug, PartialEq)]
struct ReplayOutcome {
    tick_index: u64,
    final_position: PositionRecord,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn moved(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::PlayerMoved { .. }))
            .count()
    }

    fn blocked(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::PlayerBlocked { .. }))
            .count()
    }
}
