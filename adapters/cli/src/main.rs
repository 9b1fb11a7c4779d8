#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Tilewalk world headlessly.

mod level_file;
mod script;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use tilewalk_core::{CanonicalPosition, Command, Event};
use tilewalk_rendering::{Scene, TileKind};
use tilewalk_system_bootstrap::Bootstrap;
use tilewalk_system_movement::{Movement, MovementConfig};
use tilewalk_world::{self as world, LevelDefinition, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::script::{parse_script, Frame};

/// Walk a player through a tile world using a scripted input sequence.
#[derive(Debug, Parser)]
#[command(name = "tilewalk", version)]
struct CliArgs {
    /// TOML level definition to load instead of the builtin world.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Input frames: U, D, L, R hold a direction, `.` idles, digits repeat.
    #[arg(long, value_name = "STEPS", default_value = "")]
    script: String,

    /// Simulated duration of every frame in milliseconds.
    #[arg(long = "frame-ms", value_name = "MS", default_value_t = 16)]
    frame_ms: u64,

    /// Player speed in world units per second.
    #[arg(
        long,
        value_name = "UNITS",
        default_value_t = MovementConfig::DEFAULT_SPEED,
        value_parser = parse_speed
    )]
    speed: f32,

    /// Print the grid the player ends in as text.
    #[arg(long)]
    ascii: bool,
}

/// Entry point for the Tilewalk command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let definition = match &args.level {
        Some(path) => level_file::load_level(path)?,
        None => LevelDefinition::builtin(),
    };
    let mut world = World::from_level(&definition).context("level failed validation")?;
    let frames = parse_script(&args.script).context("invalid input script")?;
    let mut movement = Movement::new(MovementConfig {
        speed: args.speed,
        ..MovementConfig::default()
    });

    let bootstrap = Bootstrap;
    println!("{}", bootstrap.welcome_banner(&world));

    let summary = run(
        &mut world,
        &mut movement,
        &frames,
        Duration::from_millis(args.frame_ms),
    );
    info!(
        frames = summary.frames,
        moved = summary.moved,
        blocked = summary.blocked,
        "script finished"
    );

    let player = bootstrap.player(&world);
    println!("position: {}", describe(&player.position));
    println!("moved: {} blocked: {}", summary.moved, summary.blocked);

    if args.ascii {
        let scene = Scene::build(bootstrap.layout(&world), &player, Vec2::ZERO)
            .context("failed to build scene for the player's grid")?;
        print!("{}", ascii_map(&scene));
    }

    Ok(())
}

fn parse_speed(value: &str) -> Result<f32, String> {
    let speed: f32 = value
        .parse()
        .map_err(|error| format!("`{value}` is not a number: {error}"))?;
    if !speed.is_finite() || speed < 0.0 {
        return Err(format!("speed must be finite and non-negative, got {speed}"));
    }
    Ok(speed)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RunSummary {
    frames: usize,
    moved: usize,
    blocked: usize,
}

fn run(world: &mut World, movement: &mut Movement, frames: &[Frame], dt: Duration) -> RunSummary {
    let mut summary = RunSummary {
        frames: frames.len(),
        ..RunSummary::default()
    };

    for frame in frames {
        movement.set_input(frame.input());

        let mut events = Vec::new();
        world::apply(world, Command::Tick { dt }, &mut events);

        let mut commands = Vec::new();
        movement.handle(&events, &mut commands);

        for command in commands {
            events.clear();
            world::apply(world, command, &mut events);
            for event in &events {
                match event {
                    Event::PlayerMoved { .. } => summary.moved += 1,
                    Event::PlayerBlocked { .. } => summary.blocked += 1,
                    _ => {}
                }
            }
        }
    }

    summary
}

fn describe(position: &CanonicalPosition) -> String {
    format!(
        "grid ({}, {}) tile ({}, {}) offset ({:.3}, {:.3})",
        position.grid_x(),
        position.grid_y(),
        position.tile_x(),
        position.tile_y(),
        position.offset_x(),
        position.offset_y(),
    )
}

fn ascii_map(scene: &Scene) -> String {
    let mut map = String::with_capacity(scene.tiles.len() + scene.rows as usize);
    for tile in &scene.tiles {
        map.push(match tile.kind {
            TileKind::Empty => '.',
            TileKind::Solid => '#',
            TileKind::Occupied => '@',
        });
        if tile.column + 1 == scene.columns {
            map.push('\n');
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_counts_moved_and_blocked_frames() {
        let mut world = World::new();
        let mut movement = Movement::default();
        let frames = parse_script("40R").expect("valid script");

        let summary = run(
            &mut world,
            &mut movement,
            &frames,
            Duration::from_millis(100),
        );

        assert_eq!(summary.frames, 40);
        assert_eq!(summary.moved + summary.blocked, 40);
        assert!(summary.blocked > 0);
        assert_eq!(world::query::player(&world).position.tile_x(), 7);
    }

    #[test]
    fn idle_frames_only_advance_time() {
        let mut world = World::new();
        let mut movement = Movement::default();
        let frames = parse_script("5.").expect("valid script");

        let summary = run(&mut world, &mut movement, &frames, Duration::from_millis(16));

        assert_eq!((summary.moved, summary.blocked), (0, 0));
        assert_eq!(world::query::tick_index(&world), 5);
    }

    #[test]
    fn ascii_map_marks_player_tile() {
        let world = World::new();
        let player = world::query::player(&world);
        let scene =
            Scene::build(world::query::layout(&world), &player, Vec2::ZERO).expect("scene");

        let map = ascii_map(&scene);
        let lines: Vec<&str> = map.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines.iter().all(|line| line.len() == 17));
        assert_eq!(lines[0], "#################");
        assert_eq!(lines[3].chars().nth(3), Some('@'));
        assert_eq!(map.matches('@').count(), 1);
    }

    #[test]
    fn speed_must_be_finite_and_non_negative() {
        assert_eq!(parse_speed("2.5"), Ok(2.5));
        assert_eq!(parse_speed("0"), Ok(0.0));
        assert!(parse_speed("NaN").is_err());
        assert!(parse_speed("inf").is_err());
        assert!(parse_speed("-1").is_err());
        assert!(parse_speed("fast").is_err());
    }

    #[test]
    fn speed_flag_is_validated_by_the_parser() {
        let args = CliArgs::try_parse_from(["tilewalk", "--speed", "1.4"]).expect("valid speed");
        assert_eq!(args.speed, 1.4);

        assert!(CliArgs::try_parse_from(["tilewalk", "--speed", "NaN"]).is_err());
        assert!(CliArgs::try_parse_from(["tilewalk", "--speed=-2"]).is_err());
    }

    #[test]
    fn describe_formats_every_component() {
        let world = World::new();
        let position = world::query::player(&world).position;

        assert_eq!(
            describe(&position),
            "grid (0, 0) tile (3, 3) offset (0.700, 0.700)"
        );
    }
}
