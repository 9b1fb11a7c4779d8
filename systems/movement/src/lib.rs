#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system that turns controller input into player displacements.

use tilewalk_core::{Command, Displacement, Event};

/// Controller state sampled by the platform layer for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerInput {
    /// Whether the stick values should be used instead of the buttons.
    pub is_analog: bool,
    /// Horizontal stick position at the end of the frame, in `[-1, 1]`.
    pub stick_x: f32,
    /// Vertical stick position at the end of the frame, in `[-1, 1]`; positive is down.
    pub stick_y: f32,
    /// Up button held.
    pub up: bool,
    /// Down button held.
    pub down: bool,
    /// Left button held.
    pub left: bool,
    /// Right button held.
    pub right: bool,
}

impl ControllerInput {
    /// Digital input with the provided buttons held.
    #[must_use]
    pub const fn digital(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            is_analog: false,
            stick_x: 0.0,
            stick_y: 0.0,
            up,
            down,
            left,
            right,
        }
    }

    /// Analog input with the provided stick position.
    #[must_use]
    pub const fn analog(stick_x: f32, stick_y: f32) -> Self {
        Self {
            is_analog: true,
            stick_x,
            stick_y,
            up: false,
            down: false,
            left: false,
            right: false,
        }
    }
}

/// Tuning for converting input into displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementConfig {
    /// Player speed in world units per second.
    pub speed: f32,
    /// Stick magnitude below which an axis is treated as centered.
    pub dead_zone: f32,
}

impl MovementConfig {
    /// Default player speed in world units per second.
    pub const DEFAULT_SPEED: f32 = 2.0;

    /// Default stick dead zone.
    pub const DEFAULT_DEAD_ZONE: f32 = 0.1;
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: Self::DEFAULT_SPEED,
            dead_zone: Self::DEFAULT_DEAD_ZONE,
        }
    }
}

/// Pure system that reacts to world events and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    config: MovementConfig,
    input: ControllerInput,
}

impl Movement {
    /// Creates a movement system with the provided tuning.
    #[must_use]
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            input: ControllerInput::default(),
        }
    }

    /// Records the controller state used for subsequent ticks.
    pub fn set_input(&mut self, input: ControllerInput) {
        self.input = input;
    }

    /// Consumes world events and emits one move command per advanced tick.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let (x, y) = resolve_direction(&self.input, self.config.dead_zone);
        if x == 0.0 && y == 0.0 {
            return;
        }

        for event in events {
            let Event::TimeAdvanced { dt } = event else {
                continue;
            };

            let distance = self.config.speed * dt.as_secs_f32();
            let displacement = Displacement::new(x * distance, y * distance);
            if !displacement.is_zero() {
                out.push(Command::MovePlayer { displacement });
            }
        }
    }
}

/// Resolves controller input into a per-axis direction in `[-1, 1]`.
///
/// Opposing buttons cancel out. Analog axes are clamped and zeroed inside the
/// dead zone.
#[must_use]
pub fn resolve_direction(input: &ControllerInput, dead_zone: f32) -> (f32, f32) {
    if input.is_analog {
        return (
            analog_axis(input.stick_x, dead_zone),
            analog_axis(input.stick_y, dead_zone),
        );
    }

    (
        button_axis(input.left, input.right),
        button_axis(input.up, input.down),
    )
}

fn button_axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

fn analog_axis(value: f32, dead_zone: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let value = value.clamp(-1.0, 1.0);
    if value.abs() < dead_zone {
        0.0
    } else {
        value
    }
}
