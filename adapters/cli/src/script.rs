use thiserror::Error;
use tilewalk_system_movement::ControllerInput;

/// Controller state held for a single scripted frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Frame {
    Up,
    Down,
    Left,
    Right,
    Idle,
}

impl Frame {
    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            '.' => Some(Self::Idle),
            _ => None,
        }
    }

    /// Digital controller input equivalent to this frame.
    pub(crate) const fn input(self) -> ControllerInput {
        match self {
            Self::Up => ControllerInput::digital(true, false, false, false),
            Self::Down => ControllerInput::digital(false, true, false, false),
            Self::Left => ControllerInput::digital(false, false, true, false),
            Self::Right => ControllerInput::digital(false, false, false, true),
            Self::Idle => ControllerInput::digital(false, false, false, false),
        }
    }
}

/// Errors raised while parsing an input script.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ScriptError {
    #[error("unexpected character '{symbol}' at position {position}")]
    UnexpectedCharacter { symbol: char, position: usize },
    #[error("repeat count at position {position} must be positive")]
    ZeroRepeat { position: usize },
    #[error("repeat count at position {position} exceeds {limit} frames")]
    RepeatTooLarge { position: usize, limit: usize },
    #[error("script expands to more than {limit} frames")]
    TooManyFrames { limit: usize },
    #[error("repeat count at the end of the script has no direction")]
    DanglingRepeat,
}

/// Longest script, in frames, that will be expanded.
pub(crate) const MAX_FRAMES: usize = 1_000_000;

/// Expands a script such as `3R2D.L` into one frame per step.
///
/// Whitespace is ignored; a decimal prefix repeats the following symbol.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Frame>, ScriptError> {
    let mut frames = Vec::new();
    let mut repeat: Option<(usize, usize)> = None;

    for (position, symbol) in script.chars().enumerate() {
        if symbol.is_whitespace() {
            continue;
        }

        if let Some(digit) = symbol.to_digit(10) {
            let (start, count) = repeat.unwrap_or((position, 0));
            let count = count * 10 + digit as usize;
            if count > MAX_FRAMES {
                return Err(ScriptError::RepeatTooLarge {
                    position: start,
                    limit: MAX_FRAMES,
                });
            }
            repeat = Some((start, count));
            continue;
        }

        let frame = Frame::from_symbol(symbol)
            .ok_or(ScriptError::UnexpectedCharacter { symbol, position })?;
        let count = match repeat.take() {
            Some((start, 0)) => return Err(ScriptError::ZeroRepeat { position: start }),
            Some((_, count)) => count,
            None => 1,
        };
        if frames.len() + count > MAX_FRAMES {
            return Err(ScriptError::TooManyFrames { limit: MAX_FRAMES });
        }
        frames.extend(std::iter::repeat(frame).take(count));
    }

    if repeat.is_some() {
        return Err(ScriptError::DanglingRepeat);
    }

    Ok(frames)
}
