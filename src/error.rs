//! Error types for the engine and its configuration.

use std::fmt;
use std::io;

/// A configuration value that would produce a broken game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Jump distance must be odd and greater than 3.
    JumpDistance(u32),
    /// Jump height must be at least 1 and fit under the top row.
    JumpHeight { height: u32, max: u32 },
    /// Obstacle height bounds must satisfy `1 <= min <= max <= limit`.
    ObstacleHeight { min: u32, max: u32, limit: u32 },
    /// Gap bounds must satisfy `min <= max`.
    ObstacleGap { min: u32, max: u32 },
    /// Spawn chance is a percentage.
    SpawnChance(u32),
    TickInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::JumpDistance(d) => {
                write!(f, "jump distance must be odd and greater than 3 (got {d})")
            }
            ConfigError::JumpHeight { height, max } => {
                write!(f, "jump height must be between 1 and {max} (got {height})")
            }
            ConfigError::ObstacleHeight { min, max, limit } => write!(
                f,
                "obstacle heights must satisfy 1 <= min <= max <= {limit} (got min {min}, max {max})"
            ),
            ConfigError::ObstacleGap { min, max } => write!(
                f,
                "minimum obstacle gap {min} exceeds maximum gap {max}"
            ),
            ConfigError::SpawnChance(c) => {
                write!(f, "obstacle spawn chance is a percentage, got {c}")
            }
            ConfigError::TickInterval => write!(f, "tick interval must be at least 1 ms"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub enum GameError {
    /// `Engine::run` was called while a run was already active.
    AlreadyRunning,
    Config(ConfigError),
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AlreadyRunning => write!(f, "game loop is already running"),
            GameError::Config(e) => write!(f, "invalid configuration: {e}"),
            GameError::Io(e) => write!(f, "terminal I/O failed: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::AlreadyRunning => None,
            GameError::Config(e) => Some(e),
            GameError::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        GameError::Config(e)
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}
