//! Game tunables.
//!
//! Every value has a compile-time default. An optional `config.toml` next to
//! the executable (or in the CWD) overrides them; missing keys keep the
//! defaults. `[gamepad]` lists button names per action. Grid dimensions
//! and the player column are fixed.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

// ── Fixed geometry ──

pub const GRID_ROWS: usize = 32;
pub const GRID_COLS: usize = 80;
/// Column the player runs in. Never changes during a game.
pub const PLAYER_COLUMN: usize = 20;

// ── Defaults ──

pub const DEFAULT_TICK_MS: u64 = 10;
pub const DEFAULT_JUMP_DISTANCE: u32 = 11;
pub const DEFAULT_JUMP_HEIGHT: u32 = 5;
pub const DEFAULT_MIN_OBSTACLE_HEIGHT: u32 = 1;
pub const DEFAULT_MAX_OBSTACLE_HEIGHT: u32 = DEFAULT_JUMP_HEIGHT - 1;
pub const DEFAULT_MIN_OBSTACLE_GAP: u32 = 11;
pub const DEFAULT_MAX_OBSTACLE_GAP: u32 = 80;
pub const DEFAULT_OBSTACLE_CHANCE: u32 = 25;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub tick_ms: u64,
    pub jump: JumpConfig,
    pub obstacles: ObstacleConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpConfig {
    /// Ticks spanned by a jump, plus one. Odd, greater than 3.
    pub distance: u32,
    /// Peak vertical offset in rows.
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObstacleConfig {
    pub min_height: u32,
    pub max_height: u32,
    pub min_gap: u32,
    pub max_gap: u32,
    /// Percent chance per tick of spawning once `min_gap` is exceeded.
    pub chance: u32,
}

/// Button names per action, e.g. `["A", "Y"]`. Parsed by the gamepad source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamepadConfig {
    pub jump: Vec<String>,
    pub quit: Vec<String>,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        GamepadConfig {
            jump: default_pad_jump(),
            quit: default_pad_quit(),
        }
    }
}

impl JumpConfig {
    /// Ticks from take-off to apex.
    pub fn steps(&self) -> u32 {
        self.distance / 2
    }

    /// Vertical offset gained or lost per jumping tick.
    pub fn step_size(&self) -> f32 {
        self.height as f32 / self.steps() as f32
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_ms: DEFAULT_TICK_MS,
            jump: JumpConfig {
                distance: DEFAULT_JUMP_DISTANCE,
                height: DEFAULT_JUMP_HEIGHT,
            },
            obstacles: ObstacleConfig {
                min_height: DEFAULT_MIN_OBSTACLE_HEIGHT,
                max_height: DEFAULT_MAX_OBSTACLE_HEIGHT,
                min_gap: DEFAULT_MIN_OBSTACLE_GAP,
                max_gap: DEFAULT_MAX_OBSTACLE_GAP,
                chance: DEFAULT_OBSTACLE_CHANCE,
            },
            gamepad: GamepadConfig::default(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    jump: TomlJump,
    #[serde(default)]
    obstacles: TomlObstacles,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlJump {
    #[serde(default = "default_jump_distance")]
    distance: u32,
    #[serde(default = "default_jump_height")]
    height: u32,
}

#[derive(Deserialize, Debug)]
struct TomlObstacles {
    #[serde(default = "default_min_height")]
    min_height: u32,
    #[serde(default = "default_max_height")]
    max_height: u32,
    #[serde(default = "default_min_gap")]
    min_gap: u32,
    #[serde(default = "default_max_gap")]
    max_gap: u32,
    #[serde(default = "default_chance")]
    chance: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_pad_jump")]
    jump: Vec<String>,
    #[serde(default = "default_pad_quit")]
    quit: Vec<String>,
}

fn default_tick_ms() -> u64 { DEFAULT_TICK_MS }
fn default_jump_distance() -> u32 { DEFAULT_JUMP_DISTANCE }
fn default_jump_height() -> u32 { DEFAULT_JUMP_HEIGHT }
fn default_min_height() -> u32 { DEFAULT_MIN_OBSTACLE_HEIGHT }
fn default_max_height() -> u32 { DEFAULT_MAX_OBSTACLE_HEIGHT }
fn default_min_gap() -> u32 { DEFAULT_MIN_OBSTACLE_GAP }
fn default_max_gap() -> u32 { DEFAULT_MAX_OBSTACLE_GAP }
fn default_chance() -> u32 { DEFAULT_OBSTACLE_CHANCE }
fn default_pad_jump() -> Vec<String> { vec!["A".into(), "Y".into()] }
fn default_pad_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_ms: default_tick_ms() }
    }
}

impl Default for TomlJump {
    fn default() -> Self {
        TomlJump {
            distance: default_jump_distance(),
            height: default_jump_height(),
        }
    }
}

impl Default for TomlObstacles {
    fn default() -> Self {
        TomlObstacles {
            min_height: default_min_height(),
            max_height: default_max_height(),
            min_gap: default_min_gap(),
            max_gap: default_max_gap(),
            chance: default_chance(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            jump: default_pad_jump(),
            quit: default_pad_quit(),
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(t: TomlConfig) -> Self {
        GameConfig {
            tick_ms: t.speed.tick_ms,
            jump: JumpConfig {
                distance: t.jump.distance,
                height: t.jump.height,
            },
            obstacles: ObstacleConfig {
                min_height: t.obstacles.min_height,
                max_height: t.obstacles.max_height,
                min_gap: t.obstacles.min_gap,
                max_gap: t.obstacles.max_gap,
                chance: t.obstacles.chance,
            },
            gamepad: GamepadConfig {
                jump: t.gamepad.jump,
                quit: t.gamepad.quit,
            },
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load `config.toml` from the exe directory or CWD.
    /// A missing or unparsable file yields the defaults. Not validated here;
    /// `Engine::new` does that.
    pub fn load() -> Self {
        load_toml(&candidate_dirs())
    }

    /// Parse a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Reject values that would break the jump arc or the spawner.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jump = &self.jump;
        if jump.distance <= 3 || jump.distance % 2 == 0 {
            return Err(ConfigError::JumpDistance(jump.distance));
        }

        // The head row is `GRID_ROWS - 2 - offset`, so the apex must stay >= 0.
        let max_jump = (GRID_ROWS - 2) as u32;
        if jump.height == 0 || jump.height > max_jump {
            return Err(ConfigError::JumpHeight { height: jump.height, max: max_jump });
        }

        let obs = &self.obstacles;
        let limit = (GRID_ROWS - 1) as u32;
        if obs.min_height == 0 || obs.min_height > obs.max_height || obs.max_height > limit {
            return Err(ConfigError::ObstacleHeight {
                min: obs.min_height,
                max: obs.max_height,
                limit,
            });
        }
        if obs.min_gap > obs.max_gap {
            return Err(ConfigError::ObstacleGap { min: obs.min_gap, max: obs.max_gap });
        }
        if obs.chance > 100 {
            return Err(ConfigError::SpawnChance(obs.chance));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        Ok(())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> GameConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match GameConfig::from_toml_str(&text) {
                Ok(cfg) => {
                    log::info!("loaded settings from {}", path.display());
                    return cfg;
                }
                Err(e) => {
                    log::warn!("config.toml parse error: {e}; using default settings");
                    return GameConfig::default();
                }
            },
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
            }
        }
    }
    log::debug!("no config.toml found, using built-in settings");
    GameConfig::default()
}
