//! WorldState: the complete snapshot of a running game.
//!
//! Owned by the tick loop alone. The renderer reads `grid` and `score` and
//! borrows `rng` for obstacle glyphs; nothing else touches it.

use crate::config::GameConfig;
use crate::domain::grid::Grid;
use crate::domain::jump::JumpState;
use crate::domain::rng::GameRng;
use crate::domain::spawner::Spawner;

pub struct WorldState {
    pub grid: Grid,
    pub jump: JumpState,
    pub spawner: Spawner,
    pub score: u32,
    /// Set by the last shift-and-place pass.
    pub colliding: bool,
    pub tick: u64,
    pub config: GameConfig,
    pub rng: GameRng,
}

impl WorldState {
    pub fn new(config: GameConfig, rng: GameRng) -> Self {
        WorldState {
            grid: Grid::new(),
            jump: JumpState::new(),
            spawner: Spawner::new(),
            score: 0,
            colliding: false,
            tick: 0,
            config,
            rng,
        }
    }
}
