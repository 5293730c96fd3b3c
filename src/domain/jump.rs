//! Player jump physics.
//!
//! A jump is a triangular arc over `distance - 1` ticks:
//!   - steps `0..steps` climb by `step_size` each tick
//!   - step `steps` is the apex
//!   - later steps descend by `step_size`
//! where `steps = distance / 2` and `step_size = height / steps`.
//!
//! The trail left behind the head is chosen from the *previous* tick's step,
//! so the drawn trail lags the head by one tick.

use crate::config::{JumpConfig, GRID_ROWS};
use super::tile::Tile;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct JumpState {
    /// Rows above the ground-adjacent row. Fractional.
    pub offset: f32,
    pub step: u32,
    pub prev_step: u32,
    /// +1 while climbing, -1 while falling, 0 before the first jump.
    pub direction: i32,
    pub jumping: bool,
}

impl JumpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick. A request only starts a jump from idle; while a jump
    /// is in flight it is ignored. Returns true on the tick a jump starts.
    pub fn update(&mut self, jump_requested: bool, cfg: &JumpConfig) -> bool {
        self.prev_step = self.step;

        let started = !self.jumping && jump_requested;
        if started {
            self.jumping = true;
        }
        if !self.jumping {
            return false;
        }

        self.direction = if self.step < cfg.steps() { 1 } else { -1 };
        self.offset += cfg.step_size() * self.direction as f32;
        self.step += 1;

        if self.step == cfg.distance - 1 {
            self.step = 0;
            self.jumping = false;
            // Fractional step sizes leave float residue; land exactly.
            self.offset = 0.0;
        }

        started
    }

    /// Grid row currently occupied by the head.
    pub fn head_row(&self) -> usize {
        let ground = (GRID_ROWS - 2) as i32;
        (ground - self.offset as i32).clamp(0, ground) as usize
    }

    /// Trail segment to leave where the head just was.
    pub fn trailing_tile(&self, cfg: &JumpConfig) -> Tile {
        let steps = cfg.steps();
        if self.prev_step == 0 && self.step == 0 {
            Tile::PlayerForward
        } else if self.prev_step < steps {
            Tile::PlayerAscending
        } else if self.prev_step == steps {
            Tile::PlayerJumpTop
        } else {
            Tile::PlayerDescending
        }
    }
}
