//! Obstacle spawn rules.
//!
//! Spawn when either:
//!   - more than `max_gap` ticks have passed since the last obstacle, or
//!   - more than `min_gap` have passed and a percent roll beats `chance`.

use crate::config::ObstacleConfig;
use super::rng::GameRng;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spawner {
    /// Ticks since the last spawn. Starts at `u32::MAX` so the first tick
    /// always spawns.
    pub last_obstacle_dist: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Spawner { last_obstacle_dist: u32::MAX }
    }

    fn spawn_available(&self, cfg: &ObstacleConfig, rng: &mut GameRng) -> bool {
        if self.last_obstacle_dist > cfg.max_gap {
            return true;
        }
        self.last_obstacle_dist > cfg.min_gap && rng.percent() < cfg.chance
    }

    /// Advance one tick. Returns the height of a new obstacle, if any.
    pub fn tick(&mut self, cfg: &ObstacleConfig, rng: &mut GameRng) -> Option<u32> {
        if self.spawn_available(cfg, rng) {
            self.last_obstacle_dist = 0;
            Some(rng.range_inclusive(cfg.min_height, cfg.max_height))
        } else {
            self.last_obstacle_dist = self.last_obstacle_dist.saturating_add(1);
            None
        }
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner::new()
    }
}
