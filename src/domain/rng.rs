//! The game's single source of randomness.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::tile::OBSTACLE_GLYPHS;

/// Uniform integer generator shared by the spawner and the renderer.
pub struct GameRng(StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Seed from the wall clock. Called once per process.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        log::debug!("rng seeded with {seed}");
        Self::new(seed)
    }

    /// Uniform draw in `[0, 100)`.
    pub fn percent(&mut self) -> u32 {
        self.0.gen_range(0..100)
    }

    /// Uniform draw in `[min, max]`.
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        self.0.gen_range(min..=max)
    }

    pub fn obstacle_glyph(&mut self) -> char {
        OBSTACLE_GLYPHS[self.0.gen_range(0..OBSTACLE_GLYPHS.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.percent(), b.percent());
        }
    }

    #[test]
    fn draws_stay_in_bounds() {
        let mut rng = GameRng::new(99);
        for _ in 0..1000 {
            assert!(rng.percent() < 100);
            let h = rng.range_inclusive(1, 4);
            assert!((1..=4).contains(&h));
            assert!(OBSTACLE_GLYPHS.contains(&rng.obstacle_glyph()));
        }
    }

    #[test]
    fn every_glyph_eventually_drawn() {
        let mut rng = GameRng::new(3);
        let mut seen = [false; OBSTACLE_GLYPHS.len()];
        for _ in 0..500 {
            let g = rng.obstacle_glyph();
            let idx = OBSTACLE_GLYPHS.iter().position(|&c| c == g).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
