//! The step function: advances the world by one tick.
//!
//! Processing order (load-bearing):
//!   1. Score: obstacle under the player column at ground level
//!   2. Jump physics
//!   3. Scroll + stamp head, detecting the collision for the next frame
//!   4. Obstacle spawn into the rightmost column
//!
//! Rendering and the collision stop happen in the engine before `step`.

use crate::config::{GRID_COLS, PLAYER_COLUMN};
use crate::domain::grid::GROUND_ROW;
use crate::domain::tile::Tile;
use super::event::GameEvent;
use super::world::WorldState;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, jump_requested: bool) -> Vec<GameEvent> {
    let mut events = Vec::new();
    world.tick += 1;

    update_score(world, &mut events);
    update_player(world, jump_requested, &mut events);
    update_tiles(world, &mut events);
    update_obstacles(world, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Phases
// ══════════════════════════════════════════════════════════════

/// One point each tick an obstacle sits beneath the airborne player.
fn update_score(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.grid.get(GROUND_ROW, PLAYER_COLUMN) == Tile::Obstacle {
        world.score += 1;
        events.push(GameEvent::Scored { score: world.score });
    }
}

fn update_player(world: &mut WorldState, jump_requested: bool, events: &mut Vec<GameEvent>) {
    if world.jump.update(jump_requested, &world.config.jump) {
        events.push(GameEvent::JumpStarted);
    }
}

fn update_tiles(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let trail = world.jump.trailing_tile(&world.config.jump);
    let row = world.jump.head_row();
    let replaced = world.grid.shift_and_place(row, trail);

    world.colliding = replaced == Tile::Obstacle;
    if world.colliding {
        events.push(GameEvent::Collided { row });
    }
}

fn update_obstacles(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if let Some(height) = world.spawner.tick(&world.config.obstacles, &mut world.rng) {
        world.grid.raise_obstacle(GRID_COLS - 1, height as usize);
        events.push(GameEvent::ObstacleSpawned { height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, GRID_ROWS};
    use crate::domain::grid::FLOOR_ROW;
    use crate::domain::rng::GameRng;
    use crate::domain::spawner::Spawner;

    /// World with the spawner silenced so tests place obstacles by hand.
    fn quiet_world() -> WorldState {
        let mut config = GameConfig::default();
        config.obstacles.chance = 0;
        config.obstacles.max_gap = 100_000;
        let mut w = WorldState::new(config, GameRng::new(11));
        w.spawner = Spawner { last_obstacle_dist: 0 };
        w
    }

    fn head_count(w: &WorldState) -> usize {
        w.grid.count_in_column(PLAYER_COLUMN, |t| t == Tile::PlayerHead)
    }

    fn player_count(w: &WorldState) -> usize {
        w.grid.count_in_column(PLAYER_COLUMN, Tile::is_player)
    }

    #[test]
    fn idle_run_stays_on_ground() {
        let mut w = quiet_world();
        for _ in 0..100 {
            step(&mut w, false);
            assert_eq!(w.jump.offset, 0.0);
            assert_eq!(w.grid.get(GROUND_ROW, PLAYER_COLUMN), Tile::PlayerHead);
            assert_eq!(w.grid.get(GROUND_ROW, PLAYER_COLUMN - 1), Tile::PlayerForward);
        }
        assert_eq!(w.score, 0);
        assert_eq!(w.tick, 100);
    }

    #[test]
    fn one_player_tile_in_column_every_tick() {
        let mut w = WorldState::new(GameConfig::default(), GameRng::new(2));
        for t in 0..2_000 {
            step(&mut w, t % 3 == 0);
            assert_eq!(head_count(&w), 1);
            assert_eq!(player_count(&w), 1);
            assert!(w.grid.floor_intact());
        }
    }

    #[test]
    fn floor_survives_spawns() {
        let mut config = GameConfig::default();
        config.obstacles.min_gap = 0;
        config.obstacles.chance = 100;
        let mut w = WorldState::new(config, GameRng::new(4));
        for _ in 0..500 {
            step(&mut w, true);
            assert!(w.grid.floor_intact());
            for col in 0..GRID_COLS {
                assert_eq!(w.grid.get(FLOOR_ROW, col), Tile::Wall);
            }
        }
    }

    #[test]
    fn requested_jump_follows_arc() {
        let mut w = quiet_world();
        let mut offsets = Vec::new();
        let events = step(&mut w, true);
        assert!(events.contains(&GameEvent::JumpStarted));
        offsets.push(w.jump.offset);
        for _ in 1..10 {
            step(&mut w, false);
            offsets.push(w.jump.offset);
        }
        assert_eq!(offsets, vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
        assert!(!w.jump.jumping);
    }

    #[test]
    fn head_drawn_at_jump_height() {
        let mut w = quiet_world();
        for _ in 0..5 {
            step(&mut w, true);
        }
        assert_eq!(w.grid.get(GROUND_ROW - 5, PLAYER_COLUMN), Tile::PlayerHead);
        // Trail behind the head: prev_step 4 was still climbing.
        assert_eq!(w.grid.get(GROUND_ROW - 4, PLAYER_COLUMN - 1), Tile::PlayerAscending);
        step(&mut w, false);
        assert_eq!(w.grid.get(GROUND_ROW - 4, PLAYER_COLUMN), Tile::PlayerHead);
        assert_eq!(w.grid.get(GROUND_ROW - 5, PLAYER_COLUMN - 1), Tile::PlayerJumpTop);
    }

    #[test]
    fn obstacle_scrolls_into_player() {
        let mut w = quiet_world();
        w.grid.raise_obstacle(GRID_COLS - 1, 2);

        // Column 79 reaches column 20 after 59 shifts.
        let travel = GRID_COLS - 1 - PLAYER_COLUMN;
        for _ in 0..travel - 1 {
            step(&mut w, false);
            assert!(!w.colliding);
        }
        assert_eq!(w.grid.get(GROUND_ROW, PLAYER_COLUMN + 1), Tile::Obstacle);

        let events = step(&mut w, false);
        assert!(w.colliding);
        assert!(events.contains(&GameEvent::Collided { row: GROUND_ROW }));
        assert_eq!(w.grid.get(GROUND_ROW, PLAYER_COLUMN), Tile::PlayerHead);
        assert_eq!(w.grid.get(GROUND_ROW - 1, PLAYER_COLUMN), Tile::Obstacle);

        // One more tick carries the upper cell on to column 19.
        step(&mut w, false);
        assert_eq!(w.grid.get(GROUND_ROW - 1, PLAYER_COLUMN - 1), Tile::Obstacle);
    }

    #[test]
    fn collision_flag_clears_when_path_is_free() {
        let mut w = quiet_world();
        w.grid.set(GROUND_ROW, PLAYER_COLUMN + 1, Tile::Obstacle);
        step(&mut w, false);
        assert!(w.colliding);
        step(&mut w, false);
        assert!(!w.colliding);
    }

    #[test]
    fn jumping_over_obstacle_scores_once() {
        let mut w = quiet_world();
        // Arrives under the player column on the 4th shift.
        w.grid.raise_obstacle(PLAYER_COLUMN + 4, 2);

        let mut scores = Vec::new();
        step(&mut w, true);
        scores.push(w.score);
        for _ in 0..12 {
            step(&mut w, false);
            assert!(!w.colliding);
            scores.push(w.score);
        }
        assert_eq!(w.score, 1);
        assert!(scores.windows(2).all(|p| p[1] >= p[0]));
        // The point lands on the tick after the obstacle arrives under the player.
        assert_eq!(scores[3], 0);
        assert_eq!(scores[4], 1);
    }

    #[test]
    fn scoring_reads_ground_cell_only() {
        let mut w = quiet_world();
        w.grid.set(GROUND_ROW, PLAYER_COLUMN, Tile::Obstacle);
        let events = step(&mut w, false);
        assert_eq!(w.score, 1);
        assert!(events.contains(&GameEvent::Scored { score: 1 }));

        let mut w = quiet_world();
        w.grid.set(GROUND_ROW - 3, PLAYER_COLUMN, Tile::Obstacle);
        step(&mut w, false);
        assert_eq!(w.score, 0);
    }

    #[test]
    fn first_tick_spawns_at_right_edge() {
        let mut w = WorldState::new(GameConfig::default(), GameRng::new(9));
        let events = step(&mut w, false);
        let height = events
            .iter()
            .find_map(|e| match e {
                GameEvent::ObstacleSpawned { height } => Some(*height),
                _ => None,
            })
            .expect("first tick spawns");
        assert!((1..=4).contains(&height));
        let col = GRID_COLS - 1;
        assert_eq!(
            w.grid.count_in_column(col, |t| t == Tile::Obstacle),
            height as usize
        );
        assert_eq!(w.grid.get(GRID_ROWS - 2 - (height as usize - 1), col), Tile::Obstacle);
        assert_eq!(w.spawner.last_obstacle_dist, 0);
    }

    #[test]
    fn obstacles_only_enter_from_the_right() {
        let mut w = WorldState::new(GameConfig::default(), GameRng::new(21));
        let mut prev = w.grid.clone();
        for _ in 0..1_000 {
            step(&mut w, true);
            for row in 0..=GROUND_ROW {
                for col in 0..GRID_COLS - 1 {
                    // An obstacle cell is always the previous right neighbour.
                    if w.grid.get(row, col) == Tile::Obstacle {
                        assert_eq!(prev.get(row, col + 1), Tile::Obstacle);
                    }
                }
            }
            prev = w.grid.clone();
        }
    }
}
