//! The fixed-size tile grid.
//!
//! Row-major, `GRID_ROWS × GRID_COLS`. The bottom row is the floor: it is
//! filled with `Wall` at construction and nothing writes to it afterwards.
//! Every other row scrolls one column left per tick.

use crate::config::{GRID_COLS, GRID_ROWS, PLAYER_COLUMN};
use super::tile::Tile;

pub const FLOOR_ROW: usize = GRID_ROWS - 1;
/// Row the player rests on when not jumping.
pub const GROUND_ROW: usize = GRID_ROWS - 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [[Tile; GRID_COLS]; GRID_ROWS],
}

impl Grid {
    /// Empty sky, wall floor, head resting at the player column.
    pub fn new() -> Self {
        let mut cells = [[Tile::Empty; GRID_COLS]; GRID_ROWS];
        cells[FLOOR_ROW] = [Tile::Wall; GRID_COLS];
        cells[GROUND_ROW][PLAYER_COLUMN] = Tile::PlayerHead;
        Grid { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row][col]
    }

    /// Write a tile above the floor. Writes to the floor row are dropped.
    #[cfg(test)]
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        if row < FLOOR_ROW {
            self.cells[row][col] = tile;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile; GRID_COLS]> {
        self.cells.iter()
    }

    /// Fill `height` cells of `col` upward from the ground row.
    pub fn raise_obstacle(&mut self, col: usize, height: usize) {
        let top = GRID_ROWS.saturating_sub(1 + height);
        for row in top..FLOOR_ROW {
            self.cells[row][col] = Tile::Obstacle;
        }
    }

    /// Scroll every non-floor row one column left, then stamp the head.
    ///
    /// A cell whose right neighbour held the head receives `trail` instead of
    /// the head itself. The rightmost column is cleared. The head is then
    /// written at (`head_row`, `PLAYER_COLUMN`); the tile it replaced is
    /// returned so the caller can detect a collision.
    pub fn shift_and_place(&mut self, head_row: usize, trail: Tile) -> Tile {
        for row in self.cells[..FLOOR_ROW].iter_mut() {
            for col in 0..GRID_COLS - 1 {
                let ahead = row[col + 1];
                row[col] = if ahead == Tile::PlayerHead { trail } else { ahead };
            }
            row[GRID_COLS - 1] = Tile::Empty;
        }

        let row = head_row.min(GROUND_ROW);
        std::mem::replace(&mut self.cells[row][PLAYER_COLUMN], Tile::PlayerHead)
    }

    #[cfg(test)]
    pub fn floor_intact(&self) -> bool {
        self.cells[FLOOR_ROW].iter().all(|&t| t == Tile::Wall)
    }

    #[cfg(test)]
    pub fn count_in_column(&self, col: usize, pred: impl Fn(Tile) -> bool) -> usize {
        self.cells.iter().filter(|row| pred(row[col])).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new()
    }
}
