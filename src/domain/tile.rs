//! Tile types and their glyphs.
//! Tiles are stateless tags: the grid does not track which obstacle or
//! trail segment a cell belongs to.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Obstacle,
    PlayerHead,
    PlayerAscending,
    PlayerDescending,
    PlayerForward,
    PlayerJumpTop,
}

/// Obstacles pick one of these every time they are drawn.
pub const OBSTACLE_GLYPHS: [char; 4] = ['#', '+', '?', '!'];

impl Tile {
    /// Glyph for tiles with a fixed appearance. `None` for obstacles.
    pub fn fixed_glyph(self) -> Option<char> {
        match self {
            Tile::Empty => Some(' '),
            Tile::Wall => Some('W'),
            Tile::PlayerHead => Some('>'),
            Tile::PlayerAscending => Some('/'),
            Tile::PlayerDescending => Some('\\'),
            Tile::PlayerForward => Some('-'),
            Tile::PlayerJumpTop => Some('_'),
            Tile::Obstacle => None,
        }
    }

    /// Head or any trail segment.
    #[cfg(test)]
    pub fn is_player(self) -> bool {
        matches!(
            self,
            Tile::PlayerHead
                | Tile::PlayerAscending
                | Tile::PlayerDescending
                | Tile::PlayerForward
                | Tile::PlayerJumpTop
        )
    }
}
