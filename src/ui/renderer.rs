//! Presentation layer: full-frame text renderer.
//!
//! Every tick the whole frame is rebuilt as one text block:
//!   1. centered score line
//!   2. the grid, one char per tile, one line per row
//!   3. centered instruction line
//!
//! The block is handed to a `Display`, which clears and redraws. There is no
//! diffing; obstacle glyphs are re-rolled on every frame, so nearly every
//! frame differs anyway.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Print, ResetColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::{GRID_COLS, GRID_ROWS};
use crate::domain::grid::Grid;
use crate::domain::rng::GameRng;
use crate::error::GameError;
use crate::sim::world::WorldState;

pub const INSTRUCTIONS: &str = "SPACE TO JUMP. ESC TO QUIT.";

/// Where frames go. The terminal in the game, a recorder in tests.
pub trait Display {
    fn clear(&mut self) -> io::Result<()>;
    /// Write a block of `\n`-terminated lines starting at the top-left.
    fn write_block(&mut self, text: &str) -> io::Result<()>;
}

impl<D: Display + ?Sized> Display for &mut D {
    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }

    fn write_block(&mut self, text: &str) -> io::Result<()> {
        (**self).write_block(text)
    }
}

// ── Frame composition ──

/// Left-pad `text` so it sits in the middle of `width` columns. Text wider
/// than `width` is returned unchanged.
pub fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = (width.max(len) - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Serialize the grid row-major. Obstacles take a fresh random glyph each
/// call.
pub fn grid_text(grid: &Grid, rng: &mut GameRng) -> String {
    let mut out = String::with_capacity(GRID_ROWS * (GRID_COLS + 1));
    for row in grid.rows() {
        for &tile in row.iter() {
            out.push(tile.fixed_glyph().unwrap_or_else(|| rng.obstacle_glyph()));
        }
        out.push('\n');
    }
    out
}

/// The complete text block for one tick.
pub fn compose_frame(world: &mut WorldState) -> String {
    let score = centered(&format!("SCORE: {}", world.score), GRID_COLS);
    let tiles = grid_text(&world.grid, &mut world.rng);
    let help = centered(INSTRUCTIONS, GRID_COLS);
    format!("{score}\n{tiles}{help}\n")
}

pub fn render(world: &mut WorldState, display: &mut impl Display) -> io::Result<()> {
    let frame = compose_frame(world);
    display.clear()?;
    display.write_block(&frame)
}

// ── Terminal display ──

/// Raw mode, alternate screen and cursor visibility.
pub trait TerminalSession {
    fn init(&mut self) -> io::Result<()>;
    fn cleanup(&mut self) -> io::Result<()>;
}

/// Run `play` inside an initialized terminal. The terminal is restored on
/// every exit path, including an `init` that failed halfway.
pub fn with_terminal<T, R, F>(term: &mut T, play: F) -> Result<R, GameError>
where
    T: TerminalSession,
    F: FnOnce(&mut T) -> Result<R, GameError>,
{
    if let Err(e) = term.init() {
        restore(term);
        return Err(e.into());
    }
    let result = play(term);
    restore(term);
    result
}

fn restore(term: &mut impl TerminalSession) {
    if let Err(e) = term.cleanup() {
        log::error!("terminal cleanup failed: {e}");
    }
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
        }
    }
}

impl TerminalSession for Renderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

impl Display for Renderer {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))
    }

    /// Raw mode does not return the carriage on `\n`, so each line is placed
    /// explicitly. Everything is flushed once at the end.
    fn write_block(&mut self, text: &str) -> io::Result<()> {
        for (y, line) in text.lines().enumerate() {
            queue!(self.writer, MoveTo(0, y as u16), Print(line))?;
        }
        self.writer.flush()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{GameConfig, PLAYER_COLUMN};
    use crate::domain::grid::GROUND_ROW;
    use crate::domain::tile::{Tile, OBSTACLE_GLYPHS};

    /// Keeps every frame written to it.
    #[derive(Default)]
    pub(crate) struct RecordingDisplay {
        pub(crate) frames: Vec<String>,
        pub(crate) clears: usize,
    }

    impl Display for RecordingDisplay {
        fn clear(&mut self) -> io::Result<()> {
            self.clears += 1;
            Ok(())
        }

        fn write_block(&mut self, text: &str) -> io::Result<()> {
            self.frames.push(text.to_string());
            Ok(())
        }
    }

    fn world() -> WorldState {
        WorldState::new(GameConfig::default(), GameRng::new(17))
    }

    /// Records setup and teardown calls; `init` can be made to fail.
    #[derive(Default)]
    struct FakeTerminal {
        fail_init: bool,
        inits: usize,
        cleanups: usize,
    }

    impl TerminalSession for FakeTerminal {
        fn init(&mut self) -> io::Result<()> {
            self.inits += 1;
            if self.fail_init {
                return Err(io::Error::new(io::ErrorKind::Unsupported, "no alternate screen"));
            }
            Ok(())
        }

        fn cleanup(&mut self) -> io::Result<()> {
            self.cleanups += 1;
            Ok(())
        }
    }

    #[test]
    fn failed_init_still_restores_terminal() {
        let mut term = FakeTerminal { fail_init: true, ..Default::default() };
        let mut played = false;
        let result = with_terminal(&mut term, |_| {
            played = true;
            Ok(0u32)
        });
        assert!(matches!(result, Err(GameError::Io(_))));
        assert!(!played);
        assert_eq!(term.cleanups, 1);
    }

    #[test]
    fn terminal_restored_after_play() {
        let mut term = FakeTerminal::default();
        assert_eq!(with_terminal(&mut term, |t| Ok(t.inits)).unwrap(), 1);
        assert_eq!(term.cleanups, 1);

        let mut term = FakeTerminal::default();
        let result: Result<u32, _> = with_terminal(&mut term, |_| Err(GameError::AlreadyRunning));
        assert!(matches!(result, Err(GameError::AlreadyRunning)));
        assert_eq!(term.cleanups, 1);
    }

    #[test]
    fn centering_pads_left_only() {
        assert_eq!(centered("ab", 6), "  ab");
        assert_eq!(centered("abc", 6), " abc");
        assert_eq!(centered("too long", 4), "too long");
        assert_eq!(centered("SCORE: 0", GRID_COLS).len(), 36 + 8);
    }

    #[test]
    fn frame_layout() {
        let mut w = world();
        let frame = compose_frame(&mut w);
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines.len(), GRID_ROWS + 2);
        assert_eq!(lines[0].trim_start(), "SCORE: 0");
        assert_eq!(lines[GRID_ROWS + 1].trim_start(), INSTRUCTIONS);
        for row in &lines[1..=GRID_ROWS] {
            assert_eq!(row.chars().count(), GRID_COLS);
        }
        assert_eq!(lines[GRID_ROWS], "W".repeat(GRID_COLS));
        assert_eq!(lines[1 + GROUND_ROW].chars().nth(PLAYER_COLUMN), Some('>'));
        assert!(frame.ends_with('\n'));
    }

    #[test]
    fn trail_glyphs_render() {
        let mut w = world();
        w.grid.set(3, 0, Tile::PlayerAscending);
        w.grid.set(3, 1, Tile::PlayerJumpTop);
        w.grid.set(3, 2, Tile::PlayerDescending);
        w.grid.set(3, 3, Tile::PlayerForward);
        let text = grid_text(&w.grid, &mut w.rng);
        let row = text.lines().nth(3).unwrap();
        assert!(row.starts_with("/_\\-"));
    }

    #[test]
    fn obstacle_glyph_rerolled_each_frame() {
        let mut w = world();
        w.grid.set(5, 40, Tile::Obstacle);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let text = grid_text(&w.grid, &mut w.rng);
            let glyph = text.lines().nth(5).unwrap().chars().nth(40).unwrap();
            assert!(OBSTACLE_GLYPHS.contains(&glyph));
            seen.insert(glyph);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn render_clears_before_writing() {
        let mut w = world();
        w.score = 12;
        let mut display = RecordingDisplay::default();
        render(&mut w, &mut display).unwrap();
        assert_eq!(display.clears, 1);
        assert_eq!(display.frames.len(), 1);
        assert!(display.frames[0].lines().next().unwrap().ends_with("SCORE: 12"));
    }
}
