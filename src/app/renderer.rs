use std::{fmt, io::Write};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Direction, Grid, MazeEvent},
};

/// What a single screen slot shows. The screen is a (2 * cols + 1) x (2 * rows + 1)
/// lattice: cells sit on odd positions, the edges between them on the slots in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Wall,
    Empty,
    Entrance,
    Exit,
    /// Part of the route being walked
    Route,
    /// A step that was undone
    Backtrack,
    Player,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Wall => "⬜".with(Color::White),
            Glyph::Empty => "  ".with(Color::Reset),
            Glyph::Entrance => "🟩".with(Color::Green),
            Glyph::Exit => "🟥".with(Color::Red),
            Glyph::Route => "🟨".with(Color::Yellow),
            Glyph::Backtrack => "▒▒".with(Color::DarkGrey),
            Glyph::Player => "🟡".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Terminal columns and rows needed to show a `num_cols` x `num_rows` maze plus
/// a status line. Fails if that is more than a terminal can address.
pub fn required_size_for(num_cols: u16, num_rows: u16) -> Result<(u16, u16)> {
    let width = (u32::from(num_cols) * 2 + 1) * u32::from(Glyph::WIDTH);
    let height = u32::from(num_rows) * 2 + 1 + 1;
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(MazeError::Config(format!(
            "a {}x{} maze needs a {}x{} terminal, which is too large to draw",
            num_cols, num_rows, width, height
        ))),
    }
}

/// Screen slot of a cell.
pub fn cell_slot(coord: Coord) -> (u16, u16) {
    (coord.0 * 2 + 1, coord.1 * 2 + 1)
}

/// Screen slot of the edge between `coord` and its neighbor in `direction`.
pub fn edge_slot(coord: Coord, direction: Direction) -> (u16, u16) {
    let (x, y) = cell_slot(coord);
    let (dx, dy) = direction.offset();
    ((x as i32 + dx) as u16, (y as i32 + dy) as u16)
}

/// Direction from `from` to the adjacent cell `to`.
fn direction_between(from: Coord, to: Coord) -> Option<Direction> {
    Direction::ALL.into_iter().find(|d| {
        let (dx, dy) = d.offset();
        from.0 as i32 + dx == to.0 as i32 && from.1 as i32 + dy == to.1 as i32
    })
}

/// Draws maze events onto a terminal-like writer.
pub struct Renderer<W: Write> {
    out: W,
    /// Screen size in slots (width, height)
    slots: (u16, u16),
    exit: Coord,
    /// Draw a player marker at the head of each move (manual mode)
    show_player: bool,
}

impl<W: Write> Renderer<W> {
    /// Fails with [`MazeError::Config`] if the grid is too large for terminal coordinates.
    pub fn new(out: W, grid: &Grid, show_player: bool) -> Result<Self> {
        let (num_cols, num_rows) = grid.dimensions();
        // Slot maths below cannot overflow once the screen size fits in u16
        required_size_for(num_cols, num_rows)?;
        Ok(Self {
            out,
            slots: (num_cols * 2 + 1, num_rows * 2 + 1),
            exit: (num_cols - 1, num_rows - 1),
            show_player,
        })
    }

    /// Terminal columns and rows needed to show the maze plus a status line.
    pub fn required_size(&self) -> (u16, u16) {
        (self.slots.0 * Glyph::WIDTH, self.slots.1 + 1)
    }

    fn put(&mut self, slot: (u16, u16), glyph: Glyph) -> std::io::Result<()> {
        if slot.0 >= self.slots.0 || slot.1 >= self.slots.1 {
            // Out of bounds, skip rendering
            return Ok(());
        }
        queue!(
            self.out,
            cursor::MoveTo(slot.0 * Glyph::WIDTH, slot.1),
            style::Print(glyph)
        )
    }

    fn put_cell(&mut self, coord: Coord, glyph: Glyph) -> std::io::Result<()> {
        let glyph = if coord == self.exit { Glyph::Exit } else { glyph };
        self.put(cell_slot(coord), glyph)
    }

    /// Clears the screen and draws the fully walled lattice, before any carving.
    pub fn draw_walled(&mut self) -> std::io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All))?;
        for y in 0..self.slots.1 {
            for x in 0..self.slots.0 {
                let glyph = if x % 2 == 1 && y % 2 == 1 {
                    Glyph::Empty
                } else {
                    Glyph::Wall
                };
                self.put((x, y), glyph)?;
            }
        }
        self.put_cell(self.exit, Glyph::Exit)?;
        self.out.flush()
    }

    pub fn handle_event(&mut self, event: &MazeEvent) -> std::io::Result<()> {
        match *event {
            MazeEvent::CellCarved { coord, direction } => {
                self.put(edge_slot(coord, direction), Glyph::Empty)?;
            }
            MazeEvent::EntranceOpened { coord } => {
                self.put(edge_slot(coord, Direction::Up), Glyph::Entrance)?;
            }
            MazeEvent::MoveAttempt {
                from,
                to,
                is_backtrack,
            } => {
                let glyph = if is_backtrack {
                    Glyph::Backtrack
                } else {
                    Glyph::Route
                };
                if let Some(direction) = direction_between(from, to) {
                    self.put(edge_slot(from, direction), glyph)?;
                }
                if self.show_player {
                    // The cell left behind keeps the move's style, the player sits on `to`
                    self.put_cell(from, glyph)?;
                    self.put_cell(to, Glyph::Player)?;
                } else {
                    // Solver backtracks report parent -> abandoned child
                    self.put_cell(to, glyph)?;
                }
            }
            MazeEvent::Solved { .. } | MazeEvent::VisitedReset => {}
        }
        self.out.flush()
    }

    /// Marks `coord` as the player's position.
    pub fn draw_player(&mut self, coord: Coord) -> std::io::Result<()> {
        self.put_cell(coord, Glyph::Player)?;
        self.out.flush()
    }

    /// Prints a message on the line below the maze, truncated to the terminal width.
    pub fn status(&mut self, message: &str, color: Color) -> std::io::Result<()> {
        let max_width = terminal::size().map(|(w, _)| w).unwrap_or(self.required_size().0);
        let (truncated, _) = message.unicode_truncate(max_width as usize);
        queue!(
            self.out,
            cursor::MoveTo(0, self.slots.1),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(truncated.with(color).attribute(Attribute::Bold))
        )?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_widths() {
        use unicode_width::UnicodeWidthStr;
        for glyph in [
            Glyph::Wall,
            Glyph::Empty,
            Glyph::Entrance,
            Glyph::Exit,
            Glyph::Route,
            Glyph::Backtrack,
            Glyph::Player,
        ] {
            // Display asserts the width in debug builds
            let rendered = glyph.to_string();
            assert!(rendered.width() >= Glyph::WIDTH as usize);
        }
    }

    #[test]
    fn test_slots() {
        assert_eq!(cell_slot((0, 0)), (1, 1));
        assert_eq!(cell_slot((2, 1)), (5, 3));
        assert_eq!(edge_slot((2, 1), Direction::Right), (6, 3));
        assert_eq!(edge_slot((2, 1), Direction::Up), (5, 2));
        assert_eq!(edge_slot((0, 0), Direction::Up), (1, 0));
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(direction_between((1, 1), (2, 1)), Some(Direction::Right));
        assert_eq!(direction_between((1, 1), (1, 0)), Some(Direction::Up));
        assert_eq!(direction_between((1, 1), (3, 1)), None);
    }

    #[test]
    fn test_renders_into_writer() {
        let mut grid = Grid::new(2, 2, None).unwrap();
        grid.carve((0, 0), Direction::Right).unwrap();
        let mut renderer = Renderer::new(Vec::new(), &grid, false).unwrap();
        assert_eq!(renderer.required_size(), (10, 6));
        renderer.draw_walled().unwrap();
        renderer
            .handle_event(&MazeEvent::CellCarved {
                coord: (0, 0),
                direction: Direction::Right,
            })
            .unwrap();
        renderer
            .handle_event(&MazeEvent::MoveAttempt {
                from: (0, 0),
                to: (1, 0),
                is_backtrack: false,
            })
            .unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("⬜"));
        assert!(out.contains("🟥"));
        assert!(out.contains("🟨"));
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let wide = Grid::new(20000, 1, None).unwrap();
        assert!(matches!(
            Renderer::new(Vec::new(), &wide, false),
            Err(MazeError::Config(_))
        ));
        let tall = Grid::new(1, 32767, None).unwrap();
        assert!(Renderer::new(Vec::new(), &tall, false).is_err());
    }

    #[test]
    fn test_required_size_at_the_limit() {
        assert_eq!(required_size_for(16383, 1).unwrap(), (65534, 4));
        assert!(required_size_for(16384, 1).is_err());
        assert_eq!(required_size_for(1, 32766).unwrap(), (6, 65534));
        assert!(required_size_for(u16::MAX, u16::MAX).is_err());

        let grid = Grid::new(16383, 1, None).unwrap();
        let renderer = Renderer::new(Vec::new(), &grid, false).unwrap();
        assert_eq!(renderer.required_size(), (65534, 4));
    }
}
