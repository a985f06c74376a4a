use std::fmt;

/// One of the four cardinal directions a cell can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction facing back across the same edge.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Column and row deltas of a single step in this direction.
    /// Rows grow downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    fn wall_index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Screen-space box of a cell, owned by whoever draws the maze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn center(&self) -> Point {
        Point {
            x: (self.x1 + self.x2) / 2.0,
            y: (self.y1 + self.y2) / 2.0,
        }
    }
}

/// A single grid unit: four wall flags, a transient visited flag and optional geometry.
///
/// Walls are only removed through [`crate::Grid::carve`], which keeps the
/// mirrored wall on the neighbor in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Indexed by [`Direction::wall_index`]: up, down, left, right
    walls: [bool; 4],
    visited: bool,
    bounds: Option<BoundingBox>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            walls: [true; 4],
            visited: false,
            bounds: None,
        }
    }
}

impl Cell {
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.wall_index()]
    }

    pub fn has_top_wall(&self) -> bool {
        self.has_wall(Direction::Up)
    }

    pub fn has_bottom_wall(&self) -> bool {
        self.has_wall(Direction::Down)
    }

    pub fn has_left_wall(&self) -> bool {
        self.has_wall(Direction::Left)
    }

    pub fn has_right_wall(&self) -> bool {
        self.has_wall(Direction::Right)
    }

    /// Number of walls still standing around this cell.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub(crate) fn remove_wall(&mut self, direction: Direction) {
        self.walls[direction.wall_index()] = false;
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub(crate) fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_fully_walled() {
        let cell = Cell::default();
        assert!(Direction::ALL.iter().all(|&d| cell.has_wall(d)));
        assert_eq!(cell.wall_count(), 4);
        assert!(!cell.is_visited());
        assert!(cell.bounds().is_none());
    }

    #[test]
    fn test_remove_wall_is_independent() {
        let mut cell = Cell::default();
        cell.remove_wall(Direction::Right);
        assert!(!cell.has_right_wall());
        assert!(cell.has_left_wall());
        assert!(cell.has_top_wall());
        assert!(cell.has_bottom_wall());
    }

    #[test]
    fn test_opposite_offsets_cancel() {
        for d in Direction::ALL {
            let (dx, dy) = d.offset();
            let (ox, oy) = d.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn test_bounding_box_center() {
        let bounds = BoundingBox {
            x1: 10.0,
            y1: 20.0,
            x2: 30.0,
            y2: 60.0,
        };
        assert_eq!(bounds.center(), Point { x: 20.0, y: 40.0 });
    }
}
