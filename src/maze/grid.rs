use std::sync::mpsc::Sender;

use super::cell::{BoundingBox, Cell, Direction};
use crate::error::{MazeError, Result};

/// (column, row) of a cell, 0-indexed from the top-left corner.
pub type Coord = (u16, u16);

/// State changes a rendering collaborator can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MazeEvent {
    /// The wall of `coord` facing `direction` was removed together with its mirror.
    CellCarved { coord: Coord, direction: Direction },
    /// The top wall of the entrance cell was removed.
    EntranceOpened { coord: Coord },
    /// A step between two adjacent cells. `is_backtrack` marks a retreat.
    MoveAttempt {
        from: Coord,
        to: Coord,
        is_backtrack: bool,
    },
    /// The exit was reached, either by the solver or by the navigator.
    Solved { by_navigator: bool },
    /// All visited flags were cleared.
    VisitedReset,
}

/// Fixed-size column-major array of cells.
#[derive(Debug, Clone)]
pub struct Grid {
    data: Box<[Cell]>,
    num_cols: u16,
    num_rows: u16,
    sender: Option<Sender<MazeEvent>>,
}

impl Grid {
    /// Allocates `num_cols * num_rows` fully walled, unvisited cells.
    pub fn new(num_cols: u16, num_rows: u16, sender: Option<Sender<MazeEvent>>) -> Result<Self> {
        if num_cols == 0 || num_rows == 0 {
            return Err(MazeError::InvalidDimension { num_cols, num_rows });
        }
        let data = vec![Cell::default(); num_cols as usize * num_rows as usize].into_boxed_slice();
        Ok(Grid {
            data,
            num_cols,
            num_rows,
            sender,
        })
    }

    pub fn num_cols(&self) -> u16 {
        self.num_cols
    }

    pub fn num_rows(&self) -> u16 {
        self.num_rows
    }

    /// (num_cols, num_rows)
    pub fn dimensions(&self) -> (u16, u16) {
        (self.num_cols, self.num_rows)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.num_cols && coord.1 < self.num_rows
    }

    /// Iterates every coordinate, column by column.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (num_cols, num_rows) = self.dimensions();
        (0..num_cols).flat_map(move |col| (0..num_rows).map(move |row| (col, row)))
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 as usize * self.num_rows as usize + coord.1 as usize
    }

    fn out_of_bounds(&self, col: i32, row: i32) -> MazeError {
        MazeError::OutOfBounds {
            col,
            row,
            num_cols: self.num_cols,
            num_rows: self.num_rows,
        }
    }

    fn checked_index(&self, coord: Coord) -> Result<usize> {
        if self.is_in_bounds(coord) {
            Ok(self.ravel_index(coord))
        } else {
            Err(self.out_of_bounds(coord.0 as i32, coord.1 as i32))
        }
    }

    pub fn cell_at(&self, coord: Coord) -> Result<&Cell> {
        let idx = self.checked_index(coord)?;
        Ok(&self.data[idx])
    }

    /// The adjacent coordinate in `direction`, or `None` past the grid edge.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        let (dx, dy) = direction.offset();
        let col = coord.0 as i32 + dx;
        let row = coord.1 as i32 + dy;
        if col < 0 || row < 0 || col >= self.num_cols as i32 || row >= self.num_rows as i32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Whether a step from `coord` in `direction` stays in bounds and crosses no wall.
    pub fn is_passable(&self, coord: Coord, direction: Direction) -> bool {
        match self.neighbor(coord, direction) {
            Some(_) => !self[coord].has_wall(direction),
            None => false,
        }
    }

    /// Removes the wall of `coord` facing `direction` and the mirrored wall of
    /// the neighbor across that edge.
    ///
    /// Fails with [`MazeError::OutOfBounds`] if `coord` or the neighbor lies
    /// outside the grid; in that case nothing is mutated.
    pub fn carve(&mut self, coord: Coord, direction: Direction) -> Result<()> {
        let idx = self.checked_index(coord)?;
        let Some(neighbor) = self.neighbor(coord, direction) else {
            let (dx, dy) = direction.offset();
            return Err(self.out_of_bounds(coord.0 as i32 + dx, coord.1 as i32 + dy));
        };
        let neighbor_idx = self.ravel_index(neighbor);
        self.data[idx].remove_wall(direction);
        self.data[neighbor_idx].remove_wall(direction.opposite());
        self.emit(MazeEvent::CellCarved { coord, direction });
        Ok(())
    }

    /// Clears the top wall of (0, 0), the maze's single entry point.
    /// This is a boundary wall and has no mirror.
    pub fn open_entrance(&mut self) {
        let entrance = (0, 0);
        let idx = self.ravel_index(entrance);
        self.data[idx].remove_wall(Direction::Up);
        self.emit(MazeEvent::EntranceOpened { coord: entrance });
    }

    pub(crate) fn mark_visited(&mut self, coord: Coord) {
        let idx = self.ravel_index(coord);
        self.data[idx].set_visited(true);
    }

    /// Sets every cell's visited flag to false.
    pub fn reset_visited(&mut self) {
        self.data.iter_mut().for_each(|cell| cell.set_visited(false));
        self.emit(MazeEvent::VisitedReset);
    }

    /// Number of interior edges with no wall, i.e. carved wall pairs.
    pub fn carved_count(&self) -> usize {
        self.coords()
            .map(|coord| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&d| self.is_passable(coord, d))
                    .count()
            })
            .sum()
    }

    /// Lays the cells out on screen starting at `origin`, one `cell_size` box each.
    pub fn attach_geometry(&mut self, origin: (f64, f64), cell_size: (f64, f64)) {
        for coord in self.coords() {
            let x1 = origin.0 + coord.0 as f64 * cell_size.0;
            let y1 = origin.1 + coord.1 as f64 * cell_size.1;
            let idx = self.ravel_index(coord);
            self.data[idx].set_bounds(BoundingBox {
                x1,
                y1,
                x2: x1 + cell_size.0,
                y2: y1 + cell_size.1,
            });
        }
    }

    /// Forwards an event to the subscriber, if any.
    /// A dropped receiver is fine: the core must work without subscribers.
    pub(crate) fn emit(&self, event: MazeEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Self::Output {
        if !self.is_in_bounds(coord) {
            panic!(
                "cell {:?} is out of bounds for a {}x{} grid",
                coord, self.num_cols, self.num_rows
            );
        }
        &self.data[self.ravel_index(coord)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 3, None),
            Err(MazeError::InvalidDimension {
                num_cols: 0,
                num_rows: 3
            })
        ));
        assert!(matches!(
            Grid::new(3, 0, None),
            Err(MazeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_new_grid_fully_walled() {
        let grid = Grid::new(4, 3, None).unwrap();
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.coords().count(), 12);
        assert!(grid.coords().all(|c| grid[c].wall_count() == 4));
        assert_eq!(grid.carved_count(), 0);
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = Grid::new(4, 3, None).unwrap();
        assert!(grid.cell_at((3, 2)).is_ok());
        assert!(matches!(
            grid.cell_at((4, 0)),
            Err(MazeError::OutOfBounds { col: 4, row: 0, .. })
        ));
        assert!(grid.cell_at((0, 3)).is_err());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let grid = Grid::new(2, 2, None).unwrap();
        let _ = &grid[(2, 0)];
    }

    #[test]
    fn test_column_major_addressing_is_distinct() {
        // (1, 0) and (0, 1) must not alias even on non-square grids
        let mut grid = Grid::new(3, 2, None).unwrap();
        grid.mark_visited((1, 0));
        assert!(grid[(1, 0)].is_visited());
        assert!(!grid[(0, 1)].is_visited());
    }

    #[test]
    fn test_carve_is_symmetric() {
        let mut grid = Grid::new(3, 3, None).unwrap();
        grid.carve((1, 1), Direction::Right).unwrap();
        assert!(!grid[(1, 1)].has_right_wall());
        assert!(!grid[(2, 1)].has_left_wall());

        grid.carve((1, 1), Direction::Up).unwrap();
        assert!(!grid[(1, 1)].has_top_wall());
        assert!(!grid[(1, 0)].has_bottom_wall());

        grid.carve((1, 1), Direction::Left).unwrap();
        assert!(!grid[(0, 1)].has_right_wall());

        grid.carve((1, 1), Direction::Down).unwrap();
        assert!(!grid[(1, 2)].has_top_wall());
        assert_eq!(grid[(1, 1)].wall_count(), 0);
        assert_eq!(grid.carved_count(), 4);
    }

    #[test]
    fn test_carve_towards_edge_fails_without_mutation() {
        let mut grid = Grid::new(2, 2, None).unwrap();
        assert!(matches!(
            grid.carve((0, 0), Direction::Left),
            Err(MazeError::OutOfBounds { col: -1, row: 0, .. })
        ));
        assert!(grid[(0, 0)].has_left_wall());
        assert!(grid.carve((5, 5), Direction::Right).is_err());
    }

    #[test]
    fn test_neighbor_and_passable() {
        let mut grid = Grid::new(2, 2, None).unwrap();
        assert_eq!(grid.neighbor((0, 0), Direction::Right), Some((1, 0)));
        assert_eq!(grid.neighbor((0, 0), Direction::Up), None);
        assert_eq!(grid.neighbor((1, 1), Direction::Down), None);
        assert!(!grid.is_passable((0, 0), Direction::Right));
        grid.carve((0, 0), Direction::Right).unwrap();
        assert!(grid.is_passable((0, 0), Direction::Right));
        assert!(grid.is_passable((1, 0), Direction::Left));

        // An opened boundary wall is still not a passage
        grid.open_entrance();
        assert!(!grid[(0, 0)].has_top_wall());
        assert!(!grid.is_passable((0, 0), Direction::Up));
    }

    #[test]
    fn test_reset_visited() {
        let mut grid = Grid::new(3, 3, None).unwrap();
        for c in grid.coords() {
            grid.mark_visited(c);
        }
        grid.reset_visited();
        assert!(grid.coords().all(|c| !grid[c].is_visited()));
    }

    #[test]
    fn test_carve_emits_event() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut grid = Grid::new(2, 1, Some(tx)).unwrap();
        grid.carve((0, 0), Direction::Right).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            MazeEvent::CellCarved {
                coord: (0, 0),
                direction: Direction::Right
            }
        );
        // Dropping the receiver must not break carving
        drop(rx);
        grid.carve((1, 0), Direction::Left).unwrap();
    }

    #[test]
    fn test_attach_geometry() {
        let mut grid = Grid::new(2, 2, None).unwrap();
        grid.attach_geometry((5.0, 10.0), (10.0, 20.0));
        let bounds = grid[(1, 1)].bounds().unwrap();
        assert_eq!((bounds.x1, bounds.y1, bounds.x2, bounds.y2), (15.0, 30.0, 25.0, 50.0));
    }
}
