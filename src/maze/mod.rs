pub mod cell;
pub mod grid;

pub use cell::{BoundingBox, Cell, Direction, Point};
pub use grid::{Coord, Grid, MazeEvent};

use std::sync::mpsc::Sender;

use crate::{
    config::MazeConfig,
    error::Result,
    game::{ManualNavigator, MoveOutcome},
    generators::Generator,
    solvers::solve_maze,
};

/// A generated maze together with whichever solving mode drives it.
///
/// The grid is carved once at construction. After that only visited flags
/// (automatic solving) and the navigator's cursor and path (manual solving)
/// change.
pub struct Maze {
    grid: Grid,
    generator: Generator,
    generated: bool,
    manual_mode: bool,
    navigator: ManualNavigator,
    /// Route found by the last automatic solve, if it succeeded
    solution: Option<Vec<Coord>>,
}

impl Maze {
    /// Builds and carves a maze laid out from the config's origin and cell size.
    ///
    /// Events are sent to `sender` when given; the maze works the same without one.
    pub fn from_config(config: &MazeConfig, sender: Option<Sender<MazeEvent>>) -> Result<Self> {
        let mut grid = Grid::new(config.num_cols, config.num_rows, sender)?;
        grid.attach_geometry(
            (config.origin_x, config.origin_y),
            (config.cell_width, config.cell_height),
        );
        let navigator = ManualNavigator::new(&grid);
        let mut maze = Maze {
            grid,
            generator: Generator::new(config.seed),
            generated: false,
            manual_mode: config.manual_mode,
            navigator,
            solution: None,
        };
        maze.generate();
        Ok(maze)
    }

    /// Carves the maze. Only the first call has an effect.
    pub fn generate(&mut self) {
        if self.generated {
            return;
        }
        self.generator.generate(&mut self.grid);
        self.generated = true;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coord: Coord) -> Result<&Cell> {
        self.grid.cell_at(coord)
    }

    /// (num_cols, num_rows)
    pub fn dimensions(&self) -> (u16, u16) {
        self.grid.dimensions()
    }

    pub fn entrance(&self) -> Coord {
        (0, 0)
    }

    pub fn exit(&self) -> Coord {
        (self.grid.num_cols() - 1, self.grid.num_rows() - 1)
    }

    pub fn is_manual_mode(&self) -> bool {
        self.manual_mode
    }

    /// Whether the exit has been reached by the automatic solver or by the navigator.
    pub fn is_solved(&self) -> bool {
        self.solution.is_some() || self.navigator.is_solved()
    }

    /// Dispatches on the configured mode: starts manual navigation and returns
    /// `false`, or runs the automatic solver and returns its result.
    pub fn solve(&mut self) -> bool {
        if self.manual_mode {
            self.start_manual_solve();
            return false;
        }
        self.solve_automatically()
    }

    /// Runs depth-first search from the entrance to the exit.
    pub fn solve_automatically(&mut self) -> bool {
        self.solution = solve_maze(&mut self.grid);
        self.solution.is_some()
    }

    /// Route found by the last successful [`Maze::solve_automatically`].
    pub fn solution(&self) -> Option<&[Coord]> {
        self.solution.as_deref()
    }

    /// Switches to manual mode and starts accepting moves.
    pub fn start_manual_solve(&mut self) {
        self.manual_mode = true;
        self.navigator.activate(&self.grid);
    }

    pub fn navigator(&self) -> &ManualNavigator {
        &self.navigator
    }

    /// Moves the player cursor; `false` when the move was rejected.
    pub fn attempt_move(&mut self, direction: Direction) -> bool {
        self.try_move(direction).is_accepted()
    }

    /// Like [`Maze::attempt_move`] but reports why a move was rejected.
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        self.navigator.attempt_move(&self.grid, direction)
    }

    /// Cell centers along `route`, for collaborators that draw paths as polylines.
    /// Coordinates outside the grid are skipped.
    pub fn route_points(&self, route: &[Coord]) -> Vec<Point> {
        route
            .iter()
            .filter_map(|&c| self.grid.cell_at(c).ok())
            .filter_map(|cell| cell.bounds())
            .map(|bounds| bounds.center())
            .collect()
    }

    /// Cell centers along the player's current path.
    pub fn player_path_points(&self) -> Vec<Point> {
        self.route_points(self.navigator.path())
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.grid[coord]
    }
}
