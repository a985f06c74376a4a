use crate::{
    error::Result,
    maze::{Coord, Direction, MazeEvent, grid::Grid},
};

/// Priority in which passages are tried from each cell.
/// Changes which route is found first, never whether one is found.
const SEARCH_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Searching,
    /// The goal was reached; [`DfsSolver::route`] holds the path to it.
    Found,
    /// Every cell reachable from the start was explored without reaching the goal.
    Exhausted,
}

/// A cell on the search stack and the index of the next direction to try from it.
#[derive(Debug, Clone, Copy)]
struct Frame {
    coord: Coord,
    next: usize,
}

/// Depth-first search driven one move at a time.
///
/// Every step is either a forward move into an unvisited passable neighbor or
/// a backtrack out of an exhausted cell, and each is reported as a
/// [`MazeEvent::MoveAttempt`]. Visited flags live on the grid and are never
/// cleared by the solver itself.
#[derive(Debug)]
pub struct DfsSolver {
    goal: Coord,
    stack: Vec<Frame>,
    state: SolverState,
}

impl DfsSolver {
    /// Starts a search at `start`, marking it visited.
    ///
    /// Fails with [`crate::MazeError::OutOfBounds`] if `start` or `goal` lies outside the grid.
    pub fn new(grid: &mut Grid, start: Coord, goal: Coord) -> Result<Self> {
        grid.cell_at(start)?;
        grid.cell_at(goal)?;
        grid.mark_visited(start);
        let mut stack = Vec::with_capacity(grid.cell_count());
        stack.push(Frame {
            coord: start,
            next: 0,
        });
        Ok(DfsSolver {
            goal,
            stack,
            state: SolverState::Searching,
        })
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Cells from the start to the current search head, in walking order.
    /// After [`SolverState::Found`] this is the solution route.
    pub fn route(&self) -> Vec<Coord> {
        self.stack.iter().map(|f| f.coord).collect()
    }

    /// Advances the search by one move. Terminal states are sticky.
    pub fn step(&mut self, grid: &mut Grid) -> SolverState {
        if self.state != SolverState::Searching {
            return self.state;
        }

        let Some(top) = self.stack.len().checked_sub(1) else {
            self.state = SolverState::Exhausted;
            return self.state;
        };

        let current = self.stack[top].coord;
        if current == self.goal {
            tracing::info!(
                "[solver] Goal {:?} reached, route length {}",
                self.goal,
                self.stack.len()
            );
            self.state = SolverState::Found;
            grid.emit(MazeEvent::Solved {
                by_navigator: false,
            });
            return self.state;
        }

        while self.stack[top].next < SEARCH_ORDER.len() {
            let direction = SEARCH_ORDER[self.stack[top].next];
            self.stack[top].next += 1;

            let Some(neighbor) = grid.neighbor(current, direction) else {
                continue;
            };
            if grid[neighbor].is_visited() || !grid.is_passable(current, direction) {
                continue;
            }

            grid.mark_visited(neighbor);
            grid.emit(MazeEvent::MoveAttempt {
                from: current,
                to: neighbor,
                is_backtrack: false,
            });
            self.stack.push(Frame {
                coord: neighbor,
                next: 0,
            });
            return self.state;
        }

        // Every branch out of `current` failed, undo the move that led here
        self.stack.pop();
        match self.stack.last() {
            Some(parent) => {
                tracing::debug!("[solver] Backtracking from {:?} to {:?}", current, parent.coord);
                grid.emit(MazeEvent::MoveAttempt {
                    from: parent.coord,
                    to: current,
                    is_backtrack: true,
                });
            }
            None => {
                tracing::info!("[solver] Search exhausted without reaching {:?}", self.goal);
                self.state = SolverState::Exhausted;
            }
        }
        self.state
    }

    /// Steps until the search reaches a terminal state.
    pub fn run(&mut self, grid: &mut Grid) -> SolverState {
        while self.step(grid) == SolverState::Searching {}
        self.state
    }
}
