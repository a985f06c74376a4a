use crate::maze::{Coord, Direction, MazeEvent, grid::Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    /// Created but not yet bound to user input.
    Idle,
    Navigating,
    /// The exit was reached. No further moves are accepted.
    Solved,
}

/// Result of a single [`ManualNavigator::attempt_move`].
///
/// Only [`MoveOutcome::Forward`] and [`MoveOutcome::Backtrack`] change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Stepped onto a cell that was appended to the path.
    Forward,
    /// Stepped back onto the previous path cell; the last path entry was popped.
    Backtrack,
    /// A wall stands between the cursor and the target cell.
    Blocked,
    /// The target cell lies outside the grid.
    OutOfBounds,
    /// The maze has already been solved.
    AlreadySolved,
    /// Manual navigation has not been started.
    Inactive,
}

impl MoveOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, MoveOutcome::Forward | MoveOutcome::Backtrack)
    }
}

/// User-driven cursor walking a carved grid from (0, 0) to the opposite corner.
///
/// The path always starts with the entrance and ends with the cursor.
/// Stepping straight back onto the previous cell undoes the last step
/// instead of growing the path.
#[derive(Debug, Clone)]
pub struct ManualNavigator {
    cursor: Coord,
    goal: Coord,
    path: Vec<Coord>,
    state: NavigatorState,
}

impl ManualNavigator {
    pub fn new(grid: &Grid) -> Self {
        let start = (0, 0);
        ManualNavigator {
            cursor: start,
            goal: (grid.num_cols() - 1, grid.num_rows() - 1),
            path: vec![start],
            state: NavigatorState::Idle,
        }
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    pub fn is_solved(&self) -> bool {
        self.state == NavigatorState::Solved
    }

    /// Starts accepting moves. A 1x1 maze is solved on the spot.
    pub fn activate(&mut self, grid: &Grid) {
        if self.state != NavigatorState::Idle {
            return;
        }
        tracing::debug!("[navigator] Manual solve started at {:?}", self.cursor);
        self.state = NavigatorState::Navigating;
        self.check_goal(grid);
    }

    /// Tries to move the cursor one cell in `direction`.
    ///
    /// Rejected moves leave cursor, path and state untouched.
    pub fn attempt_move(&mut self, grid: &Grid, direction: Direction) -> MoveOutcome {
        match self.state {
            NavigatorState::Idle => return MoveOutcome::Inactive,
            NavigatorState::Solved => return MoveOutcome::AlreadySolved,
            NavigatorState::Navigating => {}
        }

        let Some(new_pos) = grid.neighbor(self.cursor, direction) else {
            return MoveOutcome::OutOfBounds;
        };
        if grid[self.cursor].has_wall(direction) {
            return MoveOutcome::Blocked;
        }

        let from = self.cursor;
        let is_backtrack = self.path.len() >= 2 && self.path[self.path.len() - 2] == new_pos;
        if is_backtrack {
            tracing::debug!("[navigator] Moving back to {:?}", new_pos);
            self.path.pop();
        } else {
            tracing::debug!("[navigator] Moving to {:?}", new_pos);
            self.path.push(new_pos);
        }
        self.cursor = new_pos;

        grid.emit(MazeEvent::MoveAttempt {
            from,
            to: new_pos,
            is_backtrack,
        });
        self.check_goal(grid);

        if is_backtrack {
            MoveOutcome::Backtrack
        } else {
            MoveOutcome::Forward
        }
    }

    fn check_goal(&mut self, grid: &Grid) {
        if self.cursor == self.goal {
            tracing::info!(
                "[navigator] Maze solved manually, path length {}",
                self.path.len()
            );
            self.state = NavigatorState::Solved;
            grid.emit(MazeEvent::Solved { by_navigator: true });
        }
    }
}
