mod dfs;

use crate::maze::{Coord, grid::Grid};
pub use dfs::{DfsSolver, SolverState};

/// Solves from the entrance (0, 0) to the exit in the opposite corner.
///
/// Visited flags are cleared first, so repeated calls on the same grid give
/// the same answer. Returns the route on success.
pub fn solve_maze(grid: &mut Grid) -> Option<Vec<Coord>> {
    grid.reset_visited();
    let start = (0, 0);
    let goal = (grid.num_cols() - 1, grid.num_rows() - 1);

    // Grid::new rejects empty grids, so both corners exist
    let mut solver = match DfsSolver::new(grid, start, goal) {
        Ok(solver) => solver,
        Err(e) => {
            tracing::error!("[solver] Cannot start search: {}", e);
            return None;
        }
    };
    match solver.run(grid) {
        SolverState::Found => Some(solver.route()),
        _ => None,
    }
}
