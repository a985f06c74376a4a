use rand::{Rng, rngs::StdRng};

use crate::maze::{Coord, Direction, grid::Grid};

/// Order in which candidate neighbors are collected. The pick among them is
/// uniform, so the order carries no directional bias.
const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// In-bounds neighbors of `coord` that have not been visited yet.
fn unvisited_neighbors(grid: &Grid, coord: Coord) -> Vec<(Direction, Coord)> {
    NEIGHBOR_ORDER
        .into_iter()
        .filter_map(|d| grid.neighbor(coord, d).map(|n| (d, n)))
        .filter(|&(_, n)| !grid[n].is_visited())
        .collect()
}

/// Randomized depth-first carving from (0, 0) with an explicit stack.
///
/// The top of the stack is the cell being processed. A cell stays on the
/// stack until it has no unvisited neighbors left, which reproduces the
/// exploration and RNG draw order of the recursive formulation.
/// Returns the number of carved wall pairs.
pub fn recursive_backtrack(grid: &mut Grid, rng: &mut StdRng) -> usize {
    let start = (0, 0);
    grid.mark_visited(start);

    // The stack will keep only visited cells
    let mut stack: Vec<Coord> = Vec::with_capacity(grid.cell_count());
    stack.push(start);
    let mut carved = 0;

    while let Some(&cell) = stack.last() {
        let neighbors = unvisited_neighbors(grid, cell);

        if neighbors.is_empty() {
            // Dead end, unwind to the previous cell
            stack.pop();
            continue;
        }

        let (direction, neighbor) = neighbors[rng.random_range(0..neighbors.len())];
        // Both cells are in bounds by construction of `unvisited_neighbors`
        let result = grid.carve(cell, direction);
        debug_assert!(result.is_ok(), "carving {:?} {} failed: {:?}", cell, direction, result);
        carved += 1;
        grid.mark_visited(neighbor);
        stack.push(neighbor);
    }

    tracing::debug!("[generator] Depth-first carving finished after {} carves", carved);
    carved
}
