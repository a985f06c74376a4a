use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

use crate::maze::grid::Grid;
use recur_backtrack::recursive_backtrack;

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carves a spanning tree into a fully walled [`Grid`] with randomized depth-first search.
///
/// Owns its own RNG; two generators built with the same seed carve identical mazes.
pub struct Generator {
    rng: StdRng,
    seed: Option<u64>,
}

impl Generator {
    pub fn new(seed: Option<u64>) -> Self {
        Generator {
            rng: get_rng(seed),
            seed,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Opens the entrance, carves from (0, 0) until every cell is reached,
    /// then clears the visited flags so solving starts from a clean slate.
    ///
    /// Returns the number of carved wall pairs, always `num_cols * num_rows - 1`
    /// on a freshly created grid.
    pub fn generate(&mut self, grid: &mut Grid) -> usize {
        grid.open_entrance();
        let carved = recursive_backtrack(grid, &mut self.rng);
        grid.reset_visited();
        tracing::info!(
            "[generator] Carved {} passages in a {}x{} grid (seed: {:?})",
            carved,
            grid.num_cols(),
            grid.num_rows(),
            self.seed
        );
        carved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;

    fn wall_layout(grid: &Grid) -> Vec<[bool; 4]> {
        grid.coords()
            .map(|c| Direction::ALL.map(|d| grid[c].has_wall(d)))
            .collect()
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = Grid::new(9, 7, None).unwrap();
        let mut b = Grid::new(9, 7, None).unwrap();
        Generator::new(Some(42)).generate(&mut a);
        Generator::new(Some(42)).generate(&mut b);
        assert_eq!(wall_layout(&a), wall_layout(&b));
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = Grid::new(12, 12, None).unwrap();
        let mut b = Grid::new(12, 12, None).unwrap();
        Generator::new(Some(1)).generate(&mut a);
        Generator::new(Some(2)).generate(&mut b);
        assert_ne!(wall_layout(&a), wall_layout(&b));
    }

    #[test]
    fn test_generate_opens_entrance_and_clears_visited() {
        let mut grid = Grid::new(5, 4, None).unwrap();
        let carved = Generator::new(Some(7)).generate(&mut grid);
        assert_eq!(carved, 5 * 4 - 1);
        assert_eq!(grid.carved_count(), carved);
        assert!(!grid[(0, 0)].has_top_wall());
        assert!(grid.coords().all(|c| !grid[c].is_visited()));
    }

    #[test]
    fn test_unseeded_generation_still_spans() {
        let mut grid = Grid::new(6, 6, None).unwrap();
        let mut generator = Generator::new(None);
        assert_eq!(generator.seed(), None);
        assert_eq!(generator.generate(&mut grid), 35);
    }

    #[test]
    fn test_single_cell_grid() {
        let mut grid = Grid::new(1, 1, None).unwrap();
        assert_eq!(Generator::new(Some(3)).generate(&mut grid), 0);
        assert_eq!(grid[(0, 0)].wall_count(), 3);
    }
}
