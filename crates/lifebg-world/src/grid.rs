//! Dense 2D board of cell states.

use lifebg_core::{CellState, Census, Dimensions, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A fixed-size board stored row-major.
///
/// Coordinates must already be in range; wrapping is the topology's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<CellState>,
}

impl Grid {
    /// All-dead board
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![CellState::Dead; dims.cell_count()],
        }
    }

    /// Board where every cell is independently species A with probability `p_alive`
    pub fn random<R: Rng + ?Sized>(dims: Dimensions, p_alive: f64, rng: &mut R) -> Self {
        let mut grid = Self::new(dims);
        grid.fill_random(p_alive, 0.0, rng);
        grid
    }

    /// Build a board from live-cell coordinates, everything else dead
    pub fn from_cells(dims: Dimensions, live: &[(i32, i32, CellState)]) -> Self {
        let mut grid = Self::new(dims);
        for &(col, row, state) in live {
            grid.set(Position::new(col, row), state);
        }
        grid
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn get(&self, pos: Position) -> CellState {
        self.cells[self.pos_to_index(pos)]
    }

    pub fn set(&mut self, pos: Position, state: CellState) {
        let index = self.pos_to_index(pos);
        self.cells[index] = state;
    }

    /// Redraw every cell with one uniform roll: below `p_a` gives species A,
    /// below `p_a + p_b` gives species B, anything else is dead.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, p_a: f64, p_b: f64, rng: &mut R) {
        for cell in &mut self.cells {
            let roll = rng.gen::<f64>();
            *cell = if roll < p_a {
                CellState::SpeciesA
            } else if roll < p_a + p_b {
                CellState::SpeciesB
            } else {
                CellState::Dead
            };
        }
    }

    /// Rewrite every cell in place
    pub fn map_cells(&mut self, mut f: impl FnMut(CellState) -> CellState) {
        for cell in &mut self.cells {
            *cell = f(*cell);
        }
    }

    /// Visit every cell in row-major order
    pub fn for_each(&self, mut visit: impl FnMut(Position, CellState)) {
        for (pos, state) in self.iter() {
            visit(pos, state);
        }
    }

    /// Iterator over all cells with positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, state)| (self.index_to_pos(i), *state))
    }

    pub fn census(&self) -> Census {
        self.cells.iter().copied().collect()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        assert!(
            self.dims.contains(pos),
            "position {} outside {} board",
            pos,
            self.dims
        );
        (pos.row * self.dims.cols + pos.col) as usize
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let col = (index as i32) % self.dims.cols;
        let row = (index as i32) / self.dims.cols;
        Position::new(col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(Dimensions::new(10, 6));
        assert_eq!(grid.dimensions(), Dimensions::new(10, 6));
        assert_eq!(grid.cells.len(), 60);
        assert_eq!(grid.census().dead, 60);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(Dimensions::new(4, 3));
        grid.set(Position::new(3, 2), CellState::SpeciesB);
        assert_eq!(grid.get(Position::new(3, 2)), CellState::SpeciesB);
        assert_eq!(grid.get(Position::new(2, 2)), CellState::Dead);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range_panics() {
        let grid = Grid::new(Dimensions::new(4, 3));
        grid.get(Position::new(4, 0));
    }

    #[test]
    fn test_iteration_is_row_major() {
        let grid = Grid::new(Dimensions::new(3, 2));
        let order: Vec<Position> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(order[0], Position::new(0, 0));
        assert_eq!(order[1], Position::new(1, 0));
        assert_eq!(order[3], Position::new(0, 1));
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn test_fill_random_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let dims = Dimensions::new(20, 20);

        let grid = Grid::random(dims, 0.0, &mut rng);
        assert_eq!(grid.census().alive(), 0);

        let grid = Grid::random(dims, 1.0, &mut rng);
        assert_eq!(grid.census().species_a, 400);
    }

    #[test]
    fn test_fill_random_two_species() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = Grid::new(Dimensions::new(50, 50));
        grid.fill_random(0.3, 0.3, &mut rng);

        let census = grid.census();
        assert!(census.species_a > 0);
        assert!(census.species_b > 0);
        assert!(census.dead > 0);
        assert_eq!(census.total(), 2500);
    }

    #[test]
    fn test_map_cells() {
        let mut grid = Grid::from_cells(
            Dimensions::new(3, 3),
            &[(0, 0, CellState::SpeciesA), (1, 1, CellState::SpeciesB)],
        );
        grid.map_cells(|state| match state {
            CellState::SpeciesB => CellState::Dead,
            other => other,
        });
        assert_eq!(grid.census().species_a, 1);
        assert_eq!(grid.census().species_b, 0);
    }
}
