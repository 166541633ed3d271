//! Core type definitions for the automata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fill color for species A cells.
pub const SPECIES_A_COLOR: &str = "#6eb5ff";
/// Fill color for species B cells.
pub const SPECIES_B_COLOR: &str = "#66cc88";
/// Stroke color for grid lines and hex outlines.
pub const GRID_LINE_COLOR: &str = "#2a2a4a";
/// Stroke width for grid lines and hex outlines.
pub const GRID_LINE_WIDTH: f32 = 0.5;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    /// Blue species, the only one outside competition mode
    SpeciesA = 1,
    /// Green species, competition mode only
    SpeciesB = 2,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self != CellState::Dead
    }

    pub fn species(self) -> Option<Species> {
        match self {
            CellState::Dead => None,
            CellState::SpeciesA => Some(Species::A),
            CellState::SpeciesB => Some(Species::B),
        }
    }

    /// Canvas fill color, `None` for dead cells (outline only)
    pub fn fill_color(self) -> Option<&'static str> {
        self.species().map(Species::color)
    }
}

/// One of the two competing species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    A,
    B,
}

impl Species {
    pub fn enemy(self) -> Species {
        match self {
            Species::A => Species::B,
            Species::B => Species::A,
        }
    }

    pub fn cell(self) -> CellState {
        match self {
            Species::A => CellState::SpeciesA,
            Species::B => CellState::SpeciesB,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Species::A => SPECIES_A_COLOR,
            Species::B => SPECIES_B_COLOR,
        }
    }
}

/// 2D cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn add(&self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// Apply toroidal wrapping for given board dimensions
    pub fn wrap(&self, dims: Dimensions) -> Self {
        Self {
            col: self.col.rem_euclid(dims.cols),
            row: self.row.rem_euclid(dims.rows),
        }
    }

    /// Column parity, which selects the hex neighbor table
    pub fn parity(&self) -> Parity {
        if self.col.rem_euclid(2) == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Board size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub cols: i32,
    pub rows: i32,
}

impl Dimensions {
    /// Panics on an empty board; a zero-sized torus has no cells to wrap onto.
    pub fn new(cols: i32, rows: i32) -> Self {
        assert!(
            cols > 0 && rows > 0,
            "board dimensions must be positive, got {}x{}",
            cols,
            rows
        );
        Self { cols, rows }
    }

    pub fn cell_count(&self) -> usize {
        (self.cols as usize).saturating_mul(self.rows as usize)
    }

    /// Cell count, `None` if it does not fit in `usize`
    pub fn checked_cell_count(&self) -> Option<usize> {
        (self.cols as usize).checked_mul(self.rows as usize)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.cols).contains(&pos.col) && (0..self.rows).contains(&pos.row)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Column parity for odd-q hex offset coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even = 0,
    Odd = 1,
}

/// Per-species population counts, over a neighborhood or a whole board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Census {
    pub dead: u32,
    pub species_a: u32,
    pub species_b: u32,
}

impl Census {
    pub fn record(&mut self, state: CellState) {
        match state {
            CellState::Dead => self.dead += 1,
            CellState::SpeciesA => self.species_a += 1,
            CellState::SpeciesB => self.species_b += 1,
        }
    }

    pub fn count(&self, species: Species) -> u32 {
        match species {
            Species::A => self.species_a,
            Species::B => self.species_b,
        }
    }

    pub fn alive(&self) -> u32 {
        self.species_a + self.species_b
    }

    pub fn total(&self) -> u32 {
        self.dead + self.alive()
    }
}

impl FromIterator<CellState> for Census {
    fn from_iter<I: IntoIterator<Item = CellState>>(iter: I) -> Self {
        let mut census = Census::default();
        for state in iter {
            census.record(state);
        }
        census
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let dims = Dimensions::new(10, 8);

        let pos = Position::new(5, 5);
        assert_eq!(pos.wrap(dims), Position::new(5, 5));

        let pos = Position::new(-1, -1);
        assert_eq!(pos.wrap(dims), Position::new(9, 7));

        let pos = Position::new(10, 8);
        assert_eq!(pos.wrap(dims), Position::new(0, 0));
    }

    #[test]
    fn test_parity() {
        assert_eq!(Position::new(0, 3).parity(), Parity::Even);
        assert_eq!(Position::new(7, 0).parity(), Parity::Odd);
        assert_eq!(Position::new(-1, 0).parity(), Parity::Odd);
    }

    #[test]
    fn test_species_enemy() {
        assert_eq!(Species::A.enemy(), Species::B);
        assert_eq!(Species::B.enemy(), Species::A);
        assert_eq!(Species::B.cell(), CellState::SpeciesB);
    }

    #[test]
    fn test_cell_colors() {
        assert_eq!(CellState::Dead.fill_color(), None);
        assert_eq!(CellState::SpeciesA.fill_color(), Some("#6eb5ff"));
        assert_eq!(CellState::SpeciesB.fill_color(), Some("#66cc88"));
    }

    #[test]
    fn test_census_from_iter() {
        let census: Census = [
            CellState::Dead,
            CellState::SpeciesA,
            CellState::SpeciesA,
            CellState::SpeciesB,
        ]
        .into_iter()
        .collect();

        assert_eq!(census.dead, 1);
        assert_eq!(census.count(Species::A), 2);
        assert_eq!(census.count(Species::B), 1);
        assert_eq!(census.total(), 4);
    }

    #[test]
    fn test_cell_count() {
        let dims = Dimensions::new(40, 25);
        assert_eq!(dims.cell_count(), 1000);
        assert_eq!(dims.checked_cell_count(), Some(1000));

        let huge = Dimensions::new(i32::MAX, i32::MAX);
        if usize::BITS < 64 {
            assert_eq!(huge.checked_cell_count(), None);
            assert_eq!(huge.cell_count(), usize::MAX);
        } else {
            assert_eq!(huge.checked_cell_count(), Some((i32::MAX as usize).pow(2)));
        }
    }

    #[test]
    #[should_panic]
    fn test_empty_dimensions_rejected() {
        Dimensions::new(0, 4);
    }
}
