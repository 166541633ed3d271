//! Neighbor enumeration on a torus.

use crate::grid::Grid;
use lifebg_core::{Census, Dimensions, Parity, Position};
use serde::{Deserialize, Serialize};

/// Moore neighborhood: the 8 cells at Chebyshev distance 1
static SQUARE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Flat-top odd-q hex neighbors, indexed by column parity.
/// Odd columns sit half a row lower, so their side neighbors are one row further down.
static HEX_OFFSETS: [[(i32, i32); 6]; 2] = [
    // even column
    [(1, -1), (1, 0), (-1, -1), (-1, 0), (0, -1), (0, 1)],
    // odd column
    [(1, 0), (1, 1), (-1, 0), (-1, 1), (0, -1), (0, 1)],
];

/// Board adjacency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// 8-neighbor square cells
    #[default]
    Square,
    /// 6-neighbor flat-top hexagons, odd-q offset
    Hex,
}

impl Topology {
    /// Neighbors per cell
    pub fn cardinality(&self) -> usize {
        match self {
            Topology::Square => SQUARE_OFFSETS.len(),
            Topology::Hex => HEX_OFFSETS[0].len(),
        }
    }

    /// `(dcol, drow)` offsets for a cell in column `col`
    pub fn offsets(&self, col: i32) -> &'static [(i32, i32)] {
        match self {
            Topology::Square => &SQUARE_OFFSETS,
            Topology::Hex => match Position::new(col, 0).parity() {
                Parity::Even => &HEX_OFFSETS[Parity::Even as usize],
                Parity::Odd => &HEX_OFFSETS[Parity::Odd as usize],
            },
        }
    }

    /// Wrapped neighbor positions, in offset-table order
    pub fn neighbors(&self, pos: Position, dims: Dimensions) -> impl Iterator<Item = Position> {
        self.offsets(pos.col)
            .iter()
            .map(move |&(dc, dr)| pos.add(dc, dr).wrap(dims))
    }

    /// Count each species among the neighbors of `pos`
    pub fn census(&self, grid: &Grid, pos: Position) -> Census {
        let dims = grid.dimensions();
        self.neighbors(pos, dims).map(|n| grid.get(n)).collect()
    }
}
