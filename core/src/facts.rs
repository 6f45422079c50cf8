use serde::{Deserialize, Serialize};

use crate::*;

/// A revealed cell and what it showed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KnownCell {
    pub row: Coord,
    pub col: Coord,
    pub value: CellValue,
}

/// One direction of a neighbor pair. Every pair is listed both ways.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Adjacency {
    pub row: Coord,
    pub col: Coord,
    pub neighbor_row: Coord,
    pub neighbor_col: Coord,
}

/// The board as plain relations, for controllers that reason over tuples instead of grids.
///
/// Built fresh on every call; nothing here tracks later changes to the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facts {
    pub size: Coord2,
    pub total_mines: CellCount,
    pub known: Vec<KnownCell>,
    pub flagged: Vec<Coord2>,
    pub unrevealed: Vec<Coord2>,
    pub adjacency: Vec<Adjacency>,
}

impl Facts {
    pub fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            total_mines: board.total_mines(),
            known: board.known_cells(),
            flagged: board.flagged_cells(),
            unrevealed: board.unrevealed_cells(),
            adjacency: board.adjacency(),
        }
    }

    pub fn is_known(&self, coords: Coord2) -> bool {
        self.known
            .iter()
            .any(|cell| (cell.row, cell.col) == coords)
    }

    /// Neighbors of `coords` according to the adjacency relation.
    pub fn neighbors_of(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.adjacency
            .iter()
            .filter(move |adj| (adj.row, adj.col) == coords)
            .map(|adj| (adj.neighbor_row, adj.neighbor_col))
    }
}

impl Board {
    /// `(row, col, value)` for every revealed cell, in row-major order.
    pub fn known_cells(&self) -> Vec<KnownCell> {
        iter_coords(self.size())
            .filter_map(|coords| {
                self.revealed_value(coords).map(|value| KnownCell {
                    row: coords.0,
                    col: coords.1,
                    value,
                })
            })
            .collect()
    }

    pub fn flagged_cells(&self) -> Vec<Coord2> {
        self.cells_with(Visibility::Flagged)
    }

    pub fn unrevealed_cells(&self) -> Vec<Coord2> {
        self.cells_with(Visibility::Hidden)
    }

    /// Every in-bounds neighbor pair of the grid, both directions. Does not depend on play.
    pub fn adjacency(&self) -> Vec<Adjacency> {
        let size = self.size();
        iter_coords(size)
            .flat_map(|(row, col)| {
                NeighborIter::new((row, col), size).map(move |(neighbor_row, neighbor_col)| {
                    Adjacency {
                        row,
                        col,
                        neighbor_row,
                        neighbor_col,
                    }
                })
            })
            .collect()
    }

    pub fn facts(&self) -> Facts {
        Facts::from_board(self)
    }

    fn cells_with(&self, visibility: Visibility) -> Vec<Coord2> {
        iter_coords(self.size())
            .filter(|&coords| self.visibility(coords) == visibility)
            .collect()
    }
}
