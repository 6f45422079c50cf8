use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use facts::*;
pub use generator::*;
pub use pointer::*;
pub use solver::*;
pub use summary::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod facts;
mod generator;
mod pointer;
mod solver;
mod summary;
mod tile;
mod types;

/// How `flag`/`unflag` keep the flag counter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagAccounting {
    /// Every in-bounds call on a live board overwrites the cell and moves the
    /// counter, whatever the cell was before. The counter can go negative.
    #[default]
    Unchecked,
    /// Only `Hidden -> Flagged` and `Flagged -> Hidden` count; other calls are no-ops.
    Transitional,
}

/// Everything needed to build a board.
///
/// Rows and columns are [`Coord`]s, so a board is at most 255 cells along each side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    /// `None` draws a fresh seed for every board.
    pub seed: Option<u64>,
    pub auto_flood_fill: bool,
    pub flag_accounting: FlagAccounting,
}

impl BoardConfig {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            cols,
            mines,
            seed: None,
            auto_flood_fill: false,
            flag_accounting: FlagAccounting::Unchecked,
        }
    }

    /// 10x10 with 10 mines and a fixed seed, as used by the automated controller.
    pub const fn solver_session() -> Self {
        Self::new(10, 10, 10).with_seed(42)
    }

    /// 15x15 with 15 mines, a fixed seed and flood fill, as used for manual play.
    pub const fn manual_session() -> Self {
        Self::new(15, 15, 15).with_seed(42).with_auto_flood_fill(true)
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn with_auto_flood_fill(mut self, auto_flood_fill: bool) -> Self {
        self.auto_flood_fill = auto_flood_fill;
        self
    }

    pub const fn with_flag_accounting(mut self, flag_accounting: FlagAccounting) -> Self {
        self.flag_accounting = flag_accounting;
        self
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub fn validate(&self) -> Result<()> {
        let issue = if self.rows < 1 || self.cols < 1 {
            Some(ConfigIssue::EmptyBoard)
        } else if self.mines < 1 {
            Some(ConfigIssue::NoMines)
        } else if self.mines > self.max_mines() {
            Some(ConfigIssue::TooManyMines {
                max: self.max_mines(),
            })
        } else {
            // rejection sampling never terminates if the mines cannot fit
            let available = self.total_cells() - safe_zone_len(self.size());
            (self.mines > available).then_some(ConfigIssue::SafeZoneTooLarge { available })
        };

        match issue {
            Some(reason) => Err(self.invalid(reason)),
            None => Ok(()),
        }
    }

    pub(crate) const fn invalid(&self, reason: ConfigIssue) -> GameError {
        GameError::InvalidConfiguration {
            rows: self.rows,
            cols: self.cols,
            mines: self.mines,
            reason,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::manual_session()
    }
}

/// The center cell and its in-bounds neighbors.
pub fn safe_zone(size: Coord2) -> impl Iterator<Item = Coord2> {
    let center = center_of(size);
    core::iter::once(center).chain(NeighborIter::new(center, size))
}

fn safe_zone_len(size: Coord2) -> CellCount {
    // at most nine cells
    safe_zone(size).count() as CellCount
}

/// Where the mines are, independent of what the player has uncovered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // eight neighbors at most
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// The first mine found inside the safe zone, if any.
    pub fn mine_in_safe_zone(&self) -> Option<Coord2> {
        safe_zone(self.size()).find(|&coords| self[coords])
    }

    /// Cell values for the whole grid: mines stay mines, every other cell gets its clue.
    pub fn values(&self) -> Array2<CellValue> {
        let size = self.size();
        let mut values = Array2::from_elem(size.to_nd_index(), CellValue::EMPTY);
        for coords in iter_coords(size) {
            values[coords.to_nd_index()] = if self[coords] {
                CellValue::Mine
            } else {
                CellValue::Clue(self.adjacent_mine_count(coords))
            };
        }
        values
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(cfg: BoardConfig) -> ConfigIssue {
        match cfg.validate() {
            Err(GameError::InvalidConfiguration { reason, .. }) => reason,
            other => panic!("expected invalid configuration, got {other:?}"),
        }
    }

    #[test]
    fn presets_are_valid() {
        assert_eq!(BoardConfig::solver_session().validate(), Ok(()));
        assert_eq!(BoardConfig::manual_session().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(reason(BoardConfig::new(0, 5, 1)), ConfigIssue::EmptyBoard);
        assert_eq!(reason(BoardConfig::new(5, 0, 1)), ConfigIssue::EmptyBoard);
    }

    #[test]
    fn rejects_zero_mines() {
        assert_eq!(reason(BoardConfig::new(5, 5, 0)), ConfigIssue::NoMines);
    }

    #[test]
    fn mine_cap_is_half_the_cells_rounded_down() {
        assert_eq!(BoardConfig::new(5, 5, 12).validate(), Ok(()));
        assert_eq!(
            reason(BoardConfig::new(5, 5, 13)),
            ConfigIssue::TooManyMines { max: 12 }
        );
    }

    #[test]
    fn rejects_boards_the_safe_zone_fills() {
        assert_eq!(
            reason(BoardConfig::new(3, 3, 4)),
            ConfigIssue::SafeZoneTooLarge { available: 0 }
        );
        assert_eq!(
            reason(BoardConfig::new(1, 4, 2)),
            ConfigIssue::SafeZoneTooLarge { available: 1 }
        );
        assert_eq!(BoardConfig::new(1, 6, 3).validate(), Ok(()));
    }

    #[test]
    fn safe_zone_is_clipped() {
        assert_eq!(safe_zone((10, 10)).count(), 9);
        assert_eq!(safe_zone((1, 1)).count(), 1);
        assert_eq!(safe_zone((2, 2)).count(), 4);
        assert_eq!(safe_zone((1, 6)).count(), 3);
    }

    #[test]
    fn layout_values_count_neighbors() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        let values = layout.values();

        assert_eq!(values[[0, 0]], CellValue::Mine);
        assert_eq!(values[[1, 1]], CellValue::Clue(2));
        assert_eq!(values[[0, 2]], CellValue::Clue(0));
        assert_eq!(values[[0, 1]], CellValue::Clue(1));
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
