use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// The whole game: mine layout, clues, what the player has uncovered, and the end state.
///
/// Actions never fail. Calls outside the grid, on cells in the wrong state, or after the
/// game is over leave the board untouched and report [`RevealOutcome::NoChange`] or
/// [`MarkOutcome::NoChange`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    seed: Option<u64>,
    values: Array2<CellValue>,
    visibility: Array2<Visibility>,
    revealed_count: Saturating<CellCount>,
    flags_placed: isize,
    total_mines: CellCount,
    total_safe_cells: CellCount,
    game_over: bool,
    victory: bool,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Generates a fresh board. Without a seed in `config` one is drawn at random.
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        log::debug!("seed: {}", seed);

        let layout = RejectionSampler::new(seed).generate(&config);
        Ok(Self::start(config, Some(seed), &layout))
    }

    /// Starts a board on a hand-made layout. The size and mine count come from the layout;
    /// the rest of `config` applies as usual.
    pub fn from_layout(layout: &MineLayout, config: BoardConfig) -> Result<Self> {
        let (rows, cols) = layout.size();
        let config = BoardConfig {
            rows,
            cols,
            mines: layout.mine_count(),
            ..config
        };
        config.validate()?;

        if let Some(coords) = layout.mine_in_safe_zone() {
            return Err(config.invalid(ConfigIssue::MineInSafeZone(coords)));
        }

        Ok(Self::start(config, None, layout))
    }

    /// A new board from the same configuration. A fixed seed gives the same layout again.
    pub fn restarted(&self) -> Result<Self> {
        Self::new(self.config)
    }

    fn start(config: BoardConfig, seed: Option<u64>, layout: &MineLayout) -> Self {
        let size = layout.size();
        let mut board = Self {
            config,
            seed,
            values: layout.values(),
            visibility: Array2::default(size.to_nd_index()),
            revealed_count: Saturating(0),
            flags_placed: 0,
            total_mines: layout.mine_count(),
            total_safe_cells: layout.safe_cell_count(),
            game_over: false,
            victory: false,
            triggered_mine: None,
        };

        let center = center_of(size);
        board.visibility[center.to_nd_index()] = Visibility::Revealed;
        board.revealed_count += 1;
        if config.auto_flood_fill && board.values[center.to_nd_index()] == CellValue::EMPTY {
            board.flood_fill(center);
        }
        board.evaluate_victory();

        log::debug!(
            "Board {}x{} ready, {} mines, {} of {} safe cells revealed",
            size.0,
            size.1,
            board.total_mines,
            board.revealed_count.0,
            board.total_safe_cells
        );
        board
    }

    /// The seed the layout was generated from, `None` for hand-made layouts.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn victory(&self) -> bool {
        self.victory
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flags_placed(&self) -> isize {
        self.flags_placed
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn total_safe_cells(&self) -> CellCount {
        self.total_safe_cells
    }

    /// The mine that ended the game, if one did.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn visibility(&self, coords: Coord2) -> Visibility {
        self.visibility[coords.to_nd_index()]
    }

    /// The value under a cell, only once it has been revealed.
    pub fn revealed_value(&self, coords: Coord2) -> Option<CellValue> {
        match self.visibility(coords) {
            Visibility::Revealed => Some(self.values[coords.to_nd_index()]),
            Visibility::Hidden | Visibility::Flagged => None,
        }
    }

    /// The value under a cell regardless of visibility.
    pub fn value_at(&self, coords: Coord2) -> CellValue {
        self.values[coords.to_nd_index()]
    }

    pub fn cell(&self, coords: Coord2) -> CellView {
        match self.visibility(coords) {
            Visibility::Hidden => CellView::Hidden,
            Visibility::Flagged => CellView::Flagged,
            Visibility::Revealed => CellView::Revealed(self.values[coords.to_nd_index()]),
        }
    }

    pub fn try_cell(&self, coords: Coord2) -> Result<CellView> {
        if self.contains(coords) {
            Ok(self.cell(coords))
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.game_over
            || !self.contains(coords)
            || self.visibility(coords) != Visibility::Hidden
        {
            return RevealOutcome::NoChange;
        }

        self.visibility[coords.to_nd_index()] = Visibility::Revealed;
        self.revealed_count += 1;

        match self.values[coords.to_nd_index()] {
            CellValue::Mine => {
                log::debug!("Mine at {:?}", coords);
                self.triggered_mine = Some(coords);
                self.end_game(false);
                RevealOutcome::HitMine
            }
            CellValue::Clue(count) => {
                log::debug!("Revealed {:?}, clue: {}", coords, count);
                if count == 0 && self.config.auto_flood_fill {
                    self.flood_fill(coords);
                }

                if self.evaluate_victory() {
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
        }
    }

    pub fn flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.game_over || !self.contains(coords) {
            return MarkOutcome::NoChange;
        }

        let previous = self.visibility(coords);
        match (self.config.flag_accounting, previous) {
            (FlagAccounting::Transitional, Visibility::Hidden) => {}
            (FlagAccounting::Transitional, _) => return MarkOutcome::NoChange,
            (FlagAccounting::Unchecked, Visibility::Hidden) => {}
            (FlagAccounting::Unchecked, _) => {
                log::warn!("Flagging {:?} which is already {:?}", coords, previous);
            }
        }

        self.visibility[coords.to_nd_index()] = Visibility::Flagged;
        self.flags_placed += 1;
        self.evaluate_victory();
        MarkOutcome::Changed
    }

    pub fn unflag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.game_over || !self.contains(coords) {
            return MarkOutcome::NoChange;
        }

        let previous = self.visibility(coords);
        match (self.config.flag_accounting, previous) {
            (FlagAccounting::Transitional, Visibility::Flagged) => {}
            (FlagAccounting::Transitional, _) => return MarkOutcome::NoChange,
            (FlagAccounting::Unchecked, Visibility::Flagged) => {}
            (FlagAccounting::Unchecked, _) => {
                log::warn!("Unflagging {:?} which is {:?}", coords, previous);
            }
        }

        self.visibility[coords.to_nd_index()] = Visibility::Hidden;
        self.flags_placed -= 1;
        if self.flags_placed < 0 {
            log::warn!("Flag counter went negative: {}", self.flags_placed);
        }
        MarkOutcome::Changed
    }

    /// Reveals the connected zero region around `origin` and the clue cells bordering it.
    ///
    /// Only hidden cells are touched, each at most once. Zero cells have no mine neighbors,
    /// so the walk never reaches a mine. Returns how many cells were revealed.
    fn flood_fill(&mut self, origin: Coord2) -> CellCount {
        let size = self.size();
        let mut visited: Array2<bool> = Array2::default(size.to_nd_index());
        visited[origin.to_nd_index()] = true;
        let mut to_visit: Vec<Coord2> = NeighborIter::new(origin, size).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        let mut opened = 0;
        while let Some(visit_coords) = to_visit.pop() {
            let index = visit_coords.to_nd_index();
            if visited[index] {
                continue;
            }
            visited[index] = true;

            if self.visibility[index] != Visibility::Hidden {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            let CellValue::Clue(count) = self.values[index] else {
                continue;
            };

            self.visibility[index] = Visibility::Revealed;
            self.revealed_count += 1;
            opened += 1;
            log::trace!("Flood opened cell at {:?}, clue: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(
                    NeighborIter::new(visit_coords, size)
                        .filter(|pos| !visited[pos.to_nd_index()]),
                );
            }
        }

        log::debug!("Flood fill from {:?} opened {} cells", origin, opened);
        opened
    }

    /// Latches the win once every safe cell is revealed. Returns whether the game is won.
    fn evaluate_victory(&mut self) -> bool {
        if !self.game_over && self.revealed_count == Saturating(self.total_safe_cells) {
            self.end_game(true);
        }
        self.victory
    }

    fn end_game(&mut self, won: bool) {
        if self.game_over {
            return;
        }

        self.game_over = true;
        self.victory = won;
        log::debug!(
            "Game over: {}, {} of {} safe cells revealed",
            if won { "victory" } else { "defeat" },
            self.revealed_count.0,
            self.total_safe_cells
        );
    }
}
