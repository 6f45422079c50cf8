use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Victory,
    Defeat,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// What the status footer shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub outcome: Outcome,
    /// Share of safe cells revealed, rounded down.
    pub progress_percent: u8,
    pub flags_placed: isize,
    pub total_mines: CellCount,
    /// More flags down than there are mines.
    pub flags_over_budget: bool,
    /// Only filled in once the game is over.
    pub correct_flags: Option<CellCount>,
}

impl Board {
    pub fn outcome(&self) -> Outcome {
        match (self.game_over(), self.victory()) {
            (false, _) => Outcome::InProgress,
            (true, true) => Outcome::Victory,
            (true, false) => Outcome::Defeat,
        }
    }

    pub fn progress_percent(&self) -> u8 {
        let safe = u32::from(self.total_safe_cells()).max(1);
        let revealed = u32::from(self.revealed_count());
        // revealed can overshoot after unchecked flag overwrites
        (revealed * 100 / safe).min(100) as u8
    }

    /// Flags sitting on mines. A won game counts every mine as found.
    pub fn correct_flags(&self) -> CellCount {
        if self.victory() {
            return self.total_mines();
        }

        iter_coords(self.size())
            .filter(|&coords| {
                self.visibility(coords) == Visibility::Flagged && self.value_at(coords).is_mine()
            })
            .count() as CellCount
    }

    pub fn summary(&self) -> Summary {
        Summary {
            outcome: self.outcome(),
            progress_percent: self.progress_percent(),
            flags_placed: self.flags_placed(),
            total_mines: self.total_mines(),
            flags_over_budget: self.flags_placed() > self.total_mines() as isize,
            correct_flags: self.game_over().then(|| self.correct_flags()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x6 with mines in the two outer corners of the left column.
    fn board() -> Board {
        let layout = MineLayout::from_mine_coords((4, 6), &[(0, 0), (3, 0)]).unwrap();
        Board::from_layout(&layout, BoardConfig::new(0, 0, 0)).unwrap()
    }

    #[test]
    fn fresh_board_summary() {
        let board = board();
        let summary = board.summary();

        assert_eq!(summary.outcome, Outcome::InProgress);
        // one of 22 safe cells
        assert_eq!(summary.progress_percent, 4);
        assert_eq!(summary.flags_placed, 0);
        assert_eq!(summary.total_mines, 2);
        assert!(!summary.flags_over_budget);
        assert_eq!(summary.correct_flags, None);
    }

    #[test]
    fn over_budget_when_flags_exceed_mines() {
        let mut board = board();
        board.flag((0, 5));
        board.flag((1, 5));
        assert!(!board.summary().flags_over_budget);

        board.flag((2, 5));
        assert!(board.summary().flags_over_budget);
    }

    #[test]
    fn defeat_counts_only_flags_on_mines() {
        let mut board = board();
        board.flag((0, 0));
        board.flag((1, 5));
        board.reveal((3, 0));

        let summary = board.summary();
        assert_eq!(summary.outcome, Outcome::Defeat);
        assert_eq!(summary.correct_flags, Some(1));
    }

    #[test]
    fn victory_credits_every_mine() {
        let mut board = board();
        for coords in iter_coords(board.size()) {
            if !board.value_at(coords).is_mine() {
                board.reveal(coords);
            }
        }

        let summary = board.summary();
        assert_eq!(summary.outcome, Outcome::Victory);
        assert!(summary.outcome.is_finished());
        assert_eq!(summary.progress_percent, 100);
        assert_eq!(summary.correct_flags, Some(2));
    }
}
