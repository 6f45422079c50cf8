use std::fmt::{Display, Formatter};

use sweeper_core::{Board, CellValue, CellView, Outcome, iter_coords};

/// Read-only text picture of a board: grid, status footer, and the end-of-game banner.
pub struct TextView<'a> {
    board: &'a Board,
}

impl<'a> TextView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }
}

fn glyph(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(CellValue::Mine) => '*',
        CellView::Revealed(CellValue::Clue(0)) => '.',
        CellView::Revealed(CellValue::Clue(count)) => char::from(b'0' + count.min(8)),
    }
}

impl Display for TextView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let board = self.board;
        let (rows, cols) = board.size();

        write!(f, "    ")?;
        for col in 0..cols {
            write!(f, "{}", col % 10)?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>3} ")?;
            for col in 0..cols {
                write!(f, "{}", glyph(board.cell((row, col))))?;
            }
            writeln!(f)?;
        }

        let summary = board.summary();
        let warning = if summary.flags_over_budget { " (!)" } else { "" };
        writeln!(
            f,
            "Progress: {}%  Flags: {}/{}{}",
            summary.progress_percent, summary.flags_placed, summary.total_mines, warning
        )?;

        match summary.outcome {
            Outcome::InProgress => {}
            Outcome::Victory | Outcome::Defeat => {
                let title = if summary.outcome == Outcome::Victory {
                    "VICTORY!"
                } else {
                    "GAME OVER"
                };
                writeln!(f, "{title}")?;
                writeln!(
                    f,
                    "Flags Correct: {}/{}",
                    summary.correct_flags.unwrap_or_default(),
                    summary.total_mines
                )?;
            }
        }

        Ok(())
    }
}

/// The grid with every unflagged mine uncovered, for showing the answer after a loss.
/// The mine that ended the game is drawn as `X`.
pub fn mine_map(board: &Board) -> String {
    let (_, cols) = board.size();
    let mut out = String::new();
    for (row, col) in iter_coords(board.size()) {
        let cell = board.cell((row, col));
        out.push(match cell {
            _ if board.triggered_mine() == Some((row, col)) => 'X',
            CellView::Hidden if board.value_at((row, col)).is_mine() => '*',
            _ => glyph(cell),
        });
        if col + 1 == cols {
            out.push('\n');
        }
    }
    out
}
