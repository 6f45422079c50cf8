use thiserror::Error;

use crate::{CellCount, Coord};

/// Why a board configuration was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board needs at least one row and one column")]
    EmptyBoard,
    #[error("board needs at least one mine")]
    NoMines,
    #[error("at most {max} mines fit on this board")]
    TooManyMines { max: CellCount },
    #[error("only {available} cells lie outside the safe zone")]
    SafeZoneTooLarge { available: CellCount },
    #[error("mine inside the safe zone at {0:?}")]
    MineInSafeZone((Coord, Coord)),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration {rows}x{cols} with {mines} mines: {reason}")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
        reason: ConfigIssue,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
