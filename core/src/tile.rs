use serde::{Deserialize, Serialize};

/// What a cell holds. Fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Number of mines among the up-to-eight neighbors.
    Clue(u8),
}

impl CellValue {
    pub const EMPTY: CellValue = CellValue::Clue(0);

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// What the player sees of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// A cell as exposed to renderers: the value only shows once revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(CellValue),
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}
