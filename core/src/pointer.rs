use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Click {
    Left,
    Middle,
    Right,
}

/// Pixel geometry of a board window: a square per cell and a status footer below the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerLayout {
    pub cell_size: u32,
    pub hud_height: u32,
}

impl PointerLayout {
    pub const CELL_SIZE: u32 = 30;
    pub const HUD_HEIGHT: u32 = 40;

    pub const fn new(cell_size: u32, hud_height: u32) -> Self {
        Self {
            cell_size,
            hud_height,
        }
    }

    /// `(width, height)` in pixels, footer included.
    pub const fn window_size(&self, size: Coord2) -> (u32, u32) {
        (
            size.1 as u32 * self.cell_size,
            size.0 as u32 * self.cell_size + self.hud_height,
        )
    }

    /// The cell under pixel `(x, y)`, or `None` for the footer and anything off the grid.
    pub fn cell_at(&self, x: u32, y: u32, size: Coord2) -> Option<Coord2> {
        if self.cell_size == 0 {
            return None;
        }

        let (width, grid_height) = (
            u32::from(size.1) * self.cell_size,
            u32::from(size.0) * self.cell_size,
        );
        if x >= width || y >= grid_height {
            return None;
        }

        let row = Coord::try_from(y / self.cell_size).ok()?;
        let col = Coord::try_from(x / self.cell_size).ok()?;
        Some((row, col))
    }

    /// Left click reveals, right click flags, anything else is ignored.
    pub fn action_at(&self, x: u32, y: u32, click: Click, size: Coord2) -> Option<Action> {
        let coords = self.cell_at(x, y, size)?;
        match click {
            Click::Left => Some(Action::reveal(coords)),
            Click::Right => Some(Action::flag(coords)),
            Click::Middle => None,
        }
    }
}

impl Default for PointerLayout {
    fn default() -> Self {
        Self::new(Self::CELL_SIZE, Self::HUD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_includes_footer() {
        let layout = PointerLayout::default();
        assert_eq!(layout.window_size((15, 15)), (450, 490));
        assert_eq!(layout.window_size((10, 20)), (600, 340));
    }

    #[test]
    fn pixels_map_to_row_and_column() {
        let layout = PointerLayout::default();
        assert_eq!(layout.cell_at(0, 0, (10, 10)), Some((0, 0)));
        assert_eq!(layout.cell_at(29, 29, (10, 10)), Some((0, 0)));
        assert_eq!(layout.cell_at(30, 65, (10, 10)), Some((2, 1)));
        assert_eq!(layout.cell_at(299, 299, (10, 10)), Some((9, 9)));
    }

    #[test]
    fn footer_clicks_are_dropped() {
        let layout = PointerLayout::default();
        assert_eq!(layout.cell_at(10, 300, (10, 10)), None);
        assert_eq!(layout.cell_at(10, 339, (10, 10)), None);
        assert_eq!(layout.action_at(10, 310, Click::Left, (10, 10)), None);
    }

    #[test]
    fn clicks_pick_the_action() {
        let layout = PointerLayout::default();
        let size = (10, 10);
        assert_eq!(
            layout.action_at(45, 15, Click::Left, size),
            Some(Action::reveal((0, 1)))
        );
        assert_eq!(
            layout.action_at(45, 15, Click::Right, size),
            Some(Action::flag((0, 1)))
        );
        assert_eq!(layout.action_at(45, 15, Click::Middle, size), None);
    }
}
