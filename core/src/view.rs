use serde::{Deserialize, Serialize};

use crate::*;

/// Per-cell state handed to the front-end for redraw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: Coord,
    pub col: Coord,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// `None` until the cell is revealed
    pub mine_if_revealed: Option<bool>,
    /// Mine status of every cell once the game has ended
    pub mine_if_over: Option<bool>,
    /// Only known for revealed safe cells
    pub adjacent_mines: Option<u8>,
}

impl CellView {
    pub fn new((row, col): Coord2, cell: Cell, game_over: bool) -> Self {
        Self {
            row,
            col,
            is_revealed: cell.is_revealed,
            is_flagged: cell.is_flagged,
            mine_if_revealed: cell.is_revealed.then_some(cell.is_mine),
            mine_if_over: game_over.then_some(cell.is_mine),
            adjacent_mines: (cell.is_revealed && !cell.is_mine).then_some(cell.adjacent_mines),
        }
    }

    pub fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    /// Mine status as far as the player may know it.
    pub fn known_mine(&self) -> Option<bool> {
        self.mine_if_revealed.or(self.mine_if_over)
    }
}

/// Aggregate state for the heads-up display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudView {
    pub flags_remaining: CellCount,
    pub elapsed_secs: u64,
    pub is_over: bool,
    pub outcome: Outcome,
}

impl HudView {
    pub fn clock(&self) -> String {
        format_clock(self.elapsed_secs)
    }
}

/// Formats seconds as `MM:SS`, minutes keep growing past 99.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
