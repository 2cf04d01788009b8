use serde::{Deserialize, Serialize};

/// State of a single grid position. The position itself is the cell's index in the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines among the Moore neighbourhood, meaningless for mine cells
    pub adjacent_mines: u8,
}

impl Cell {
    /// Whether the cell is still covered, flagged or not.
    pub const fn is_covered(self) -> bool {
        !self.is_revealed
    }

    /// Covered and unflagged, the only state a reveal can act on.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
