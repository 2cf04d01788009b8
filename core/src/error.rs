use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {rows}x{cols} board cannot hold {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Invalid coordinates ({row}, {col})")]
    InvalidCoords { row: Coord, col: Coord },
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
}

pub type Result<T> = core::result::Result<T, GameError>;
