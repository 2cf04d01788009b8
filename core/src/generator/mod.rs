use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for laying mines onto a freshly allocated board.
pub trait MineGenerator {
    fn place(self, board: &mut Board) -> Result<()>;
}

/// Allocates a board for `config`, lets `generator` place the mines and numbers it.
pub fn generate_board<G: MineGenerator>(config: GameConfig, generator: G) -> Result<Board> {
    config.validate()?;
    let mut board = Board::from_config(config);
    generator.place(&mut board)?;
    board.compute_adjacency_numbers();
    Ok(board)
}
