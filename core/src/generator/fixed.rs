use super::*;

/// Places mines on a known set of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMineGenerator {
    mine_coords: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mine_coords: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mine_coords: mine_coords.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn place(self, board: &mut Board) -> Result<()> {
        board.place_mines_at(&self.mine_coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_listed_mines_and_numbers_board() {
        let config = GameConfig::new(2, 3, 2).unwrap();
        let board = generate_board(config, FixedMineGenerator::new([(0, 0), (1, 2)])).unwrap();

        assert!(board.has_mine_at((0, 0)));
        assert!(board.has_mine_at((1, 2)));
        assert_eq!(board.cell_at((0, 1)).adjacent_mines, 2);
        assert_eq!(board.cell_at((1, 0)).adjacent_mines, 1);
    }

    #[test]
    fn mismatched_mine_count_is_rejected() {
        let config = GameConfig::new(2, 3, 2).unwrap();
        assert!(generate_board(config, FixedMineGenerator::new([(0, 0)])).is_err());
    }
}
