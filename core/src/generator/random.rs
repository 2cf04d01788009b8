use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement driven by a seeded PRNG, the same seed always yields the same layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Picks a fresh seed from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn place(self, board: &mut Board) -> Result<()> {
        log::debug!("seed: {}", self.seed);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        board.place_mines(&mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::INTERMEDIATE;
        let first = generate_board(config, RandomMineGenerator::new(1234)).unwrap();
        let second = generate_board(config, RandomMineGenerator::new(1234)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.phase(), BoardPhase::Numbered);
    }

    #[test]
    fn generated_board_has_requested_mines() {
        for seed in 0..32 {
            let board =
                generate_board(GameConfig::BEGINNER, RandomMineGenerator::new(seed)).unwrap();
            let mines = board.iter_cells().filter(|(_, cell)| cell.is_mine).count();
            assert_eq!(mines, 10, "seed {seed}");
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_placement() {
        let config = GameConfig::new_unchecked(2, 2, 4);
        assert_eq!(
            generate_board(config, RandomMineGenerator::new(0)),
            Err(GameError::InvalidConfiguration {
                rows: 2,
                cols: 2,
                mines: 4
            })
        );
    }
}
