use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement outside the safe zone, reproducible from its seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, board: &Board, start: Coord2, mines: CellCount) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        place_mines_after_first_click(board, start, mines, &mut rng)
    }
}
