extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod error;
mod generator;
mod reveal;
mod session;
mod types;

/// Board shape and mine total for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines > mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// The three classic presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner => GameConfig::new_unchecked((9, 9), 10),
            Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Expert => GameConfig::new_unchecked((16, 30), 99),
        }
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }

    pub const fn exploded(self) -> bool {
        matches!(self, Self::HitMine)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
