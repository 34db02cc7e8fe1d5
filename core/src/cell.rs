use serde::{Deserialize, Serialize};

use crate::Coord2;

/// A single square of the board, carrying both its hidden truth (mine, count) and what the player has done to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pos: Coord2,
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) neighbor_count: u8,
}

impl Cell {
    pub const fn new(pos: Coord2) -> Self {
        Self {
            pos,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            neighbor_count: 0,
        }
    }

    pub const fn pos(&self) -> Coord2 {
        self.pos
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Adjacent mine count, always 0 for mine cells.
    pub const fn neighbor_count(&self) -> u8 {
        self.neighbor_count
    }

    /// Hidden and unflagged, the only state `reveal` acts on.
    pub const fn is_closed(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
