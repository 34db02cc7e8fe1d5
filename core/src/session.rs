use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Playing
/// - Ready -> Won (first click clears the board)
/// - Playing -> Won
/// - Playing -> Lost
///
/// Any state goes back to Ready on reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No mines placed yet
    #[default]
    Ready,
    /// First click done, mines are on the board
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from reset to result.
///
/// Every action takes the session by reference and returns the next one, so earlier snapshots stay valid. Actions
/// that are not allowed in the current state (touching a finished game, opening a flag, chording an unsatisfied number)
/// return an identical session instead of an error. Only out-of-bounds coordinates are reported as
/// [`GameError::InvalidCoords`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    flags_remaining: i32,
    seed: u64,
}

impl GameSession {
    pub fn new_game(difficulty: Difficulty) -> Self {
        Self::new(difficulty.config())
    }

    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Session whose mine layout is fully determined by `seed` and the first click.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let (rows, cols) = config.size;
        log::debug!("new {}x{} game with {} mines", rows, cols, config.mines);
        Self {
            config,
            board: Board::empty(rows, cols),
            status: GameStatus::Ready,
            flags_remaining: config.mines.into(),
            seed,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Mines minus flags; negative when the player over-flags.
    pub fn flags_remaining(&self) -> i32 {
        self.flags_remaining
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fresh empty board with the same config.
    pub fn reset(&self) -> Self {
        log::debug!("reset game");
        Self::with_seed(self.config, self.next_seed())
    }

    pub fn change_difficulty(&self, difficulty: Difficulty) -> Self {
        log::debug!("change difficulty to {:?}", difficulty);
        Self::with_seed(difficulty.config(), self.next_seed())
    }

    /// Opens a cell, placing mines first if this is the opening click.
    pub fn open(&self, coords: Coord2) -> Result<Self> {
        self.open_with(coords, RandomMineGenerator::new(self.seed))
    }

    /// Like [`GameSession::open`], with `generator` laying the mines if this is the opening click.
    pub fn open_with(&self, coords: Coord2, generator: impl MineGenerator) -> Result<Self> {
        let coords = self.board.validate_coords(coords)?;
        log::trace!("open {:?}", coords);

        if self.status.is_finished() {
            return Ok(self.clone());
        }

        let (board, outcome) = if self.status.is_ready() {
            log::debug!("first click at {:?}", coords);
            generator
                .generate(&self.board, coords, self.config.mines)
                .reveal_cascade(coords)
        } else {
            self.board.reveal_cascade(coords)
        };

        Ok(self.settle(board, outcome))
    }

    /// Toggles a flag. Allowed before the first click.
    pub fn flag(&self, coords: Coord2) -> Result<Self> {
        let coords = self.board.validate_coords(coords)?;
        log::trace!("flag {:?}", coords);

        if self.status.is_finished() {
            return Ok(self.clone());
        }

        let (board, outcome) = self.board.toggle_flag(coords);
        if !outcome.has_update() {
            return Ok(self.clone());
        }

        Ok(Self {
            config: self.config,
            flags_remaining: self.flags_remaining_on(&board),
            board,
            status: self.status,
            seed: self.seed,
        })
    }

    /// Opens every closed neighbor of a revealed number whose flag count matches it.
    pub fn chord(&self, coords: Coord2) -> Result<Self> {
        let coords = self.board.validate_coords(coords)?;
        log::trace!("chord {:?}", coords);

        if !self.status.is_playing() {
            return Ok(self.clone());
        }

        let (board, outcome) = self.board.chord_open(coords);
        if !outcome.has_update() {
            return Ok(self.clone());
        }

        Ok(self.settle(board, outcome))
    }

    fn settle(&self, board: Board, outcome: RevealOutcome) -> Self {
        let mut next = Self {
            config: self.config,
            board,
            status: GameStatus::Playing,
            flags_remaining: self.flags_remaining,
            seed: self.seed,
        };

        if outcome.exploded() {
            log::debug!("hit a mine, game lost");
            next.board = next.board.reveal_all_mines();
            next.status = GameStatus::Lost;
        } else if next.board.check_win() {
            log::debug!("all safe cells open, game won");
            next.board = next.board.flag_all_mines();
            next.flags_remaining = 0;
            next.status = GameStatus::Won;
        } else {
            next.flags_remaining = self.flags_remaining_on(&next.board);
        }

        next
    }

    fn flags_remaining_on(&self, board: &Board) -> i32 {
        i32::from(self.config.mines) - i32::from(board.count_flags())
    }

    fn next_seed(&self) -> u64 {
        SmallRng::seed_from_u64(self.seed).random()
    }
}
