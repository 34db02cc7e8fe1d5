use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
