use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Tile cannot be revealed in its current state")]
    NotRevealable,
}

pub type Result<T> = core::result::Result<T, BoardError>;
