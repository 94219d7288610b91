use thiserror::Error;

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// The board side is zero or the mines do not leave a single safe tile.
    #[error("board configuration is invalid")]
    InvalidConfiguration,
    /// Coordinates point outside the board.
    #[error("coordinates are out of bounds")]
    OutOfBounds,
}

pub type Result<T> = std::result::Result<T, BoardError>;
