//! Error types for the engine.
//!
//! Ordinary gameplay never produces an error: blocked moves are reported as
//! outcomes. These variants cover integration defects (the driver's state
//! machine disagrees with the engine) and rejected configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("a cube is already falling at ({x}, {y})")]
    PieceAlreadyActive { x: i32, y: i32 },

    #[error("the game is over; restart before spawning")]
    GameOver,

    #[error("cannot settle at ({x}, {y}): cell is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("cannot settle at ({x}, {y}): cell is occupied")]
    CellOccupied { x: i32, y: i32 },

    #[error("invalid tile value {0}: must be a power of two >= 2")]
    InvalidTile(u32),

    #[error("invalid configuration: {0}")]
    Config(String),
}
