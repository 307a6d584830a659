use thiserror::Error;

/// Error returned by board construction and moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board dimensions or mine count cannot produce a playable board.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Coordinates lie outside the board.
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: u32, y: u32 },
    /// The round is over and the board no longer accepts moves.
    #[error("round already ended, no new moves are accepted")]
    InvalidStateTransition,
}

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, GameError>;
