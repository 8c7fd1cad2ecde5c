use thiserror::Error;

/// Errors that can occur when validating a piece.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PieceError {
    #[error("Piece id cannot be empty")]
    EmptyId,
    #[error("Invalid year {0}: must be between 1 and 9999")]
    InvalidYear(i32),
}
