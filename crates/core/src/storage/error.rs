use thiserror::Error;

use crate::piece::PieceError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} already exists: {id} ({year})")]
    DuplicateKey {
        entity_type: &'static str,
        id: String,
        year: i32,
    },
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Write failed: {0}")]
    WriteFailed(String),
    #[error("Could not deserialize item {index}{}: {reason}", id_suffix(.id))]
    DeserializationFailed {
        index: usize,
        id: Option<String>,
        reason: String,
    },
    #[error("{operation} timed out")]
    Timeout { operation: &'static str },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<PieceError> for RepositoryError {
    fn from(err: PieceError) -> Self {
        RepositoryError::InvalidData(err.to_string())
    }
}

fn id_suffix(id: &Option<String>) -> String {
    id.as_ref().map(|id| format!(" ({})", id)).unwrap_or_default()
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
