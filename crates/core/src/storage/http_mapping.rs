//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! The repository itself never decides how a failure is presented; services
//! wrapping it use this mapping so every error kind gets a distinct status.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `DuplicateKey` -> 409 (Conflict)
/// - `StoreUnavailable` -> 503 (Service Unavailable)
/// - `WriteFailed` -> 500 (Internal Server Error)
/// - `DeserializationFailed` -> 500 (Internal Server Error)
/// - `Timeout` -> 504 (Gateway Timeout)
/// - `InvalidData` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use pieces_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::DuplicateKey {
///     entity_type: "Piece",
///     id: "artist42-7".to_string(),
///     year: 2001,
/// };
/// assert_eq!(repository_error_to_status_code(&error), 409);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::DuplicateKey { .. } => 409,
        RepositoryError::StoreUnavailable(_) => 503,
        RepositoryError::WriteFailed(_) => 500,
        RepositoryError::DeserializationFailed { .. } => 500,
        RepositoryError::Timeout { .. } => 504,
        RepositoryError::InvalidData(_) => 400,
    }
}
