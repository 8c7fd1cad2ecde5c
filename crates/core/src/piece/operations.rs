use super::error::PieceError;
use super::types::Piece;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Validates a piece before it is persisted.
///
/// Only the key fields are checked; the descriptive fields are free-form.
pub fn validate_piece(piece: &Piece) -> Result<(), PieceError> {
    if piece.id.trim().is_empty() {
        return Err(PieceError::EmptyId);
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&piece.year) {
        return Err(PieceError::InvalidYear(piece.year));
    }
    Ok(())
}
