use async_trait::async_trait;

use crate::piece::Piece;

use super::{Deadline, Result};

/// Repository for artwork pieces.
///
/// Every call is a fresh round trip to the backing store and must finish
/// before `deadline`, otherwise it fails with `RepositoryError::Timeout`.
#[async_trait]
pub trait PieceRepository: Send + Sync {
    /// Persists a new piece.
    ///
    /// Fails with `RepositoryError::DuplicateKey` when a piece with the same
    /// `(id, year)` is already stored. Existing pieces are never overwritten.
    async fn store_piece(&self, piece: &Piece, deadline: Deadline) -> Result<()>;

    /// Returns every stored piece, in whatever order the store yields them.
    async fn find_all_pieces(&self, deadline: Deadline) -> Result<Vec<Piece>>;
}
