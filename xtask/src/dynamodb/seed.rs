//! Seed command implementation.

use pieces::repository::StorePieceRepository;
use pieces::store::StoreClient;
use pieces_core::piece::Piece;
use pieces_core::storage::{Deadline, PieceRepository, RepositoryError};
use std::time::Duration;

use super::error::Result;

/// Outcome of a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: u32,
    /// Pieces whose key was already present.
    pub skipped: u32,
}

/// Store pieces one by one through the repository.
///
/// Existing pieces are left untouched and counted as skipped; any other
/// failure aborts the run.
pub async fn seed_pieces<C: StoreClient>(
    repository: &StorePieceRepository<C>,
    pieces: &[Piece],
    timeout: Duration,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for piece in pieces {
        match repository
            .store_piece(piece, Deadline::after(timeout))
            .await
        {
            Ok(()) => report.inserted += 1,
            Err(RepositoryError::DuplicateKey { .. }) => report.skipped += 1,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(report)
}

/// Format a piece for the preview list.
pub fn format_piece_line(piece: &Piece) -> String {
    format!("{} ({}) - {}", piece.id, piece.year, piece.title)
}
