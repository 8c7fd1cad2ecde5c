mod error;
mod mock_data;
mod operations;
mod types;

pub use error::PieceError;
pub use mock_data::generate_seed_pieces;
pub use operations::{validate_piece, MAX_YEAR, MIN_YEAR};
pub use types::{Piece, PieceKey};
