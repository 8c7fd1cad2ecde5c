//! Piece repository over a [`crate::store::StoreClient`].

mod conversions;
mod keys;
mod store_repository;

pub use conversions::{item_to_piece, piece_to_item, AttributeError};
pub use keys::{key_schema, piece_key};
pub use store_repository::StorePieceRepository;
