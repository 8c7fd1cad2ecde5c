//! Attribute names and key construction for the pieces table.
//!
//! Table layout:
//! - `PieceId` (S): partition key, `{artist}-{number}`
//! - `Year` (N): sort key

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use pieces_core::piece::PieceKey;

use crate::store::{Item, KeySchema};

pub const PIECE_ID: &str = "PieceId";
pub const YEAR: &str = "Year";
pub const TITLE: &str = "Title";
pub const MEDIA: &str = "Media";
pub const LENGTH: &str = "Length";
pub const HEIGHT: &str = "Height";
pub const PAGE: &str = "Page";
pub const IMAGE_URL: &str = "ImageUrl";

/// Primary key schema of the pieces table.
pub fn key_schema() -> KeySchema {
    KeySchema {
        partition_key: PIECE_ID,
        sort_key: Some(YEAR),
    }
}

/// Builds the primary key item for a piece.
pub fn piece_key(key: &PieceKey) -> Item {
    HashMap::from([
        (PIECE_ID.to_string(), AttributeValue::S(key.id.clone())),
        (YEAR.to_string(), AttributeValue::N(key.year.to_string())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_key_has_both_key_attributes() {
        let key = piece_key(&PieceKey {
            id: "artist42-7".to_string(),
            year: 2001,
        });

        assert_eq!(key.len(), 2);
        assert_eq!(key.get(PIECE_ID).unwrap().as_s().unwrap(), "artist42-7");
        assert_eq!(key.get(YEAR).unwrap().as_n().unwrap(), "2001");
    }

    #[test]
    fn test_key_schema() {
        let schema = key_schema();

        assert_eq!(schema.partition_key, "PieceId");
        assert_eq!(schema.sort_key, Some("Year"));
    }
}
