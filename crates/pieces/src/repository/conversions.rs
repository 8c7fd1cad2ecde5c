//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between attribute maps and [`Piece`].
//! These are testable in isolation without a store.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use pieces_core::piece::Piece;
use thiserror::Error;

use crate::store::Item;

use super::keys;

/// Why an item could not be read as a [`Piece`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("missing attribute {0}")]
    Missing(&'static str),
    #[error("attribute {name} is not of type {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },
    #[error("attribute {name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Convert a Piece to an item.
pub fn piece_to_item(piece: &Piece) -> Item {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        keys::PIECE_ID.to_string(),
        AttributeValue::S(piece.id.clone()),
    );
    item.insert(
        keys::YEAR.to_string(),
        AttributeValue::N(piece.year.to_string()),
    );

    // Data
    item.insert(
        keys::TITLE.to_string(),
        AttributeValue::S(piece.title.clone()),
    );
    item.insert(
        keys::MEDIA.to_string(),
        AttributeValue::S(piece.medium.clone()),
    );
    item.insert(
        keys::LENGTH.to_string(),
        AttributeValue::N(piece.length.to_string()),
    );
    item.insert(
        keys::HEIGHT.to_string(),
        AttributeValue::N(piece.height.to_string()),
    );
    item.insert(
        keys::PAGE.to_string(),
        AttributeValue::N(piece.sequence.to_string()),
    );
    item.insert(
        keys::IMAGE_URL.to_string(),
        AttributeValue::S(piece.image_reference.clone()),
    );

    item
}

/// Convert an item to a Piece.
pub fn item_to_piece(item: &Item) -> Result<Piece, AttributeError> {
    Ok(Piece {
        id: get_string(item, keys::PIECE_ID)?,
        year: get_number(item, keys::YEAR)?,
        title: get_string(item, keys::TITLE)?,
        medium: get_string(item, keys::MEDIA)?,
        length: get_number(item, keys::LENGTH)?,
        height: get_number(item, keys::HEIGHT)?,
        sequence: get_number(item, keys::PAGE)?,
        image_reference: get_string(item, keys::IMAGE_URL)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

fn get_string(item: &Item, name: &'static str) -> Result<String, AttributeError> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(_) => Err(AttributeError::WrongType {
            name,
            expected: "S",
        }),
        None => Err(AttributeError::Missing(name)),
    }
}

fn get_number<T: FromStr>(item: &Item, name: &'static str) -> Result<T, AttributeError> {
    match item.get(name) {
        Some(AttributeValue::N(value)) => {
            value
                .parse()
                .map_err(|_| AttributeError::InvalidNumber {
                    name,
                    value: value.clone(),
                })
        }
        Some(_) => Err(AttributeError::WrongType {
            name,
            expected: "N",
        }),
        None => Err(AttributeError::Missing(name)),
    }
}
