use std::fmt;

use serde::{Deserialize, Serialize};

/// An artwork record.
///
/// `id` is conventionally the artist identifier joined with the picture
/// number (see [`Piece::compose_id`]). Together with `year` it forms the
/// composite key that identifies a piece in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: String,
    pub year: i32,
    pub title: String,
    /// Free text, e.g. "oil on canvas".
    pub medium: String,
    pub length: i64,
    pub height: i64,
    /// Ordering hint, typically the catalogue page.
    pub sequence: i64,
    /// URI or locator of the piece's image.
    pub image_reference: String,
}

impl Piece {
    /// Creates a piece with the given identity and title.
    ///
    /// The remaining fields start empty or zero and can be filled with the
    /// `with_*` builders.
    pub fn new(id: impl Into<String>, year: i32, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            year,
            title: title.into(),
            medium: String::new(),
            length: 0,
            height: 0,
            sequence: 0,
            image_reference: String::new(),
        }
    }

    /// Builds the conventional piece id from an artist id and picture number.
    pub fn compose_id(artist_id: &str, number: u32) -> String {
        format!("{}-{}", artist_id, number)
    }

    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = medium.into();
        self
    }

    /// Sets the physical dimensions.
    pub fn with_dimensions(mut self, length: i64, height: i64) -> Self {
        self.length = length;
        self.height = height;
        self
    }

    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_image_reference(mut self, image_reference: impl Into<String>) -> Self {
        self.image_reference = image_reference.into();
        self
    }

    /// Returns the composite key of this piece.
    pub fn key(&self) -> PieceKey {
        PieceKey {
            id: self.id.clone(),
            year: self.year,
        }
    }
}

/// The `(id, year)` pair that uniquely identifies a piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceKey {
    pub id: String,
    pub year: i32,
}

impl fmt::Display for PieceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.year)
    }
}
