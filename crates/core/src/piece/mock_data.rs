//! Deterministic demo pieces for seeding a table.

use super::types::Piece;

const TITLES: [&str; 8] = [
    "Blue Study",
    "Harbour at Dusk",
    "Still Life with Lemons",
    "Untitled (Red)",
    "Portrait of a Stranger",
    "Morning Fog",
    "Composition No. 4",
    "The Orchard",
];

const MEDIA: [&str; 5] = [
    "oil on canvas",
    "watercolour",
    "charcoal",
    "acrylic on board",
    "ink on paper",
];

/// Generates `count` pieces for the given artist.
///
/// Ids run `{artist}-1` through `{artist}-{count}` and years cycle through a
/// decade starting at `first_year`, so every generated key is distinct.
pub fn generate_seed_pieces(artist_id: &str, first_year: i32, count: u32) -> Vec<Piece> {
    (1..=count)
        .map(|number| {
            let i = (number - 1) as usize;
            let id = Piece::compose_id(artist_id, number);
            let image_reference = format!("https://images.example.com/{}.jpg", id);

            Piece::new(id, first_year + (i % 10) as i32, TITLES[i % TITLES.len()])
                .with_medium(MEDIA[i % MEDIA.len()])
                .with_dimensions(30 + (i as i64 % 7) * 10, 40 + (i as i64 % 5) * 10)
                .with_sequence(number as i64)
                .with_image_reference(image_reference)
        })
        .collect()
}
