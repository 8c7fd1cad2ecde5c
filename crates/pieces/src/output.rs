//! Output formatting functions.

use pieces_core::piece::Piece;

use crate::cli::OutputFormat;

/// Format a value for output.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Format a piece for display.
pub fn format_piece(piece: &Piece) -> String {
    let mut output = format!(
        "{} ({})\n  ID: {}\n  Medium: {}\n  Size: {} x {}\n  Page: {}",
        piece.title,
        piece.year,
        piece.id,
        piece.medium,
        piece.length,
        piece.height,
        piece.sequence
    );
    if !piece.image_reference.is_empty() {
        output.push_str(&format!("\n  Image: {}", piece.image_reference));
    }
    output
}

/// Format pieces for display.
pub fn format_pieces(pieces: &[Piece]) -> String {
    if pieces.is_empty() {
        return "No pieces found.".to_string();
    }
    let mut output = format!("PIECES ({})\n", pieces.len());
    output.push_str(&"-".repeat(40));
    for piece in pieces {
        output.push_str(&format!("\n{}", format_piece(piece)));
        output.push('\n');
    }
    output
}
