//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};

use pieces_core::piece::Piece;
use pieces_core::storage::RepositoryError;

use crate::config::Config;

/// Store and list artwork pieces.
#[derive(Debug, Parser)]
#[command(name = "pieces")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Table to use (overrides PIECES_TABLE_NAME).
    #[arg(long, global = true)]
    pub table_name: Option<String>,

    /// DynamoDB endpoint URL (overrides AWS_ENDPOINT_URL).
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Per-call deadline in milliseconds (overrides PIECES_TIMEOUT_MS).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies command-line overrides on top of the environment configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(table_name) = &self.table_name {
            config.table_name = table_name.clone();
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.request_timeout_ms = timeout_ms;
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store a new piece. Fails if the (id, year) pair already exists.
    Store(StoreArgs),
    /// List every stored piece.
    List,
}

/// Fields of the piece to store.
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Piece ID, e.g. "artist42-7".
    #[arg(
        long,
        required_unless_present_all = ["artist", "number"],
        conflicts_with_all = ["artist", "number"]
    )]
    pub id: Option<String>,

    /// Artist ID, combined with --number into the piece ID.
    #[arg(long, requires = "number")]
    pub artist: Option<String>,

    /// Picture number, combined with --artist into the piece ID.
    #[arg(long, requires = "artist")]
    pub number: Option<u32>,

    /// Year the piece was made.
    #[arg(long)]
    pub year: i32,

    /// Title.
    #[arg(long)]
    pub title: String,

    /// Medium, e.g. "oil on canvas".
    #[arg(long, default_value = "")]
    pub medium: String,

    /// Length.
    #[arg(long, default_value_t = 0)]
    pub length: i64,

    /// Height.
    #[arg(long, default_value_t = 0)]
    pub height: i64,

    /// Ordering hint, typically the catalogue page.
    #[arg(long, default_value_t = 0)]
    pub sequence: i64,

    /// Image URI or locator.
    #[arg(long, default_value = "")]
    pub image_reference: String,
}

impl StoreArgs {
    /// Resolves the piece ID from --id or --artist/--number.
    pub fn piece_id(&self) -> String {
        match (&self.id, &self.artist, self.number) {
            (Some(id), _, _) => id.clone(),
            (None, Some(artist), Some(number)) => Piece::compose_id(artist, number),
            _ => String::new(),
        }
    }

    pub fn into_piece(self) -> Piece {
        Piece::new(self.piece_id(), self.year, self.title)
            .with_medium(self.medium)
            .with_dimensions(self.length, self.height)
            .with_sequence(self.sequence)
            .with_image_reference(self.image_reference)
    }
}

/// Maps a repository error to the process exit code.
///
/// - `InvalidData` -> 2
/// - `DuplicateKey` -> 3
/// - `StoreUnavailable` -> 4
/// - `WriteFailed` -> 5
/// - `DeserializationFailed` -> 6
/// - `Timeout` -> 7
pub fn repository_error_to_exit_code(error: &RepositoryError) -> u8 {
    match error {
        RepositoryError::InvalidData(_) => 2,
        RepositoryError::DuplicateKey { .. } => 3,
        RepositoryError::StoreUnavailable(_) => 4,
        RepositoryError::WriteFailed(_) => 5,
        RepositoryError::DeserializationFailed { .. } => 6,
        RepositoryError::Timeout { .. } => 7,
    }
}
