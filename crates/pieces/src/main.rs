//! pieces CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pieces::cli::{repository_error_to_exit_code, Cli, Commands, OutputFormat};
use pieces::config::Config;
use pieces::output::{format_output, format_pieces};
use pieces::repository::StorePieceRepository;
use pieces::store::dynamodb;
use pieces_core::storage::{Deadline, PieceRepository, RepositoryError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing subscriber; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pieces=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            let code = err
                .downcast_ref::<RepositoryError>()
                .map(repository_error_to_exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.apply(Config::from_env());

    tracing::debug!(
        endpoint = %config.target_display(),
        table = %config.table_name,
        "Using configuration"
    );

    let store = dynamodb::connect(&config).await;
    let repository = StorePieceRepository::new(store, &config.table_name);
    let deadline = Deadline::after(config.request_timeout());

    match cli.command {
        Commands::Store(args) => {
            let piece = args.into_piece();
            repository.store_piece(&piece, deadline).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&piece, cli.format)),
                OutputFormat::Pretty => {
                    if !cli.quiet {
                        println!("Stored {} ({})", piece.id, piece.year);
                    }
                }
            }
        }
        Commands::List => {
            let pieces = repository.find_all_pieces(deadline).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&pieces, cli.format)),
                OutputFormat::Pretty => println!("{}", format_pieces(&pieces)),
            }
        }
    }

    Ok(())
}
