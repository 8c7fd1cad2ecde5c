//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;
use pieces::config::Config;
use pieces::repository::StorePieceRepository;
use pieces::store::dynamodb;
use pieces_core::piece::generate_seed_pieces;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy DynamoDB table infrastructure.
    Deploy(DeployCommand),

    /// Seed the table with generated pieces.
    Seed(SeedCommand),
}

/// Deploy or update DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy DynamoDB table infrastructure.

By default, this command creates the pieces DynamoDB table with the
PieceId (partition) and Year (sort) key schema.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to ap-southeast-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating it.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, default_value = "Pieces")]
    pub table_name: String,
}

/// Seed the table with generated pieces.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert demo pieces into DynamoDB.

Pieces are numbered {artist}-1 through {artist}-{count} with years spread
over a decade. Pieces that already exist are skipped, so the command can be
re-run safely.")]
pub struct SeedCommand {
    /// Artist ID used as the piece ID prefix.
    #[arg(long, default_value = "artist1")]
    pub artist: String,

    /// Year of the first generated piece.
    #[arg(long, default_value = "1990")]
    pub first_year: i32,

    /// Number of pieces to generate.
    #[arg(long, default_value = "15")]
    pub count: u32,

    /// Table name to use.
    #[arg(long, default_value = "Pieces")]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let config = Config::from_env();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), config.target_display());
        aprintln!();
    }

    let store = dynamodb::connect(&config).await;
    let dynamo_client = store.client();
    let current_state = client::get_table_state(dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        // Destroy flow
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in planning::format_destroy_plan(&plan) {
                aprintln!("  {}", p_r(&line));
            }
            aprintln!();
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force {
            let confirmed = Confirm::new()
                .with_prompt("Are you sure you want to delete this table? ALL DATA WILL BE LOST")
                .default(false)
                .interact()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

            if !confirmed {
                return Err(DynamodbError::UserCancelled);
            }
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting table..."));
        }

        deploy::execute_destroy_plan(dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
    } else {
        // Deploy flow
        let table_config = config::pieces_table_config().with_table_name(&cmd.table_name);

        let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_config);

        if !global.is_silent() {
            aprintln!("{}", p_c("Deploy Plan:"));
            for line in planning::format_deploy_plan(&plan) {
                if line.starts_with('+') {
                    aprintln!("  {}", p_g(&line));
                } else if line.starts_with('-') {
                    aprintln!("  {}", p_r(&line));
                } else if line.starts_with('~') {
                    aprintln!("  {}", p_y(&line));
                } else {
                    aprintln!("  {}", line);
                }
            }
            aprintln!();
        }

        match plan {
            planning::DeployPlan::NoChanges { .. } => {
                if !global.is_silent() {
                    aprintln!("{}", p_g("Infrastructure is up to date."));
                }
                return Ok(());
            }
            planning::DeployPlan::KeySchemaMismatch { .. } => {
                return deploy::execute_deploy_plan(dynamo_client, &plan).await;
            }
            planning::DeployPlan::CreateTable { .. } => {}
        }

        if !cmd.force {
            let confirmed = Confirm::new()
                .with_prompt("Apply these changes?")
                .default(true)
                .interact()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

            if !confirmed {
                return Err(DynamodbError::UserCancelled);
            }
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Applying changes..."));
        }

        deploy::execute_deploy_plan(dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure deployed successfully."));
        }
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let config = Config::from_env();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Artist:"), cmd.artist);
        aprintln!("{} {}", p_b("Piece count:"), cmd.count);
        aprintln!();
    }

    let store = dynamodb::connect(&config).await;

    // Verify table exists
    let table_state = client::get_table_state(store.client(), &cmd.table_name).await?;
    if table_state.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let pieces = generate_seed_pieces(&cmd.artist, cmd.first_year, cmd.count);

    if !global.is_silent() {
        aprintln!("{}", p_c("Pieces to create:"));
        for piece in pieces.iter().take(5) {
            aprintln!("  {}", seed::format_piece_line(piece));
        }
        if pieces.len() > 5 {
            aprintln!("  ... and {} more", pieces.len() - 5);
        }
        aprintln!();
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Insert {} pieces?", pieces.len()))
            .default(true)
            .interact()
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        if !confirmed {
            return Err(DynamodbError::UserCancelled);
        }
    }

    let repository = StorePieceRepository::new(store, &cmd.table_name);
    let report = seed::seed_pieces(&repository, &pieces, config.request_timeout()).await?;

    if !global.is_silent() {
        aprintln!(
            "{} {} pieces inserted, {} already present.",
            p_g("Success:"),
            report.inserted,
            report.skipped
        );
    }

    Ok(())
}
