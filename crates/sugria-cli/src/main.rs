//! SUGRiA CLI
//!
//! Command-line front end for the SUGRiA portal: the join, program and
//! update forms, and the admin back-office.

mod args;
mod cli;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::{error, info};
use renderer::TerminalRenderer;
use sugria_core::{display::OperationStatus, models::FormKind, PortalBuilder, PortalError};
use Commands::*;

async fn run(args: Args) -> Result<()> {
    let Args {
        database_file,
        no_color,
        api_url,
        command,
    } = args;

    let portal = PortalBuilder::new()
        .with_database_path(database_file)
        .with_api_url(api_url)
        .build()
        .await
        .context("Failed to initialize portal")?;

    let cli = Cli::new(portal, TerminalRenderer::new(!no_color));

    info!("SUGRiA started");

    match command {
        Some(Join { command }) => cli.handle_form_command(FormKind::Join, command).await,
        Some(Apply { command }) => cli.handle_form_command(FormKind::Program, command).await,
        Some(Update { command }) => cli.handle_form_command(FormKind::Update, command).await,
        Some(Admin { command }) => cli.handle_admin_command(command).await,
        Some(Drafts) | None => cli.list_drafts().await,
    }
}

/// Exit status for a failed command: 1 when retrying with corrected input
/// can succeed, 2 when the setup itself is broken.
fn exit_code(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<PortalError>() {
        Some(e) if !e.is_recoverable() => {
            error!("Unrecoverable error: {e}");
            ExitCode::from(2)
        }
        _ => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", OperationStatus::failure(format!("{e:#}")));
            exit_code(&e)
        }
    }
}
