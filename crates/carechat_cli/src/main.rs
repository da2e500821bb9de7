//! CareChat CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Session not found or unreadable
//! - 4: Report could not be written

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use carechat_report::ReportError;
use carechat_session::SessionError;
use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const SESSION_ERROR: u8 = 3;
    pub const WRITE_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "carechat=debug"
    } else if cli.quiet {
        "carechat=warn"
    } else {
        "carechat=info"
    };

    // Logs go to stderr so exported documents can be piped from stdout
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive(level.parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let ctx = cli.context();
    let result = match cli.command {
        Commands::Report(args) => commands::report::execute(args, &ctx).await,
        Commands::Export(args) => commands::export::execute(args, &ctx).await,
        Commands::Sessions(args) => commands::sessions::execute(args, &ctx).await,
        Commands::Analyze(args) => commands::analyze::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(report) = cause.downcast_ref::<ReportError>() {
            match report {
                ReportError::Write { .. } => return ExitCodes::WRITE_ERROR,
                ReportError::Session(_) => return ExitCodes::SESSION_ERROR,
                ReportError::Config(_) => return ExitCodes::INVALID_ARGS,
                _ => {}
            }
        }
        if cause.downcast_ref::<SessionError>().is_some() {
            return ExitCodes::SESSION_ERROR;
        }
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("argument") || msg.contains("option") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
