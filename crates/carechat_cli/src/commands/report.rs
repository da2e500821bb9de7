//! Report command - Save a session report to disk.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use carechat_report::ReportFormat;

use super::{require_session, Context};

#[derive(Args)]
pub struct ReportArgs {
    /// Session to report on
    #[arg(short, long)]
    session: String,

    /// Output format: html, pdf (print-ready HTML) or json
    #[arg(short, long, default_value = "html")]
    format: ReportFormat,

    /// Directory to write into (overrides the configured output_dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Run only these sections, in this order
    #[arg(long, value_delimiter = ',')]
    sections: Vec<String>,
}

pub async fn execute(args: ReportArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.load_config()?;
    if let Some(dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }
    if !args.sections.is_empty() {
        config = config.with_sections(args.sections);
    }
    config.validate()?;

    let session = require_session(ctx, &args.session)?;
    info!("Generating {} report for session {}", args.format, args.session);

    let generator = ctx.generator(config);
    let path = generator
        .save_report(&session, args.format)
        .await
        .with_context(|| format!("Failed to save report for session {}", args.session))?;

    println!("{}", path.display());
    Ok(())
}
