//! Export command - Print a report document to stdout.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use super::{require_session, Context};

#[derive(Args)]
pub struct ExportArgs {
    /// Session to export
    #[arg(short, long)]
    session: String,

    /// Print-ready document for PDF conversion
    #[arg(long, conflicts_with = "json")]
    pdf: bool,

    /// Report data as JSON instead of HTML
    #[arg(long)]
    json: bool,

    /// Embeddable fragment instead of a full HTML document
    #[arg(long, conflicts_with_all = ["pdf", "json"])]
    fragment: bool,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn execute(args: ExportArgs, ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let session = require_session(ctx, &args.session)?;
    let generator = ctx.generator(config);

    let document = if args.pdf {
        generator.export_pdf_ready(&session).await?
    } else if args.json {
        generator.export_json(&session).await?
    } else {
        generator.export_html(&session, !args.fragment).await?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", document),
    }

    Ok(())
}
