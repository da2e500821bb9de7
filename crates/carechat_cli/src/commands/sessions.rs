//! Sessions command - List stored sessions.

use anyhow::Result;
use clap::Args;

use super::Context;

#[derive(Args)]
pub struct SessionsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: SessionsArgs, ctx: &Context) -> Result<()> {
    let sessions = ctx.store().list_sessions()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No sessions in {}", ctx.workspace.display());
        return Ok(());
    }

    println!("{:<38} {:<17} {:>8}  TITLE", "ID", "CREATED", "MESSAGES");
    for session in &sessions {
        println!(
            "{:<38} {:<17} {:>8}  {}",
            session.id,
            session.created_at.format("%Y-%m-%d %H:%M"),
            session.message_count,
            session.title
        );
    }

    Ok(())
}
