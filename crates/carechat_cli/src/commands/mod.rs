//! CLI command definitions.
//!
//! Commands read sessions from a CareChat workspace and produce reports
//! from them. The workspace defaults to the current directory.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use carechat_report::{LlmSummarizer, ReportConfig, ReportGenerator, Summarizer};
use carechat_session::{FileSessionStore, SessionHandle};

pub mod analyze;
pub mod export;
pub mod report;
pub mod sessions;

/// Config file looked up in the workspace root when `--config` is absent
pub const CONFIG_FILE: &str = "carechat.yaml";

/// CareChat - session reports for clinician/patient conversations
#[derive(Parser)]
#[command(name = "carechat")]
#[command(version, about = "CareChat - session reports for clinician/patient conversations")]
#[command(long_about = r#"
Generate reports from stored CareChat sessions.

COMMANDS:
  report    → Save an HTML, print-ready or JSON report for a session
  export    → Print a report document to stdout
  sessions  → List stored sessions
  analyze   → Run the text analyzers on a piece of text

AI summaries use the first provider found in the environment:
OPENAI_API_KEY, ANTHROPIC_API_KEY or OLLAMA_HOST. CARECHAT_LLM_MODEL
overrides the model. Without one, the summary section is marked unavailable.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Session not found or unreadable
  4 - Report could not be written
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Workspace root holding `.carechat/sessions`
    #[arg(short, long, global = true, default_value = ".", env = "CARECHAT_WORKSPACE")]
    pub workspace: PathBuf,

    /// Report configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a report and save it to the output directory
    Report(report::ReportArgs),

    /// Print a report document to stdout
    Export(export::ExportArgs),

    /// List stored sessions
    Sessions(sessions::SessionsArgs),

    /// Analyze a piece of text and print the results as JSON
    Analyze(analyze::AnalyzeArgs),
}

impl Cli {
    pub fn context(&self) -> Context {
        Context {
            workspace: self.workspace.clone(),
            config_path: self.config.clone(),
        }
    }
}

/// Workspace settings shared by the session commands.
#[derive(Debug, Clone)]
pub struct Context {
    pub workspace: PathBuf,
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn store(&self) -> FileSessionStore {
        FileSessionStore::new(&self.workspace)
    }

    pub fn session(&self, id: &str) -> SessionHandle {
        SessionHandle::new(id, Arc::new(self.store()))
    }

    /// Explicit `--config`, else `carechat.yaml` in the workspace, else
    /// defaults. A relative output directory is taken from the workspace.
    pub fn load_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config_path {
            Some(path) => ReportConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => {
                let path = self.workspace.join(CONFIG_FILE);
                if path.exists() {
                    ReportConfig::load(&path)
                        .with_context(|| format!("Failed to load config {}", path.display()))?
                } else {
                    debug!("No {} in workspace, using defaults", CONFIG_FILE);
                    ReportConfig::default()
                }
            }
        };

        if config.output_dir.is_relative() {
            config.output_dir = self.workspace.join(&config.output_dir);
        }
        Ok(config)
    }

    pub fn generator(&self, config: ReportConfig) -> ReportGenerator {
        ReportGenerator::with_defaults(config, summarizer_from_env())
    }
}

fn summarizer_from_env() -> Option<Arc<dyn Summarizer>> {
    match LlmSummarizer::from_env() {
        Ok(summarizer) => {
            info!("Using summarization model {}", summarizer.model());
            Some(Arc::new(summarizer))
        }
        Err(e) => {
            debug!("AI summaries disabled: {}", e);
            None
        }
    }
}

/// Ensure a session exists before running a long generation.
pub fn require_session(ctx: &Context, id: &str) -> Result<SessionHandle> {
    let handle = ctx.session(id);
    handle
        .metadata()
        .with_context(|| format!("Session {} not found in {}", id, ctx.workspace.display()))?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn context(workspace: &Path, config: Option<PathBuf>) -> Context {
        Context {
            workspace: workspace.to_path_buf(),
            config_path: config,
        }
    }

    #[test]
    fn test_default_config_without_file() {
        let temp = TempDir::new().unwrap();
        let config = context(temp.path(), None).load_config().unwrap();
        assert_eq!(config.output_dir, temp.path().join("reports"));
        assert!(config.sections.is_none());
    }

    #[test]
    fn test_workspace_config_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "sections: [saved_messages]\noutput_dir: out\n",
        )
        .unwrap();

        let config = context(temp.path(), None).load_config().unwrap();
        assert_eq!(config.sections, Some(vec!["saved_messages".to_string()]));
        assert_eq!(config.output_dir, temp.path().join("out"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let temp = TempDir::new().unwrap();
        let ctx = context(temp.path(), Some(temp.path().join("missing.yaml")));
        assert!(ctx.load_config().is_err());
    }

    #[test]
    fn test_require_session() {
        let temp = TempDir::new().unwrap();
        let ctx = context(temp.path(), None);
        assert!(require_session(&ctx, "nope").is_err());
    }
}
