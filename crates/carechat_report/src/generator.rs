//! Report generation: runs components and hands their records to a renderer.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use carechat_session::SessionHandle;
use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::registry::ComponentRegistry;
use crate::render::{safe_id, HtmlRenderer, PdfRenderer, ReportHeader, Renderer};
use crate::section::SectionRecord;
use crate::summarizer::Summarizer;

/// Output format for saved reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Html,
    PdfReady,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::PdfReady => "print.html",
            Self::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "pdf" | "pdf_ready" | "print" => Ok(Self::PdfReady),
            "json" => Ok(Self::Json),
            other => Err(ReportError::Config(format!(
                "Unknown report format: {} (expected html, pdf or json)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Html => "html",
            Self::PdfReady => "pdf",
            Self::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// A generated report: header plus ordered section records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub header: ReportHeader,
    pub sections: Vec<SectionRecord>,
}

/// Runs the registered components for a session and renders the result.
pub struct ReportGenerator {
    registry: Arc<ComponentRegistry>,
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(registry: Arc<ComponentRegistry>, config: ReportConfig) -> Self {
        Self { registry, config }
    }

    /// Generator over the built-in sections.
    pub fn with_defaults(config: ReportConfig, summarizer: Option<Arc<dyn Summarizer>>) -> Self {
        let registry = ComponentRegistry::with_defaults(&config, summarizer);
        Self::new(Arc::new(registry), config)
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run every selected component and collect their records in order.
    ///
    /// Fails when the session itself cannot be read or the configured
    /// section list is invalid. A failing component is replaced by a
    /// degraded placeholder, except when a critical component cannot reach
    /// its collaborator: that aborts the whole run.
    pub async fn generate_report(&self, session: &SessionHandle) -> ReportResult<Vec<SectionRecord>> {
        // A session that cannot be read at all produces no report
        if let Err(e) = session.metadata() {
            error!("Cannot read session {}: {}", session.id(), e);
            return Err(e.into());
        }
        self.config.validate()?;

        let components = self.registry.resolve(self.config.sections.as_deref())?;
        info!(
            "Generating report for session {} ({} sections)",
            session.id(),
            components.len()
        );

        let outcomes = join_all(components.iter().map(|(id, component)| async move {
            debug!("Running section: {}", id);
            (id, component, component.generate(session).await)
        }))
        .await;

        let mut records = Vec::with_capacity(outcomes.len());
        for (id, component, outcome) in outcomes {
            match outcome {
                Ok(mut record) => {
                    record.section_id = id.clone();
                    if let Some(reason) = record.status.reason() {
                        warn!("Section {} is degraded: {}", id, reason);
                    }
                    records.push(record);
                }
                Err(e) if component.is_critical() && e.is_collaborator_failure() => {
                    error!("Critical section {} failed: {}", id, e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("Section {} failed, using placeholder: {}", id, e);
                    records.push(SectionRecord::failed(id.clone(), component.title(), &e));
                }
            }
        }

        let degraded = records.iter().filter(|r| r.is_degraded()).count();
        info!(
            "Report for session {} generated: {} sections, {} degraded",
            session.id(),
            records.len(),
            degraded
        );
        Ok(records)
    }

    /// Header and sections for a session.
    pub async fn build_report(&self, session: &SessionHandle) -> ReportResult<Report> {
        let metadata = session.metadata()?;
        let sections = self.generate_report(session).await?;
        Ok(Report {
            header: ReportHeader::from_metadata(&metadata, Utc::now()),
            sections,
        })
    }

    /// Render the report as HTML, either a full document or a fragment.
    pub async fn export_html(&self, session: &SessionHandle, standalone: bool) -> ReportResult<String> {
        let report = self.build_report(session).await?;
        Ok(render_with(&HtmlRenderer, &report, standalone))
    }

    /// Render a standalone document with print styles and page breaks.
    pub async fn export_pdf_ready(&self, session: &SessionHandle) -> ReportResult<String> {
        let report = self.build_report(session).await?;
        Ok(render_with(&PdfRenderer, &report, true))
    }

    /// Report data as pretty-printed JSON.
    pub async fn export_json(&self, session: &SessionHandle) -> ReportResult<String> {
        let report = self.build_report(session).await?;
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Write the report to `<output_dir>/<session>-report.<ext>` and return
    /// the path.
    pub async fn save_report(&self, session: &SessionHandle, format: ReportFormat) -> ReportResult<PathBuf> {
        let content = match format {
            ReportFormat::Html => self.export_html(session, true).await?,
            ReportFormat::PdfReady => self.export_pdf_ready(session).await?,
            ReportFormat::Json => self.export_json(session).await?,
        };

        let dir = &self.config.output_dir;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| write_error(dir, source))?;

        let path = dir.join(report_file_name(session.id(), format));
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| write_error(&path, source))?;

        info!("Saved {} report to {}", format, path.display());
        Ok(path)
    }
}

impl std::fmt::Debug for ReportGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportGenerator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

fn render_with(renderer: &dyn Renderer, report: &Report, standalone: bool) -> String {
    renderer.render(&report.header, &report.sections, &renderer.styles(), standalone)
}

fn write_error(path: &Path, source: std::io::Error) -> ReportError {
    error!("Cannot write report to {}: {}", path.display(), source);
    ReportError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// File name for a session's report; characters outside `[A-Za-z0-9_-]`
/// in the session id become `_`.
pub fn report_file_name(session_id: &str, format: ReportFormat) -> String {
    format!("{}-report.{}", safe_id(session_id), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::MockSummarizer;
    use carechat_session::{ChatSession, MemorySessionStore, Message, SessionMetadata};

    fn handle() -> SessionHandle {
        let session = ChatSession::new(SessionMetadata::new("Check-in").with_id("s1"))
            .with_message(Message::user("I feel much better this week").saved())
            .with_message(Message::assistant("That is great to hear"));
        SessionHandle::new("s1", Arc::new(MemorySessionStore::new().with_session(session)))
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("HTML".parse::<ReportFormat>().unwrap(), ReportFormat::Html);
        assert_eq!("pdf".parse::<ReportFormat>().unwrap(), ReportFormat::PdfReady);
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("docx".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("s1", ReportFormat::Html), "s1-report.html");
        assert_eq!(
            report_file_name("../etc/x", ReportFormat::PdfReady),
            "___etc_x-report.print.html"
        );
    }

    #[tokio::test]
    async fn test_summarizer_receives_transcript() {
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .withf(|prompt| prompt.contains("User: I feel much better this week"))
            .times(1)
            .returning(|_| Ok("SUMMARY:\nSteady improvement.".to_string()));
        summarizer
            .expect_model_name()
            .returning(|| "mock-model".to_string());

        let generator =
            ReportGenerator::with_defaults(ReportConfig::default(), Some(Arc::new(summarizer)));
        let records = generator.generate_report(&handle()).await.unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].data["summary"], "Steady improvement.");
        assert!(records.iter().all(|r| !r.is_degraded()));
    }

    #[tokio::test]
    async fn test_section_override_order() {
        let config = ReportConfig::default()
            .with_sections(vec!["descriptive_stats".to_string(), "saved_messages".to_string()]);
        let generator = ReportGenerator::with_defaults(config, None);

        let records = generator.generate_report(&handle()).await.unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.section_id.as_str()).collect();
        assert_eq!(ids, vec!["descriptive_stats", "saved_messages"]);
    }
}
