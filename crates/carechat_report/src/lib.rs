//! # carechat_report
//!
//! Session report generation for CareChat.
//!
//! A report is a sequence of sections. Each section is produced by one
//! [`Component`] reading the session through a
//! [`SessionHandle`](carechat_session::SessionHandle), registered in a
//! [`ComponentRegistry`] whose order is the report order. The
//! [`ReportGenerator`] runs the components and hands the resulting
//! [`SectionRecord`]s to a renderer.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use carechat_report::{ReportConfig, ReportFormat, ReportGenerator};
//! use carechat_session::{FileSessionStore, SessionHandle};
//!
//! # async fn run() -> carechat_report::ReportResult<()> {
//! let store = Arc::new(FileSessionStore::new("."));
//! let session = SessionHandle::new("session-id", store);
//!
//! let generator = ReportGenerator::with_defaults(ReportConfig::default(), None);
//! let path = generator.save_report(&session, ReportFormat::Html).await?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod components;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod registry;
pub mod render;
pub mod section;
pub mod styles;
pub mod summarizer;

pub use component::Component;
pub use config::{CooccurrenceConfig, NlpConfig, ReportConfig, SummaryConfig};
pub use error::{ReportError, ReportResult};
pub use generator::{Report, ReportFormat, ReportGenerator};
pub use llm::{LlmProvider, LlmSummarizer};
pub use registry::ComponentRegistry;
pub use render::{html_escape, HtmlRenderer, PdfRenderer, Renderer, ReportHeader};
pub use section::{SectionData, SectionKind, SectionRecord, SectionStatus};
pub use summarizer::Summarizer;
