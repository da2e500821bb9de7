//! The summarization collaborator contract.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::error::ReportResult;

/// Turns a prompt into a summary, usually by calling a language model.
///
/// Implementations may fail with [`ReportError::Collaborator`] or
/// [`ReportError::Timeout`]; the AI summary section degrades instead of
/// failing the report.
///
/// [`ReportError::Collaborator`]: crate::ReportError::Collaborator
/// [`ReportError::Timeout`]: crate::ReportError::Timeout
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Model name recorded in the summary section.
    fn model_name(&self) -> String;

    async fn summarize(&self, prompt: &str) -> ReportResult<String>;
}
