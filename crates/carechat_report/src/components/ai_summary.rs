//! AI-generated session summary.

use std::sync::Arc;

use async_trait::async_trait;
use carechat_session::{Message, SessionHandle};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::component::Component;
use crate::config::SummaryConfig;
use crate::error::{ReportError, ReportResult};
use crate::section::{SectionKind, SectionRecord};
use crate::summarizer::Summarizer;

pub const EMPTY_SESSION_SUMMARY: &str = "No messages to summarize.";

/// Data of the `ai_summary` section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AiSummaryData {
    pub summary: String,
    pub themes: Vec<String>,
    pub progress_notes: String,
    /// Model that produced the summary
    pub generated_with: Option<String>,
    /// False when no summary could be produced
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiSummaryData {
    fn unavailable(reason: &str) -> Self {
        Self {
            summary: "Summary unavailable.".to_string(),
            available: false,
            error: Some(reason.to_string()),
            ..Self::default()
        }
    }
}

/// Summarizes the session through a [`Summarizer`].
pub struct AiSummaryComponent {
    summarizer: Option<Arc<dyn Summarizer>>,
    config: SummaryConfig,
}

impl AiSummaryComponent {
    pub fn new(summarizer: Option<Arc<dyn Summarizer>>, config: SummaryConfig) -> Self {
        Self { summarizer, config }
    }

    fn unavailable(&self, reason: &str) -> ReportResult<SectionRecord> {
        warn!("AI summary unavailable: {}", reason);
        SectionRecord::degraded(
            self.kind(),
            self.title(),
            reason,
            &AiSummaryData::unavailable(reason),
        )
    }
}

/// Transcript of the most recent `max_messages` messages.
pub fn build_transcript(messages: &[Message], max_messages: usize) -> String {
    let start = messages.len().saturating_sub(max_messages);
    let mut lines = Vec::new();
    let mut conversation: Option<&str> = None;

    for message in &messages[start..] {
        let current = message.conversation_id.as_deref();
        if let Some(id) = current.filter(|_| current != conversation) {
            lines.push(format!("--- Conversation {} ---", id));
        }
        conversation = current;

        lines.push(format!(
            "[{}] {}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            message.role.display_name(),
            message.content
        ));
    }

    lines.join("\n")
}

pub fn build_prompt(transcript: &str) -> String {
    format!(
        "Please analyze this chat session from a therapy/support window and provide:\n\
         1. A comprehensive summary (2-3 paragraphs)\n\
         2. Key themes identified (list up to 5)\n\
         3. Brief progress notes suitable for clinical documentation\n\
         \n\
         Conversation:\n\
         {}\n\
         \n\
         Format your response as:\n\
         SUMMARY:\n\
         [Your summary here]\n\
         \n\
         THEMES:\n\
         - Theme 1\n\
         - Theme 2\n\
         \n\
         PROGRESS NOTES:\n\
         [Your clinical notes here]\n",
        transcript
    )
}

#[derive(Clone, Copy, PartialEq)]
enum Block {
    Summary,
    Themes,
    Progress,
}

/// Parse a SUMMARY / THEMES / PROGRESS NOTES response.
///
/// Text before the first marker is ignored. A response without any marker
/// becomes the summary as a whole.
pub fn parse_response(response: &str, model: &str) -> AiSummaryData {
    let mut summary = Vec::new();
    let mut themes = Vec::new();
    let mut progress = Vec::new();
    let mut block = None;

    for line in response.lines() {
        let trimmed = line.trim();
        let upper = trimmed.to_uppercase();
        if upper.starts_with("SUMMARY:") {
            block = Some(Block::Summary);
            push_inline(&mut summary, trimmed, "SUMMARY:");
        } else if upper.starts_with("THEMES:") {
            block = Some(Block::Themes);
        } else if upper.starts_with("PROGRESS NOTES:") {
            block = Some(Block::Progress);
            push_inline(&mut progress, trimmed, "PROGRESS NOTES:");
        } else if trimmed.is_empty() {
            continue;
        } else {
            match block {
                Some(Block::Summary) => summary.push(trimmed.to_string()),
                Some(Block::Themes) => {
                    if let Some(theme) = trimmed
                        .strip_prefix('-')
                        .or_else(|| trimmed.strip_prefix('*'))
                        .or_else(|| trimmed.strip_prefix('•'))
                    {
                        let theme = theme.trim();
                        if !theme.is_empty() {
                            themes.push(theme.to_string());
                        }
                    }
                }
                Some(Block::Progress) => progress.push(trimmed.to_string()),
                None => {}
            }
        }
    }

    let mut summary = summary.join(" ");
    if block.is_none() {
        summary = response.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    AiSummaryData {
        summary,
        themes,
        progress_notes: progress.join(" "),
        generated_with: Some(model.to_string()),
        available: true,
        error: None,
    }
}

fn push_inline(block: &mut Vec<String>, line: &str, marker: &str) {
    let rest = line.get(marker.len()..).unwrap_or_default().trim();
    if !rest.is_empty() {
        block.push(rest.to_string());
    }
}

#[async_trait]
impl Component for AiSummaryComponent {
    fn kind(&self) -> SectionKind {
        SectionKind::AiSummary
    }

    fn description(&self) -> &str {
        "Model-written summary, key themes and progress notes"
    }

    async fn generate(&self, session: &SessionHandle) -> ReportResult<SectionRecord> {
        let messages = session.messages()?;

        if messages.is_empty() {
            return SectionRecord::complete(
                self.kind(),
                self.title(),
                &AiSummaryData {
                    summary: EMPTY_SESSION_SUMMARY.to_string(),
                    available: true,
                    ..AiSummaryData::default()
                },
            );
        }

        if !self.config.enabled {
            return self.unavailable("AI summaries are disabled");
        }
        let Some(summarizer) = &self.summarizer else {
            return self.unavailable("No summarization model configured");
        };

        let prompt = build_prompt(&build_transcript(&messages, self.config.max_messages));
        debug!(
            "Requesting summary of {} messages from {}",
            messages.len().min(self.config.max_messages),
            summarizer.model_name()
        );

        let timeout = self.config.timeout();
        let result = match tokio::time::timeout(timeout, summarizer.summarize(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ReportError::Timeout(format!(
                "summarization did not finish within {}s",
                timeout.as_secs()
            ))),
        };

        match result {
            Ok(response) => SectionRecord::complete(
                self.kind(),
                self.title(),
                &parse_response(&response, &summarizer.model_name()),
            ),
            Err(e) => self.unavailable(&e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::MockSummarizer;
    use carechat_session::{ChatSession, MemorySessionStore, SessionMetadata};
    use chrono::{TimeZone, Utc};

    fn handle(messages: Vec<Message>) -> SessionHandle {
        let session = messages.into_iter().fold(
            ChatSession::new(SessionMetadata::new("t").with_id("s1")),
            ChatSession::with_message,
        );
        SessionHandle::new("s1", Arc::new(MemorySessionStore::new().with_session(session)))
    }

    const RESPONSE: &str = "SUMMARY:\nThe patient reports better sleep.\nMood is stable.\n\n\
THEMES:\n- Sleep\n* Work stress\nnot a theme\n\nPROGRESS NOTES: Continue journaling.\n";

    #[test]
    fn test_parse_response() {
        let data = parse_response(RESPONSE, "test-model");
        assert_eq!(data.summary, "The patient reports better sleep. Mood is stable.");
        assert_eq!(data.themes, vec!["Sleep", "Work stress"]);
        assert_eq!(data.progress_notes, "Continue journaling.");
        assert_eq!(data.generated_with.as_deref(), Some("test-model"));
        assert!(data.available);
    }

    #[test]
    fn test_parse_unstructured_response() {
        let data = parse_response("Just a plain\nsummary.", "m");
        assert_eq!(data.summary, "Just a plain summary.");
        assert!(data.themes.is_empty());
    }

    #[test]
    fn test_transcript_window() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let messages = vec![
            Message::user("old").at(t),
            Message::user("I slept well").at(t).in_conversation("c1"),
            Message::assistant("Great").at(t).in_conversation("c1"),
        ];
        let transcript = build_transcript(&messages, 2);
        assert!(!transcript.contains("old"));
        assert_eq!(
            transcript,
            "--- Conversation c1 ---\n[2024-03-01 09:30] User: I slept well\n[2024-03-01 09:30] Assistant: Great"
        );
    }

    #[tokio::test]
    async fn test_summary_from_model() {
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .withf(|prompt| prompt.contains("User: I slept better"))
            .times(1)
            .returning(|_| Ok(RESPONSE.to_string()));
        summarizer
            .expect_model_name()
            .returning(|| "mock-model".to_string());

        let component =
            AiSummaryComponent::new(Some(Arc::new(summarizer)), SummaryConfig::default());
        let record = component
            .generate(&handle(vec![Message::user("I slept better")]))
            .await
            .unwrap();

        assert!(!record.is_degraded());
        let data: AiSummaryData = record.data_as().unwrap();
        assert_eq!(data.themes.len(), 2);
        assert_eq!(data.generated_with.as_deref(), Some("mock-model"));
    }

    #[tokio::test]
    async fn test_summarizer_failure_degrades() {
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_| Err(ReportError::Collaborator("provider down".into())));
        summarizer.expect_model_name().returning(|| "m".to_string());

        let component =
            AiSummaryComponent::new(Some(Arc::new(summarizer)), SummaryConfig::default());
        let record = component
            .generate(&handle(vec![Message::user("hello")]))
            .await
            .unwrap();

        assert!(record.is_degraded());
        let data: AiSummaryData = record.data_as().unwrap();
        assert!(!data.available);
        assert!(data.error.unwrap().contains("provider down"));
    }

    #[tokio::test]
    async fn test_empty_session_skips_model() {
        let mut summarizer = MockSummarizer::new();
        summarizer.expect_summarize().never();

        let component =
            AiSummaryComponent::new(Some(Arc::new(summarizer)), SummaryConfig::default());
        let record = component.generate(&handle(Vec::new())).await.unwrap();
        let data: AiSummaryData = record.data_as().unwrap();
        assert_eq!(data.summary, EMPTY_SESSION_SUMMARY);
    }

    #[tokio::test]
    async fn test_missing_summarizer() {
        let component = AiSummaryComponent::new(None, SummaryConfig::default());
        let record = component
            .generate(&handle(vec![Message::user("hello")]))
            .await
            .unwrap();
        assert!(record.is_degraded());
        assert_eq!(record.data["available"], serde_json::json!(false));
    }
}
