//! Word co-occurrence over the patient's messages.

use async_trait::async_trait;
use carechat_analysis::{Analyzer, CooccurrenceAnalysis, CooccurrenceAnalyzer};
use carechat_session::{MessageRole, SessionHandle};
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::config::CooccurrenceConfig;
use crate::error::ReportResult;
use crate::section::{SectionKind, SectionRecord};

/// Data of the `cooccurrence` section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CooccurrenceData {
    pub message_count: usize,
    #[serde(flatten)]
    pub analysis: CooccurrenceAnalysis,
}

pub struct CooccurrenceComponent {
    analyzer: CooccurrenceAnalyzer,
}

impl CooccurrenceComponent {
    pub fn new(config: &CooccurrenceConfig) -> Self {
        Self {
            analyzer: CooccurrenceAnalyzer::new(config.min_count, config.top_n),
        }
    }
}

impl Default for CooccurrenceComponent {
    fn default() -> Self {
        Self::new(&CooccurrenceConfig::default())
    }
}

#[async_trait]
impl Component for CooccurrenceComponent {
    fn kind(&self) -> SectionKind {
        SectionKind::Cooccurrence
    }

    fn description(&self) -> &str {
        "Words that appear together in the patient's sentences"
    }

    async fn generate(&self, session: &SessionHandle) -> ReportResult<SectionRecord> {
        let texts: Vec<String> = session
            .messages()?
            .into_iter()
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.content)
            .collect();

        let data = CooccurrenceData {
            message_count: texts.len(),
            analysis: self.analyzer.analyze(&texts.join("\n")),
        };
        SectionRecord::complete(self.kind(), self.title(), &data)
    }
}
