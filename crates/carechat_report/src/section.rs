//! Section identifiers and the records components produce.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ReportError, ReportResult};

/// Identifies a report section.
///
/// Built-in sections have their own variant; anything else registered by
/// an embedding application is `Custom` and renders through the generic
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKind {
    AiSummary,
    SavedMessages,
    DescriptiveStats,
    NlpAnalysis,
    Cooccurrence,
    Custom(String),
}

impl SectionKind {
    /// Built-in sections in their default report order.
    pub const BUILT_IN: [SectionKind; 5] = [
        SectionKind::AiSummary,
        SectionKind::SavedMessages,
        SectionKind::DescriptiveStats,
        SectionKind::NlpAnalysis,
        SectionKind::Cooccurrence,
    ];

    pub fn from_id(id: &str) -> Self {
        match id {
            "ai_summary" => Self::AiSummary,
            "saved_messages" => Self::SavedMessages,
            "descriptive_stats" => Self::DescriptiveStats,
            "nlp_analysis" => Self::NlpAnalysis,
            "cooccurrence" => Self::Cooccurrence,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::AiSummary => "ai_summary",
            Self::SavedMessages => "saved_messages",
            Self::DescriptiveStats => "descriptive_stats",
            Self::NlpAnalysis => "nlp_analysis",
            Self::Cooccurrence => "cooccurrence",
            Self::Custom(id) => id,
        }
    }

    /// Default display title
    pub fn default_title(&self) -> &str {
        match self {
            Self::AiSummary => "AI Summary",
            Self::SavedMessages => "Saved Messages",
            Self::DescriptiveStats => "Conversation Statistics",
            Self::NlpAnalysis => "Language Analysis",
            Self::Cooccurrence => "Word Co-occurrence",
            Self::Custom(id) => id,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<String> for SectionKind {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl From<&str> for SectionKind {
    fn from(id: &str) -> Self {
        Self::from_id(id)
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a section carries its full content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SectionStatus {
    Complete,
    Degraded { reason: String },
}

impl SectionStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Complete => None,
            Self::Degraded { reason } => Some(reason),
        }
    }
}

/// Section-specific fields, interpreted only by the matching renderer.
pub type SectionData = Map<String, Value>;

/// The output of one component.
///
/// A record is self-contained: rendering it never needs another section's
/// data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub section_id: SectionKind,
    pub title: String,
    pub data: SectionData,
    pub status: SectionStatus,
}

impl SectionRecord {
    /// A complete record from any serializable data struct.
    pub fn complete<T: Serialize>(
        section_id: SectionKind,
        title: impl Into<String>,
        data: &T,
    ) -> ReportResult<Self> {
        Ok(Self {
            data: to_section_data(&section_id, data)?,
            section_id,
            title: title.into(),
            status: SectionStatus::Complete,
        })
    }

    /// A record that carries partial data and says why.
    pub fn degraded<T: Serialize>(
        section_id: SectionKind,
        title: impl Into<String>,
        reason: impl Into<String>,
        data: &T,
    ) -> ReportResult<Self> {
        Ok(Self {
            data: to_section_data(&section_id, data)?,
            section_id,
            title: title.into(),
            status: SectionStatus::Degraded {
                reason: reason.into(),
            },
        })
    }

    /// Placeholder for a component that failed outright.
    pub fn failed(section_id: SectionKind, title: impl Into<String>, error: &ReportError) -> Self {
        let message = error.to_string();
        let mut data = SectionData::new();
        data.insert("error".to_string(), Value::String(message.clone()));
        Self {
            section_id,
            title: title.into(),
            data,
            status: SectionStatus::Degraded { reason: message },
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status.is_degraded()
    }

    /// Read the data back into its typed form.
    pub fn data_as<T: DeserializeOwned>(&self) -> ReportResult<T> {
        serde_json::from_value(Value::Object(self.data.clone())).map_err(|e| {
            ReportError::Render(format!("{} data has an unexpected shape: {}", self.section_id, e))
        })
    }
}

fn to_section_data<T: Serialize>(section_id: &SectionKind, data: &T) -> ReportResult<SectionData> {
    match serde_json::to_value(data)? {
        Value::Object(map) => Ok(map),
        other => Err(ReportError::component_data(
            section_id.as_str(),
            format!("section data must be a mapping, got {}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counts {
        total: usize,
    }

    #[test]
    fn test_kind_round_trip_through_ids() {
        for kind in SectionKind::BUILT_IN {
            assert_eq!(SectionKind::from_id(kind.as_str()), kind);
        }
        assert_eq!(
            SectionKind::from_id("care_plan"),
            SectionKind::Custom("care_plan".to_string())
        );
        assert_eq!(
            serde_json::to_value(SectionKind::NlpAnalysis).unwrap(),
            json!("nlp_analysis")
        );
    }

    #[test]
    fn test_typed_data() {
        let record =
            SectionRecord::complete(SectionKind::DescriptiveStats, "Stats", &Counts { total: 3 })
                .unwrap();
        assert_eq!(record.data["total"], json!(3));
        assert_eq!(record.data_as::<Counts>().unwrap(), Counts { total: 3 });
        assert!(!record.is_degraded());
    }

    #[test]
    fn test_non_mapping_data_rejected() {
        let result = SectionRecord::complete(SectionKind::AiSummary, "AI", &vec![1, 2]);
        assert!(matches!(result, Err(ReportError::ComponentData { .. })));
    }

    #[test]
    fn test_failed_placeholder() {
        let record = SectionRecord::failed(
            SectionKind::NlpAnalysis,
            "Language Analysis",
            &ReportError::Timeout("nlp".into()),
        );
        assert!(record.is_degraded());
        assert_eq!(record.data["error"], json!("Timed out: nlp"));
        assert_eq!(record.status.reason(), Some("Timed out: nlp"));
    }
}
