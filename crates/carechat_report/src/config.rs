//! Report configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Report generation settings, usually loaded from `carechat.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Sections to run, in order. `None` runs every registered section in
    /// registration order.
    pub sections: Option<Vec<String>>,
    /// Directory `save_report` writes into
    pub output_dir: PathBuf,
    pub summary: SummaryConfig,
    pub nlp: NlpConfig,
    pub cooccurrence: CooccurrenceConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sections: None,
            output_dir: PathBuf::from("reports"),
            summary: SummaryConfig::default(),
            nlp: NlpConfig::default(),
            cooccurrence: CooccurrenceConfig::default(),
        }
    }
}

/// AI summary settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Only the most recent messages go into the prompt
    pub max_messages: usize,
    pub timeout_secs: u64,
    pub enabled: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_messages: 50,
            timeout_secs: 60,
            enabled: true,
        }
    }
}

impl SummaryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Language analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NlpConfig {
    pub top_keywords: usize,
    /// Also analyze assistant messages
    pub include_assistant: bool,
    /// Additional lexicon terms by category
    pub extra_keywords: BTreeMap<String, Vec<String>>,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            top_keywords: 10,
            include_assistant: false,
            extra_keywords: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooccurrenceConfig {
    pub min_count: usize,
    pub top_n: usize,
}

impl Default for CooccurrenceConfig {
    fn default() -> Self {
        Self {
            min_count: 2,
            top_n: 20,
        }
    }
}

impl ReportConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> ReportResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ReportResult<String> {
        serde_yaml::to_string(self).map_err(ReportError::from)
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.summary.max_messages == 0 {
            return Err(ReportError::Config(
                "summary.max_messages must be at least 1".to_string(),
            ));
        }
        if self.summary.timeout_secs == 0 {
            return Err(ReportError::Config(
                "summary.timeout_secs must be at least 1".to_string(),
            ));
        }
        if let Some(sections) = &self.sections {
            for (i, id) in sections.iter().enumerate() {
                if sections[..i].contains(id) {
                    return Err(ReportError::Config(format!(
                        "section '{}' is listed more than once",
                        id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = Some(sections.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = ReportConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.summary.timeout(), Duration::from_secs(60));
        assert_eq!(config.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_partial_yaml() {
        let config = ReportConfig::from_yaml_str(
            r#"
sections: [saved_messages, descriptive_stats]
summary:
  timeout_secs: 5
nlp:
  include_assistant: true
  extra_keywords:
    sleep: [insomnia, nightmare]
"#,
        )
        .unwrap();

        assert_eq!(
            config.sections.as_deref(),
            Some(&["saved_messages".to_string(), "descriptive_stats".to_string()][..])
        );
        assert_eq!(config.summary.timeout_secs, 5);
        assert_eq!(config.summary.max_messages, 50);
        assert!(config.nlp.include_assistant);
        assert_eq!(config.nlp.extra_keywords["sleep"].len(), 2);
        assert_eq!(config.cooccurrence.min_count, 2);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ReportConfig::from_yaml_str("summary:\n  max_messages: 0\n"),
            Err(ReportError::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_yaml_str("sections: [nlp_analysis, nlp_analysis]\n"),
            Err(ReportError::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_yaml_str("summary: [1, 2]"),
            Err(ReportError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carechat.yaml");
        let config = ReportConfig::default().with_output_dir("out");
        std::fs::write(&path, config.to_yaml().unwrap()).unwrap();

        assert_eq!(ReportConfig::load(&path).unwrap(), config);
    }
}
