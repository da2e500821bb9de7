//! Sentiment, voice and keyword analysis across the session.
//!
//! Analyzers run per message; this component aggregates the per-message
//! results into session-level figures.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use carechat_analysis::{
    Analyzer, KeywordAnalyzer, KeywordLexicon, SentimentAnalyzer, SentimentLabel, VoiceAnalyzer,
};
use carechat_session::{Message, MessageRole, SessionHandle};
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::config::NlpConfig;
use crate::error::ReportResult;
use crate::section::{SectionKind, SectionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl LabelCounts {
    fn add(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Percentages of the total, all zero when empty
    pub fn percentages(&self) -> LabelShares {
        let total = self.total();
        if total == 0 {
            return LabelShares::default();
        }
        let pct = |n: usize| n as f64 * 100.0 / total as f64;
        LabelShares {
            positive: pct(self.positive),
            neutral: pct(self.neutral),
            negative: pct(self.negative),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelShares {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Active/passive figures over all analyzed sentences
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VoiceSummary {
    pub active_count: usize,
    pub passive_count: usize,
    pub excluded_count: usize,
    /// Fractions of classified sentences
    pub active_ratio: f64,
    pub passive_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSummary {
    pub keyword: String,
    pub category: String,
    pub occurrences: usize,
    /// Occurrences per analyzed token across the session
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEntry {
    pub message_id: String,
    pub text: String,
}

/// Per-message results, in message order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageInsight {
    pub message_id: String,
    pub polarity: f64,
    pub label: SentimentLabel,
    pub has_question: bool,
}

/// Data of the `nlp_analysis` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpAnalysisData {
    pub message_count: usize,
    pub average_sentiment: f64,
    pub average_subjectivity: f64,
    pub overall_label: SentimentLabel,
    pub sentiment_distribution: LabelCounts,
    pub sentiment_percentages: LabelShares,
    pub voice: VoiceSummary,
    /// Percentage of messages containing a question
    pub question_frequency: f64,
    pub questions: Vec<QuestionEntry>,
    pub top_keywords: Vec<KeywordSummary>,
    /// Occurrences per lexicon category, zero for categories never seen
    pub emotional_keywords: BTreeMap<String, usize>,
    pub messages: Vec<MessageInsight>,
}

struct KeywordTotal {
    occurrences: usize,
    /// Token offset across the session
    first_position: usize,
}

pub struct NlpAnalysisComponent {
    config: NlpConfig,
    sentiment: SentimentAnalyzer,
    voice: VoiceAnalyzer,
    keywords: KeywordAnalyzer,
}

impl NlpAnalysisComponent {
    pub fn new(config: NlpConfig) -> Self {
        let lexicon = config
            .extra_keywords
            .iter()
            .fold(KeywordLexicon::default(), |lexicon, (category, terms)| {
                lexicon.with_terms(category, terms)
            });

        Self {
            config,
            sentiment: SentimentAnalyzer::new(),
            voice: VoiceAnalyzer::new(),
            keywords: KeywordAnalyzer::with_lexicon(lexicon),
        }
    }

    fn include(&self, message: &Message) -> bool {
        match message.role {
            MessageRole::User => true,
            MessageRole::Assistant => self.config.include_assistant,
            MessageRole::System => false,
        }
    }

    /// Aggregate analyzer output over messages in chronological order.
    pub fn analyze(&self, messages: &[Message]) -> NlpAnalysisData {
        let analyzed: Vec<&Message> = messages.iter().filter(|m| self.include(m)).collect();

        let mut distribution = LabelCounts::default();
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut voice = VoiceSummary::default();
        let mut questions = Vec::new();
        let mut insights = Vec::with_capacity(analyzed.len());
        // Keyed by (category, keyword): a term may sit in several categories
        let mut keyword_totals: HashMap<(String, String), KeywordTotal> = HashMap::new();
        let mut token_offset = 0usize;

        for message in &analyzed {
            let score = self.sentiment.analyze(&message.content);
            distribution.add(score.label);
            polarity_sum += score.polarity;
            subjectivity_sum += score.subjectivity;

            let sentences = self.voice.analyze(&message.content);
            voice.active_count += sentences.active_count;
            voice.passive_count += sentences.passive_count;
            voice.excluded_count += sentences.excluded_count;

            let keywords = self.keywords.analyze(&message.content);
            for found in &keywords.keywords {
                let total = keyword_totals
                    .entry((found.category.clone(), found.keyword.clone()))
                    .or_insert_with(|| KeywordTotal {
                        occurrences: 0,
                        first_position: token_offset + found.first_position,
                    });
                total.occurrences += found.occurrences;
            }
            token_offset += keywords.token_count;

            questions.extend(keywords.questions.iter().map(|text| QuestionEntry {
                message_id: message.id.clone(),
                text: text.clone(),
            }));

            insights.push(MessageInsight {
                message_id: message.id.clone(),
                polarity: score.polarity,
                label: score.label,
                has_question: keywords.has_question(),
            });
        }

        let classified = voice.active_count + voice.passive_count;
        if classified > 0 {
            voice.active_ratio = voice.active_count as f64 / classified as f64;
            voice.passive_ratio = voice.passive_count as f64 / classified as f64;
        }

        let mut emotional_keywords: BTreeMap<String, usize> = self
            .keywords
            .lexicon()
            .categories()
            .into_iter()
            .map(|c| (c.to_string(), 0))
            .collect();
        for ((category, _), total) in &keyword_totals {
            *emotional_keywords.entry(category.clone()).or_insert(0) += total.occurrences;
        }

        let mut ranked: Vec<((String, String), KeywordTotal)> = keyword_totals.into_iter().collect();
        ranked.sort_by(|(a_key, a), (b_key, b)| {
            b.occurrences
                .cmp(&a.occurrences)
                .then(a.first_position.cmp(&b.first_position))
                .then_with(|| a_key.cmp(b_key))
        });
        let top_keywords = ranked
            .into_iter()
            .take(self.config.top_keywords)
            .map(|((category, keyword), total)| KeywordSummary {
                keyword,
                category,
                occurrences: total.occurrences,
                relevance: total.occurrences as f64 / token_offset.max(1) as f64,
            })
            .collect();

        let count = analyzed.len();
        let (average_sentiment, average_subjectivity, question_frequency) = if count == 0 {
            (0.0, 0.0, 0.0)
        } else {
            let with_question = insights.iter().filter(|i| i.has_question).count();
            (
                polarity_sum / count as f64,
                subjectivity_sum / count as f64,
                with_question as f64 * 100.0 / count as f64,
            )
        };

        NlpAnalysisData {
            message_count: count,
            average_sentiment,
            average_subjectivity,
            overall_label: SentimentLabel::from_polarity(average_sentiment),
            sentiment_percentages: distribution.percentages(),
            sentiment_distribution: distribution,
            voice,
            question_frequency,
            questions,
            top_keywords,
            emotional_keywords,
            messages: insights,
        }
    }
}

impl Default for NlpAnalysisComponent {
    fn default() -> Self {
        Self::new(NlpConfig::default())
    }
}

#[async_trait]
impl Component for NlpAnalysisComponent {
    fn kind(&self) -> SectionKind {
        SectionKind::NlpAnalysis
    }

    fn description(&self) -> &str {
        "Sentiment, active/passive voice, keywords and questions"
    }

    async fn generate(&self, session: &SessionHandle) -> ReportResult<SectionRecord> {
        let messages = session.messages()?;
        SectionRecord::complete(self.kind(), self.title(), &self.analyze(&messages))
    }
}
