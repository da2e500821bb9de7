//! Built-in report components, one per section.

pub mod ai_summary;
pub mod cooccurrence;
pub mod descriptive_stats;
pub mod nlp_analysis;
pub mod saved_messages;

pub use ai_summary::{AiSummaryComponent, AiSummaryData};
pub use cooccurrence::{CooccurrenceComponent, CooccurrenceData};
pub use descriptive_stats::{DayCounts, DescriptiveStats, DescriptiveStatsComponent, ResponseTimeStats};
pub use nlp_analysis::{NlpAnalysisComponent, NlpAnalysisData};
pub use saved_messages::{SavedMessageEntry, SavedMessagesComponent, SavedMessagesData};
