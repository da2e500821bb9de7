//! # carechat_analysis
//!
//! Text analyzers used by CareChat reports.
//!
//! Every analyzer is a pure function of its input text: no I/O, no state
//! carried between calls. Empty or non-linguistic input (punctuation only,
//! a lone emoji) yields a neutral or empty result instead of an error.
//!
//! - [`SentimentAnalyzer`]: polarity in `[-1.0, 1.0]`, subjectivity, 3-way label
//! - [`VoiceAnalyzer`]: active/passive classification per sentence
//! - [`KeywordAnalyzer`]: emotionally salient terms and questions
//! - [`CooccurrenceAnalyzer`]: words that share sentences

pub mod analyzer;
pub mod cooccurrence;
pub mod keywords;
pub mod sentiment;
pub mod text;
pub mod voice;

pub use analyzer::Analyzer;
pub use cooccurrence::{CooccurrenceAnalysis, CooccurrenceAnalyzer, WordCount, WordPair};
pub use keywords::{KeywordAnalysis, KeywordAnalyzer, KeywordLexicon, KeywordMatch};
pub use sentiment::{SentimentAnalyzer, SentimentLabel, SentimentScore};
pub use voice::{SentenceVoice, Voice, VoiceAnalysis, VoiceAnalyzer};
