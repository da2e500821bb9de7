//! Lexicon-based sentiment scoring.
//!
//! Each known word carries a polarity in `[-1, 1]` and a subjectivity in
//! `[0, 1]`. A text scores the mean over the words it matched, after
//! applying negation and intensity modifiers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::text::tokenize;

/// Polarity above this is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below this is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Negation flips and dampens the polarity of a following word.
const NEGATION_FACTOR: f64 = -0.5;
/// How many tokens back a negator still applies.
const NEGATION_WINDOW: usize = 3;

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Map a polarity to a label using the fixed cut points.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            Self::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sentiment of one piece of text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// In `[-1.0, 1.0]`
    pub polarity: f64,
    /// In `[0.0, 1.0]`
    pub subjectivity: f64,
    pub label: SentimentLabel,
}

impl SentimentScore {
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            label: SentimentLabel::Neutral,
        }
    }

    fn new(polarity: f64, subjectivity: f64) -> Self {
        let polarity = polarity.clamp(-1.0, 1.0);
        Self {
            polarity,
            subjectivity: subjectivity.clamp(0.0, 1.0),
            label: SentimentLabel::from_polarity(polarity),
        }
    }
}

impl Default for SentimentScore {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, Copy)]
struct Polarity {
    polarity: f64,
    subjectivity: f64,
}

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("loving", 0.6, 0.6),
    ("lovely", 0.5, 0.75),
    ("like", 0.2, 0.3),
    ("thank", 0.4, 0.4),
    ("thanks", 0.2, 0.2),
    ("thankful", 0.5, 0.6),
    ("grateful", 0.6, 0.7),
    ("appreciate", 0.5, 0.5),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("better", 0.5, 0.5),
    ("best", 1.0, 0.3),
    ("wonderful", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("awesome", 1.0, 1.0),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("joy", 0.8, 0.6),
    ("excited", 0.4, 0.75),
    ("hopeful", 0.5, 0.6),
    ("hope", 0.3, 0.4),
    ("calm", 0.3, 0.75),
    ("relaxed", 0.4, 0.6),
    ("relieved", 0.5, 0.6),
    ("proud", 0.8, 1.0),
    ("helpful", 0.5, 0.5),
    ("useful", 0.3, 0.0),
    ("improving", 0.4, 0.4),
    ("improved", 0.4, 0.4),
    ("progress", 0.3, 0.3),
    ("confident", 0.5, 0.7),
    ("comfortable", 0.4, 0.6),
    ("fine", 0.4, 0.5),
    ("okay", 0.5, 0.5),
    ("ok", 0.5, 0.5),
    ("well", 0.2, 0.3),
    ("positive", 0.2, 0.5),
    ("safe", 0.5, 0.5),
    ("supported", 0.4, 0.5),
    ("energetic", 0.5, 0.6),
    ("peaceful", 0.5, 0.7),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("fun", 0.3, 0.2),
    ("beautiful", 0.85, 1.0),
    ("perfect", 1.0, 1.0),
    ("easy", 0.43, 0.83),
    ("strong", 0.43, 0.73),
    // negative
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("depressed", -0.6, 0.8),
    ("hopeless", -0.8, 0.8),
    ("lonely", -0.5, 0.8),
    ("angry", -0.5, 1.0),
    ("upset", -0.6, 0.8),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.9),
    ("frustrated", -0.7, 0.7),
    ("frustrating", -0.6, 0.7),
    ("annoyed", -0.4, 0.6),
    ("worried", -0.4, 0.7),
    ("worry", -0.3, 0.6),
    ("anxious", -0.4, 0.8),
    ("anxiety", -0.4, 0.6),
    ("afraid", -0.6, 0.9),
    ("scared", -0.5, 0.8),
    ("stressed", -0.5, 0.7),
    ("stress", -0.3, 0.5),
    ("overwhelmed", -0.5, 0.8),
    ("exhausted", -0.5, 0.7),
    ("tired", -0.4, 0.7),
    ("pain", -0.5, 0.5),
    ("painful", -0.7, 0.9),
    ("hurt", -0.5, 0.6),
    ("hurts", -0.5, 0.6),
    ("sick", -0.71, 0.86),
    ("failing", -0.4, 0.4),
    ("failed", -0.5, 0.3),
    ("fail", -0.5, 0.3),
    ("failure", -0.6, 0.5),
    ("wrong", -0.5, 0.9),
    ("difficult", -0.5, 1.0),
    ("hard", -0.29, 0.54),
    ("problem", -0.2, 0.2),
    ("struggle", -0.4, 0.5),
    ("struggling", -0.5, 0.6),
    ("crying", -0.4, 0.6),
    ("guilty", -0.5, 0.7),
    ("ashamed", -0.6, 0.8),
    ("confused", -0.4, 0.7),
    ("miserable", -1.0, 1.0),
    ("useless", -0.5, 0.2),
    ("worthless", -0.8, 0.8),
    ("negative", -0.3, 0.4),
    ("poor", -0.4, 0.6),
    ("never", -0.1, 0.3),
];

/// Words that scale the next word: (word, multiplier)
const MODIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.3),
    ("totally", 1.3),
    ("absolutely", 1.4),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("bit", 0.7),
    ("little", 0.7),
    ("kinda", 0.7),
];

const NEGATORS: &[&str] = &["not", "no", "never", "nor", "hardly", "without", "barely"];

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

/// Scores text against a fixed polarity lexicon
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, Polarity>,
    modifiers: HashMap<&'static str, f64>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        let lexicon = LEXICON
            .iter()
            .map(|&(word, polarity, subjectivity)| {
                (
                    word,
                    Polarity {
                        polarity,
                        subjectivity,
                    },
                )
            })
            .collect();
        Self {
            lexicon,
            modifiers: MODIFIERS.iter().copied().collect(),
        }
    }

    /// Score a text. Text with no lexicon words is neutral.
    pub fn score(&self, text: &str) -> SentimentScore {
        let tokens = tokenize(text);
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut matched = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(entry) = self.lexicon.get(token.as_str()) else {
                continue;
            };

            let mut polarity = entry.polarity;
            let mut subjectivity = entry.subjectivity;

            if let Some(multiplier) = i
                .checked_sub(1)
                .and_then(|p| self.modifiers.get(tokens[p].as_str()))
            {
                polarity *= multiplier;
                subjectivity *= multiplier;
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i].iter().any(|t| is_negator(t)) {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
            matched += 1;
        }

        if matched == 0 {
            return SentimentScore::neutral();
        }

        let n = matched as f64;
        SentimentScore::new(polarity_sum / n, subjectivity_sum / n)
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for SentimentAnalyzer {
    type Output = SentimentScore;

    fn name(&self) -> &'static str {
        "sentiment"
    }

    fn analyze(&self, text: &str) -> SentimentScore {
        self.score(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_message() {
        let score = SentimentAnalyzer::new().score("I love this, thank you!");
        assert!((score.polarity - 0.45).abs() < 1e-9);
        assert_eq!(score.label, SentimentLabel::Positive);
        assert!(score.subjectivity > 0.0);
    }

    #[test]
    fn test_negative_message() {
        let score = SentimentAnalyzer::new().score("Why does this keep failing?");
        assert!(score.polarity < 0.0);
        assert_ne!(score.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let analyzer = SentimentAnalyzer::new();
        let plain = analyzer.score("I feel good");
        let negated = analyzer.score("I don't feel good");
        assert!(plain.polarity > 0.0);
        assert!(negated.polarity < 0.0);
    }

    #[test]
    fn test_intensifier_scales() {
        let analyzer = SentimentAnalyzer::new();
        let plain = analyzer.score("sad");
        let strong = analyzer.score("very sad");
        assert!(strong.polarity < plain.polarity);
    }

    #[test]
    fn test_non_linguistic_input_is_neutral() {
        let analyzer = SentimentAnalyzer::new();
        for text in ["", "?!...", "🙂", "   "] {
            assert_eq!(analyzer.score(text), SentimentScore::neutral());
        }
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SentimentLabel::from_polarity(0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(0.11), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(-0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.11), SentimentLabel::Negative);
    }
}
