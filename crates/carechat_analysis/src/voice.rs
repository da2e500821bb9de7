//! Active/passive voice classification.
//!
//! A sentence is passive when a form of *be* or *get* is followed, possibly
//! after adverbs, by a past participle: "I was told", "it got cancelled".
//! Predicative adjectives that look like participles ("I am tired") are
//! not passive.

use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::text::{split_sentences, tokenize};

/// Sentences shorter than this cannot carry a subject and a verb.
const MIN_TOKENS: usize = 2;

/// How far past the auxiliary a participle may sit.
const PARTICIPLE_WINDOW: usize = 3;

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "get", "gets", "got", "gotten",
    "getting", "i'm", "you're", "we're", "they're", "he's", "she's", "it's", "that's",
    "isn't", "aren't", "wasn't", "weren't",
];

/// Tokens allowed between the auxiliary and the participle.
const SKIPPABLE: &[&str] = &[
    "not", "never", "also", "just", "already", "still", "being", "been", "always", "often",
    "all", "even", "really", "finally",
];

/// "been" is left out: after a contracted auxiliary it starts a perfect
/// tense ("it's been a hard week"), and as an auxiliary it is covered above.
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "born", "bought", "brought", "built", "caught", "chosen", "done", "drawn",
    "driven", "eaten", "fed", "felt", "forgiven", "forgotten", "found", "given", "gone",
    "held", "heard", "hidden", "hit", "hurt", "kept", "known", "left", "lost", "made",
    "meant", "met", "paid", "put", "read", "seen", "sent", "set", "shown", "shut", "sold",
    "spoken", "stolen", "struck", "taken", "taught", "thought", "told", "thrown", "understood",
    "woken", "won", "worn", "written",
];

/// `-ed` words that are not participles after *be*, mostly adjectives.
const ADJECTIVAL: &[&str] = &[
    "tired", "worried", "excited", "interested", "scared", "bored", "confused", "frustrated",
    "depressed", "stressed", "overwhelmed", "supposed", "used", "married", "pleased",
    "concerned", "disappointed", "annoyed", "embarrassed", "ashamed", "relieved", "relaxed",
    "exhausted", "surprised", "satisfied", "determined", "isolated", "motivated", "amazed",
    "terrified", "stuck", "upset", "indeed", "proceed", "succeed", "exceed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Active,
    Passive,
    /// Too short or too fragmentary to classify
    Unparsed,
}

/// Classification of one sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceVoice {
    pub sentence: String,
    pub voice: Voice,
}

/// Voice classification of a text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VoiceAnalysis {
    pub sentences: Vec<SentenceVoice>,
    pub active_count: usize,
    pub passive_count: usize,
    /// Sentences left out of the ratios
    pub excluded_count: usize,
    /// Fraction of classified sentences, `0.0` when none were classified
    pub active_ratio: f64,
    pub passive_ratio: f64,
}

impl VoiceAnalysis {
    pub fn classified_count(&self) -> usize {
        self.active_count + self.passive_count
    }
}

fn is_participle(token: &str) -> bool {
    if ADJECTIVAL.contains(&token) {
        return false;
    }
    IRREGULAR_PARTICIPLES.contains(&token) || (token.len() > 4 && token.ends_with("ed"))
}

fn is_skippable(token: &str) -> bool {
    SKIPPABLE.contains(&token) || (token.len() > 3 && token.ends_with("ly"))
}

/// Classify one tokenized sentence.
fn classify(tokens: &[String]) -> Voice {
    if tokens.len() < MIN_TOKENS {
        return Voice::Unparsed;
    }

    for (i, token) in tokens.iter().enumerate() {
        if !AUXILIARIES.contains(&token.as_str()) {
            continue;
        }
        for next in tokens.iter().skip(i + 1).take(PARTICIPLE_WINDOW) {
            if is_participle(next) {
                return Voice::Passive;
            }
            if !is_skippable(next) {
                break;
            }
        }
    }

    Voice::Active
}

/// Splits text into sentences and classifies each one
#[derive(Debug, Clone, Default)]
pub struct VoiceAnalyzer;

impl VoiceAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for VoiceAnalyzer {
    type Output = VoiceAnalysis;

    fn name(&self) -> &'static str {
        "voice"
    }

    fn analyze(&self, text: &str) -> VoiceAnalysis {
        let mut analysis = VoiceAnalysis::default();

        for sentence in split_sentences(text) {
            let voice = classify(&tokenize(sentence.text));
            match voice {
                Voice::Active => analysis.active_count += 1,
                Voice::Passive => analysis.passive_count += 1,
                Voice::Unparsed => analysis.excluded_count += 1,
            }
            analysis.sentences.push(SentenceVoice {
                sentence: sentence.text.to_string(),
                voice,
            });
        }

        let classified = analysis.classified_count();
        if classified > 0 {
            analysis.active_ratio = analysis.active_count as f64 / classified as f64;
            analysis.passive_ratio = analysis.passive_count as f64 / classified as f64;
        }

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice_of(text: &str) -> Voice {
        classify(&tokenize(text))
    }

    #[test]
    fn test_passive_sentences() {
        assert_eq!(voice_of("I was told to wait"), Voice::Passive);
        assert_eq!(voice_of("The appointment got cancelled"), Voice::Passive);
        assert_eq!(voice_of("It was finally approved"), Voice::Passive);
        assert_eq!(voice_of("The forms have been completed"), Voice::Passive);
    }

    #[test]
    fn test_active_sentences() {
        assert_eq!(voice_of("I called my sister yesterday"), Voice::Active);
        assert_eq!(voice_of("I am tired"), Voice::Active);
        assert_eq!(voice_of("I'm really worried"), Voice::Active);
        assert_eq!(voice_of("Why does this keep failing"), Voice::Active);
    }

    #[test]
    fn test_perfect_tense_with_been_is_active() {
        assert_eq!(voice_of("It's been a hard week"), Voice::Active);
        assert_eq!(voice_of("That's been tough"), Voice::Active);
        assert_eq!(voice_of("She's been working late"), Voice::Active);
        assert_eq!(voice_of("It's been cancelled twice"), Voice::Passive);
    }

    #[test]
    fn test_ratios_exclude_fragments() {
        let analysis = VoiceAnalyzer::new().analyze("I was told to rest. Okay. I walked home.");
        assert_eq!(analysis.passive_count, 1);
        assert_eq!(analysis.active_count, 1);
        assert_eq!(analysis.excluded_count, 1);
        assert_eq!(analysis.sentences.len(), 3);
        assert_eq!(analysis.sentences[1].voice, Voice::Unparsed);
        assert!((analysis.passive_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input() {
        let analysis = VoiceAnalyzer::new().analyze("...");
        assert!(analysis.sentences.is_empty());
        assert_eq!(analysis.active_ratio, 0.0);
        assert_eq!(analysis.passive_ratio, 0.0);
    }
}
