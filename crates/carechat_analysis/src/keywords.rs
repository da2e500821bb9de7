//! Keyword and question extraction.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::text::{split_sentences, tokenize, Sentence};

/// Inflections accepted after a single-word lexicon term.
const SUFFIXES: &[&str] = &["s", "es", "ed", "d", "ing", "ful", "fully", "ly", "ness", "y"];

const DEFAULT_LEXICON: &[(&str, &[&str])] = &[
    (
        "positive",
        &[
            "happy", "great", "good", "wonderful", "excited", "love", "thank", "grateful", "joy",
        ],
    ),
    (
        "negative",
        &[
            "sad", "angry", "frustrated", "worried", "anxious", "hate", "bad", "upset",
            "depressed",
        ],
    ),
    (
        "uncertainty",
        &[
            "maybe", "perhaps", "might", "could", "possibly", "unsure", "don't know", "confused",
        ],
    ),
];

const INTERROGATIVE_PATTERN: &str = r"(?i)^\W*(?:(?:who|what|when|where|why|how|which|whose|whom)\b|(?:is|are|am|was|were|do|does|did|can|could|would|should|will|shall|may|might|have|has|had)\s+(?:i|you|we|they|he|she|it|there|this|that|my|your)\b)";

#[derive(Debug, Clone, PartialEq, Eq)]
struct LexiconEntry {
    term: String,
    category: String,
    tokens: Vec<String>,
}

/// Terms grouped by category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordLexicon {
    entries: Vec<LexiconEntry>,
}

impl KeywordLexicon {
    /// A lexicon with no terms
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a term. Terms are matched case-insensitively; a term that is
    /// already present in the category is ignored.
    pub fn with_term(mut self, category: impl Into<String>, term: impl AsRef<str>) -> Self {
        let category = category.into();
        let tokens = tokenize(term.as_ref());
        if tokens.is_empty() {
            return self;
        }
        let term = tokens.join(" ");
        let exists = self
            .entries
            .iter()
            .any(|e| e.category == category && e.term == term);
        if !exists {
            self.entries.push(LexiconEntry {
                term,
                category,
                tokens,
            });
        }
        self
    }

    pub fn with_terms<I, T>(self, category: &str, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        terms
            .into_iter()
            .fold(self, |lexicon, term| lexicon.with_term(category, term))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category names in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }
        categories
    }
}

impl Default for KeywordLexicon {
    fn default() -> Self {
        DEFAULT_LEXICON
            .iter()
            .fold(Self::empty(), |lexicon, (category, terms)| {
                lexicon.with_terms(category, terms.iter())
            })
    }
}

/// One lexicon term found in the text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub category: String,
    pub occurrences: usize,
    /// Occurrences per token of input
    pub relevance: f64,
    /// Token index of the first occurrence
    pub first_position: usize,
}

/// Keywords and questions found in a text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    /// Descending relevance, ties by first occurrence
    pub keywords: Vec<KeywordMatch>,
    /// Question sentences in text order
    pub questions: Vec<String>,
    pub token_count: usize,
}

impl KeywordAnalysis {
    pub fn has_question(&self) -> bool {
        !self.questions.is_empty()
    }

    /// Total occurrences per category
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for keyword in &self.keywords {
            *counts.entry(keyword.category.clone()).or_insert(0) += keyword.occurrences;
        }
        counts
    }
}

fn matches_word(token: &str, term: &str) -> bool {
    match token.strip_prefix(term) {
        Some("") => true,
        Some(rest) => SUFFIXES.contains(&rest),
        None => false,
    }
}

/// Scans text for lexicon terms and question sentences
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    lexicon: KeywordLexicon,
    interrogative: Regex,
}

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self::with_lexicon(KeywordLexicon::default())
    }

    pub fn with_lexicon(lexicon: KeywordLexicon) -> Self {
        Self {
            lexicon,
            interrogative: Regex::new(INTERROGATIVE_PATTERN).expect("valid interrogative pattern"),
        }
    }

    pub fn lexicon(&self) -> &KeywordLexicon {
        &self.lexicon
    }

    /// Whether a sentence reads as a question. A sentence closed with `.`
    /// or `!` is never one, whatever its wording.
    pub fn is_question(&self, sentence: &str) -> bool {
        split_sentences(sentence)
            .iter()
            .any(|s| self.sentence_is_question(s))
    }

    fn sentence_is_question(&self, sentence: &Sentence<'_>) -> bool {
        sentence.is_question_mark()
            || (sentence.terminator.is_none() && self.interrogative.is_match(sentence.text))
    }

    fn find_keywords(&self, tokens: &[String]) -> Vec<KeywordMatch> {
        let mut matches = Vec::new();

        for entry in &self.lexicon.entries {
            let positions: Vec<usize> = if entry.tokens.len() == 1 {
                tokens
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| matches_word(t, &entry.tokens[0]))
                    .map(|(i, _)| i)
                    .collect()
            } else {
                tokens
                    .windows(entry.tokens.len())
                    .enumerate()
                    .filter(|(_, window)| *window == entry.tokens.as_slice())
                    .map(|(i, _)| i)
                    .collect()
            };

            if let Some(&first_position) = positions.first() {
                matches.push(KeywordMatch {
                    keyword: entry.term.clone(),
                    category: entry.category.clone(),
                    occurrences: positions.len(),
                    relevance: positions.len() as f64 / tokens.len() as f64,
                    first_position,
                });
            }
        }

        // Relevance shares a denominator, so occurrences order it exactly.
        matches.sort_by(|a, b| {
            b.occurrences
                .cmp(&a.occurrences)
                .then(a.first_position.cmp(&b.first_position))
        });
        matches
    }
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for KeywordAnalyzer {
    type Output = KeywordAnalysis;

    fn name(&self) -> &'static str {
        "keywords"
    }

    fn analyze(&self, text: &str) -> KeywordAnalysis {
        let tokens = tokenize(text);
        let questions = split_sentences(text)
            .into_iter()
            .filter(|s| self.sentence_is_question(s))
            .map(|s| s.text.to_string())
            .collect();

        KeywordAnalysis {
            keywords: self.find_keywords(&tokens),
            questions,
            token_count: tokens.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon() {
        let lexicon = KeywordLexicon::default();
        assert_eq!(lexicon.categories(), vec!["positive", "negative", "uncertainty"]);
        assert_eq!(lexicon.len(), 26);
    }

    #[test]
    fn test_keywords_ranked() {
        let analysis = KeywordAnalyzer::new()
            .analyze("I feel sad. Maybe I am sad because I am worried, so sad.");
        assert_eq!(analysis.keywords[0].keyword, "sad");
        assert_eq!(analysis.keywords[0].occurrences, 3);
        // maybe (position 3) ties worried on count but occurs first
        assert_eq!(analysis.keywords[1].keyword, "maybe");
        assert_eq!(analysis.keywords[2].keyword, "worried");
        assert_eq!(analysis.category_counts()["negative"], 4);
    }

    #[test]
    fn test_inflections_and_phrases() {
        let analysis =
            KeywordAnalyzer::new().analyze("I loved it and I'm thankful, but I don't know why.");
        let keywords: Vec<&str> = analysis.keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["love", "thank", "don't know"]);
        assert!(analysis.keywords[0].relevance > 0.0);
    }

    #[test]
    fn test_no_false_prefix_match() {
        let analysis = KeywordAnalyzer::new().analyze("The badge was joyous and badly made");
        let keywords: Vec<&str> = analysis.keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["bad"]);
    }

    #[test]
    fn test_questions() {
        let analyzer = KeywordAnalyzer::new();
        let analysis = analyzer.analyze("Why does this keep failing? It broke again. how do I fix it");
        assert_eq!(
            analysis.questions,
            vec!["Why does this keep failing?", "how do I fix it"]
        );
        assert!(analyzer.is_question("Is it normal to feel this way"));
        assert!(!analyzer.is_question("What a day."));
        assert!(!analyzer.is_question("I love this, thank you!"));
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = KeywordLexicon::empty()
            .with_term("sleep", "Insomnia")
            .with_term("sleep", "insomnia")
            .with_term("sleep", "   ");
        assert_eq!(lexicon.len(), 1);
        let analysis = KeywordAnalyzer::with_lexicon(lexicon).analyze("insomnia again");
        assert_eq!(analysis.keywords[0].category, "sleep");
    }

    #[test]
    fn test_empty_input() {
        let analysis = KeywordAnalyzer::new().analyze("?!");
        assert!(analysis.keywords.is_empty());
        assert!(!analysis.has_question());
        assert_eq!(analysis.token_count, 0);
    }
}
