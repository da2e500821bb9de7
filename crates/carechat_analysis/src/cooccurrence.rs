//! Word co-occurrence within sentences.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::analyzer::Analyzer;
use crate::text::{is_stopword, split_sentences, tokenize};

/// Two words seen together in `count` sentence positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    /// Alphabetically first word
    pub first: String,
    pub second: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CooccurrenceAnalysis {
    /// Strongest pairs first, ties alphabetical
    pub pairs: Vec<WordPair>,
    /// Most frequent words first, ties by first occurrence
    pub top_words: Vec<WordCount>,
    pub total_unique_words: usize,
    pub total_sentences: usize,
}

/// Counts how often content words share a sentence
#[derive(Debug, Clone)]
pub struct CooccurrenceAnalyzer {
    /// Pairs seen fewer times are dropped
    pub min_cooccurrence: usize,
    pub top_n_words: usize,
}

impl CooccurrenceAnalyzer {
    pub fn new(min_cooccurrence: usize, top_n_words: usize) -> Self {
        Self {
            min_cooccurrence: min_cooccurrence.max(1),
            top_n_words,
        }
    }
}

impl Default for CooccurrenceAnalyzer {
    fn default() -> Self {
        Self::new(2, 20)
    }
}

impl Analyzer for CooccurrenceAnalyzer {
    type Output = CooccurrenceAnalysis;

    fn name(&self) -> &'static str {
        "cooccurrence"
    }

    fn analyze(&self, text: &str) -> CooccurrenceAnalysis {
        let mut pair_counts: BTreeMap<(String, String), usize> = BTreeMap::new();
        // word -> (count, first position)
        let mut word_counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut position = 0usize;
        let mut total_sentences = 0usize;

        for sentence in split_sentences(text) {
            let words: Vec<String> = tokenize(sentence.text)
                .into_iter()
                .filter(|w| !is_stopword(w))
                .collect();
            if words.is_empty() {
                continue;
            }
            total_sentences += 1;

            for word in &words {
                word_counts
                    .entry(word.clone())
                    .or_insert((0, position))
                    .0 += 1;
                position += 1;
            }

            for (i, a) in words.iter().enumerate() {
                for b in &words[i + 1..] {
                    if a == b {
                        continue;
                    }
                    let key = if a < b {
                        (a.clone(), b.clone())
                    } else {
                        (b.clone(), a.clone())
                    };
                    *pair_counts.entry(key).or_insert(0) += 1;
                }
            }
        }

        let mut pairs: Vec<WordPair> = pair_counts
            .into_iter()
            .filter(|(_, count)| *count >= self.min_cooccurrence)
            .map(|((first, second), count)| WordPair {
                first,
                second,
                count,
            })
            .collect();
        // Stable sort keeps the map's alphabetical order among equal counts.
        pairs.sort_by(|a, b| b.count.cmp(&a.count));

        let total_unique_words = word_counts.len();
        let mut ranked: Vec<(String, usize, usize)> = word_counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        let top_words = ranked
            .into_iter()
            .take(self.top_n_words)
            .map(|(word, count, _)| WordCount { word, count })
            .collect();

        CooccurrenceAnalysis {
            pairs,
            top_words,
            total_unique_words,
            total_sentences,
        }
    }
}
