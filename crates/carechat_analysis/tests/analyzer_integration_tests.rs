//! Integration and property tests for the analyzers.

use proptest::prelude::*;

use carechat_analysis::{
    Analyzer, CooccurrenceAnalyzer, KeywordAnalyzer, SentimentAnalyzer, SentimentLabel,
    VoiceAnalyzer,
};

#[test]
fn test_concrete_messages() {
    let sentiment = SentimentAnalyzer::new();
    let keywords = KeywordAnalyzer::new();

    let first = "I love this, thank you!";
    let second = "Why does this keep failing?";

    assert_eq!(sentiment.analyze(first).label, SentimentLabel::Positive);
    assert_ne!(sentiment.analyze(second).label, SentimentLabel::Positive);

    assert!(!keywords.analyze(first).has_question());
    assert_eq!(keywords.analyze(second).questions, vec![second.to_string()]);
}

#[test]
fn test_call_order_does_not_matter() {
    let sentiment = SentimentAnalyzer::new();
    let texts = ["I feel awful", "Great news today", "It is what it is"];

    let forward: Vec<_> = texts.iter().map(|t| sentiment.analyze(t)).collect();
    let backward: Vec<_> = texts.iter().rev().map(|t| sentiment.analyze(t)).collect();
    let backward: Vec<_> = backward.into_iter().rev().collect();

    assert_eq!(forward, backward);
}

#[test]
fn test_non_linguistic_input() {
    for text in ["", "🙂", "?!?!", "12345", "\n\n"] {
        assert_eq!(SentimentAnalyzer::new().analyze(text).label, SentimentLabel::Neutral);
        assert_eq!(VoiceAnalyzer::new().analyze(text).classified_count(), 0);
        assert!(KeywordAnalyzer::new().analyze(text).keywords.is_empty());
        assert!(CooccurrenceAnalyzer::default().analyze(text).pairs.is_empty());
    }
}

proptest! {
    #[test]
    fn prop_sentiment_bounded_and_labelled(text in "\\PC{0,200}") {
        let score = SentimentAnalyzer::new().analyze(&text);
        prop_assert!((-1.0..=1.0).contains(&score.polarity));
        prop_assert!((0.0..=1.0).contains(&score.subjectivity));
        prop_assert_eq!(score.label == SentimentLabel::Positive, score.polarity > 0.1);
        prop_assert_eq!(score.label == SentimentLabel::Negative, score.polarity < -0.1);
    }

    #[test]
    fn prop_sentiment_on_lexicon_words(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "not", "very", "good", "bad", "sad", "love", "never", "hate", "slightly", "fine",
            ]),
            0..30,
        )
    ) {
        let text = words.join(" ");
        let analyzer = SentimentAnalyzer::new();
        let score = analyzer.analyze(&text);
        prop_assert!((-1.0..=1.0).contains(&score.polarity));
        prop_assert_eq!(score, analyzer.analyze(&text));
    }

    #[test]
    fn prop_voice_ratios_sum(text in "[a-z .?!]{0,200}") {
        let analysis = VoiceAnalyzer::new().analyze(&text);
        prop_assert_eq!(
            analysis.sentences.len(),
            analysis.classified_count() + analysis.excluded_count
        );
        if analysis.classified_count() > 0 {
            prop_assert!((analysis.active_ratio + analysis.passive_ratio - 1.0).abs() < 1e-9);
        } else {
            prop_assert_eq!(analysis.active_ratio, 0.0);
        }
    }

    #[test]
    fn prop_keywords_ordered(text in "[a-z ,.?]{0,200}") {
        let analysis = KeywordAnalyzer::new().analyze(&text);
        for pair in analysis.keywords.windows(2) {
            prop_assert!(
                pair[0].relevance > pair[1].relevance
                    || (pair[0].relevance == pair[1].relevance
                        && pair[0].first_position <= pair[1].first_position)
            );
        }
    }
}
