//! Analyze command - Run the text analyzers on ad-hoc text.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;

use carechat_analysis::{
    Analyzer, CooccurrenceAnalysis, CooccurrenceAnalyzer, KeywordAnalysis, KeywordAnalyzer,
    SentimentAnalyzer, SentimentScore, VoiceAnalysis, VoiceAnalyzer,
};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(required_unless_present = "file")]
    text: Vec<String>,

    /// Read the text from a file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TextAnalysis {
    sentiment: SentimentScore,
    voice: VoiceAnalysis,
    keywords: KeywordAnalysis,
    cooccurrence: CooccurrenceAnalysis,
}

fn analyze(text: &str) -> TextAnalysis {
    TextAnalysis {
        sentiment: SentimentAnalyzer::new().analyze(text),
        voice: VoiceAnalyzer::new().analyze(text),
        keywords: KeywordAnalyzer::new().analyze(text),
        cooccurrence: CooccurrenceAnalyzer::default().analyze(text),
    }
}

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let text = match args.file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => args.text.join(" "),
    };

    println!("{}", serde_json::to_string_pretty(&analyze(&text))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_output() {
        let value = serde_json::to_value(analyze("Why does this keep failing?")).unwrap();
        assert_eq!(value["keywords"]["questions"].as_array().unwrap().len(), 1);
        assert!(value["sentiment"]["polarity"].as_f64().unwrap() <= 0.1);
        assert!(value["voice"]["sentences"].is_array());
    }

    #[test]
    fn test_empty_text() {
        let analysis = analyze("");
        assert_eq!(analysis.sentiment, SentimentScore::neutral());
        assert!(analysis.keywords.keywords.is_empty());
        assert_eq!(analysis.cooccurrence.total_sentences, 0);
    }
}
