use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cloud::CloudWord;
use crate::rank::WordCount;
use crate::sentiment::Sentiment;

#[derive(Debug, Serialize)]
pub struct TextAnalysis {
    pub source: String,
    /// Whitespace-delimited words in the input.
    pub total_words: usize,
    /// Words kept after truncation.
    pub processed_words: usize,
    pub was_truncated: bool,
    /// Distinct words left after normalization and stopword removal.
    pub unique_words: usize,
    /// Occurrences of those words.
    pub filtered_words: usize,
    pub top_words: Vec<WordCount>,
    pub sentiment: Sentiment,
    pub cloud: Vec<CloudWord>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub max_words: usize,
    pub analyses: Vec<TextAnalysis>,
}
