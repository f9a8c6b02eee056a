/// Maximum number of words processed per input.
pub const MAX_WORDS: usize = 70_000;
/// Maximum number of words kept in a word cloud.
pub const MAX_WORDCLOUD_WORDS: usize = 5_000;
/// Number of entries in the frequency table.
pub const TOP_K: usize = 20;

/// Limits applied to a single analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub max_words: usize,
    pub max_cloud_words: usize,
    pub top_k: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_words: MAX_WORDS,
            max_cloud_words: MAX_WORDCLOUD_WORDS,
            top_k: TOP_K,
        }
    }
}

impl From<&crate::args::Args> for AnalysisConfig {
    fn from(args: &crate::args::Args) -> Self {
        Self {
            max_words: args.max_words,
            max_cloud_words: args.cloud_words,
            top_k: args.top,
        }
    }
}
