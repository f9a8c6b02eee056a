use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{MAX_WORDCLOUD_WORDS, MAX_WORDS, TOP_K};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "lingalyze",
    about = "Analyze text for top word frequencies, sentiment and word-cloud weights",
    version,
    long_about = None
)]
pub struct Args {
    /// Text files to analyze (reads stdin when none are given)
    pub inputs: Vec<PathBuf>,

    /// Analyze this text instead of reading files or stdin
    #[arg(long, conflicts_with = "inputs")]
    pub text: Option<String>,

    /// Number of top words to display
    #[arg(short, long, default_value_t = TOP_K)]
    pub top: usize,

    /// Maximum number of words processed per input
    #[arg(long, default_value_t = MAX_WORDS)]
    pub max_words: usize,

    /// Maximum number of words in the word cloud
    #[arg(long, default_value_t = MAX_WORDCLOUD_WORDS)]
    pub cloud_words: usize,

    /// Path to custom stopword file
    #[arg(short, long)]
    pub stopwords: Option<PathBuf>,

    /// Disable stopword filtering
    #[arg(long, conflicts_with = "stopwords")]
    pub no_stopwords: bool,

    /// Write word-cloud weights as JSON to this path
    #[arg(long)]
    pub cloud_out: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of worker threads used when analyzing several inputs
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Initialize stopwords.txt with the default stopword list
    #[arg(long)]
    pub init: bool,
}
