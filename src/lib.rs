pub mod analyzer;
pub mod args;
pub mod cloud;
pub mod config;
pub mod ingest;
pub mod normalize;
pub mod rank;
pub mod sentiment;
pub mod stats;
pub mod stopwords;
pub mod utils;

pub use analyzer::{analyze_all, Analyzer};
pub use args::Args;
pub use config::AnalysisConfig;
pub use ingest::{truncate, BoundedText, Input};
pub use normalize::normalize_token;
pub use rank::{rank, FrequencyTable, WordCount};
pub use stats::{AnalysisReport, TextAnalysis};
pub use stopwords::{init_default_stopwords, StopwordSet};
