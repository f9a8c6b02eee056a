use anyhow::{Context, Result};
use chrono::Utc;
use rayon::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::cloud::WordCloud;
use crate::config::AnalysisConfig;
use crate::ingest::{truncate, Input};
use crate::rank::FrequencyTable;
use crate::sentiment::Lexicon;
use crate::stats::{AnalysisReport, TextAnalysis};
use crate::stopwords::StopwordSet;
use crate::utils::format_number;

/// Runs the full pipeline over one input at a time. Shared read-only across threads.
pub struct Analyzer<'a> {
    config: AnalysisConfig,
    stopwords: &'a StopwordSet,
    lexicon: &'a Lexicon,
    cloud: WordCloud,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: AnalysisConfig, stopwords: &'a StopwordSet, lexicon: &'a Lexicon) -> Result<Self> {
        let cloud = WordCloud::new(stopwords, config.max_cloud_words)?;
        Ok(Self {
            config,
            stopwords,
            lexicon,
            cloud,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    #[tracing::instrument(skip_all, fields(source = %input.source))]
    pub fn analyze(&self, input: &Input) -> TextAnalysis {
        let start_time = Instant::now();

        let bounded = truncate(&input.text, self.config.max_words);
        if bounded.was_truncated {
            warn!(
                action = "truncate",
                component = "ingest",
                total_words = bounded.total_tokens,
                max_words = self.config.max_words,
                "Input text truncated"
            );
        }

        let table = FrequencyTable::from_tokens(&bounded.tokens, self.stopwords);
        let top_words = table.ranked(self.config.top_k);
        let sentiment = self.lexicon.score(&bounded.text);
        let cloud = self.cloud.weights(&bounded.text);

        info!(
            action = "complete",
            component = "analysis",
            processed_words = bounded.tokens.len(),
            unique_words = table.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Analysis completed"
        );

        TextAnalysis {
            source: input.source.clone(),
            total_words: bounded.total_tokens,
            processed_words: bounded.tokens.len(),
            was_truncated: bounded.was_truncated,
            unique_words: table.len(),
            filtered_words: table.total(),
            top_words,
            sentiment,
            cloud,
        }
    }
}

/// Analyze every non-empty input, in parallel across inputs, keeping input order.
pub fn analyze_all(
    analyzer: &Analyzer<'_>,
    inputs: &[Input],
    max_workers: Option<usize>,
) -> Result<AnalysisReport> {
    let start_time = Instant::now();
    info!(action = "start", component = "batch_analysis", input_count = inputs.len(), "Starting text analysis");

    let non_empty: Vec<&Input> = inputs
        .iter()
        .filter(|input| {
            if input.text.is_empty() {
                warn!(action = "skip", component = "batch_analysis", source = %input.source, "Input is empty, nothing to analyze");
                false
            } else {
                true
            }
        })
        .collect();

    let max_workers = max_workers.unwrap_or_else(|| {
        let cpu_count = num_cpus::get();
        std::cmp::min(cpu_count, 8)
    });
    info!(action = "configure", component = "batch_analysis", worker_count = max_workers, "Using workers for processing");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_workers)
        .build()
        .context("Failed to build worker thread pool")?;
    let analyses: Vec<TextAnalysis> =
        pool.install(|| non_empty.par_iter().map(|input| analyzer.analyze(input)).collect());

    info!(
        action = "complete",
        component = "batch_analysis",
        analyzed = analyses.len(),
        skipped = inputs.len() - analyses.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Text analysis completed"
    );

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        max_words: analyzer.config().max_words,
        analyses,
    })
}

pub fn write_cloud(path: &Path, report: &AnalysisReport) -> Result<()> {
    let clouds: Vec<_> = report
        .analyses
        .iter()
        .map(|analysis| json!({ "source": analysis.source, "words": analysis.cloud }))
        .collect();
    let document = json!({ "generated_at": report.generated_at, "clouds": clouds });

    let content = serde_json::to_string_pretty(&document).context("Failed to serialize word cloud")?;
    fs::write(path, content).with_context(|| format!("Failed to write word cloud to {:?}", path))?;
    info!(action = "write", component = "word_cloud", file_path = ?path, "Wrote word-cloud weights");
    Ok(())
}

pub fn print_json(report: &AnalysisReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{}", content);
    Ok(())
}

pub fn print_analysis_results(report: &AnalysisReport) {
    if report.analyses.is_empty() {
        println!("Nothing to analyze.");
        return;
    }

    for analysis in &report.analyses {
        println!("\n--- {} Text Analysis ---", analysis.source);

        if analysis.was_truncated {
            println!(
                "Warning: input truncated to {} of {} words for performance.",
                format_number(report.max_words),
                format_number(analysis.total_words)
            );
        }
        println!("Words processed: {}", format_number(analysis.processed_words));
        println!(
            "Unique words (excluding stopwords): {}",
            format_number(analysis.unique_words)
        );

        println!(
            "\nTop {} word frequency (excluding stopwords & punctuation):",
            analysis.top_words.len()
        );
        for entry in &analysis.top_words {
            println!("- {}: {}", entry.word, format_number(entry.count as usize));
        }

        println!("\nSentiment:");
        println!(
            "Polarity: {:.2}  |  Subjectivity: {:.2}",
            analysis.sentiment.polarity, analysis.sentiment.subjectivity
        );

        println!(
            "\nWord cloud: {} words",
            format_number(analysis.cloud.len())
        );
    }
}
