use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use lingalyze::analyzer::{self, Analyzer};
use lingalyze::args::{Args, OutputFormat};
use lingalyze::config::AnalysisConfig;
use lingalyze::sentiment::Lexicon;
use lingalyze::stopwords::{self, StopwordSet};
use lingalyze::{ingest, utils};

fn run(args: &Args) -> Result<()> {
    let stopwords = if args.no_stopwords {
        info!(action = "skip", component = "stopword_loading", "Stopword filtering disabled");
        StopwordSet::default()
    } else {
        stopwords::load_stopwords(args.stopwords.as_deref())?
    };
    let lexicon = Lexicon::embedded()?;
    let analyzer = Analyzer::new(AnalysisConfig::from(args), &stopwords, &lexicon)?;

    let inputs = ingest::read_inputs(args)?;
    let report = analyzer::analyze_all(&analyzer, &inputs, args.workers)?;

    if let Some(path) = &args.cloud_out {
        analyzer::write_cloud(path, &report)?;
    }

    match args.format {
        OutputFormat::Text => analyzer::print_analysis_results(&report),
        OutputFormat::Json => analyzer::print_json(&report)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    if args.init {
        return stopwords::init_default_stopwords();
    }

    if let Err(e) = run(&args) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
