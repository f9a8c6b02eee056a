use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

// Include default stopwords at compile time
const DEFAULT_STOPWORDS: &str = include_str!("../default_stopwords.txt");

const DEFAULT_STOPWORD_FILE: &str = "stopwords.txt";

/// Words excluded from frequency ranking. Lookups are case-sensitive.
#[derive(Debug, Default, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The embedded default English list.
    pub fn english() -> Self {
        Self::from_words(parse_lines(DEFAULT_STOPWORDS, "embedded_stopwords"))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

fn parse_lines<'a>(content: &'a str, component: &'static str) -> Vec<&'a str> {
    let mut words = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Tokens are lower-cased before lookup, so these can never match
        if line.chars().any(char::is_uppercase) {
            warn!(action = "parse", component, line_number = line_num + 1, word = line, "Stopword contains upper-case characters and will never match");
        }
        words.push(line);
    }
    words
}

pub fn load_stopwords(stopword_file_path: Option<&Path>) -> Result<StopwordSet> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "stopword_loading",
        "Starting stopword loading"
    );

    let stopwords = if let Some(path) = stopword_file_path {
        info!(action = "load", component = "stopword_file", file_path = ?path, "Loading stopwords from specified file");
        if !path.exists() {
            anyhow::bail!("Stopword file not found: {:?}", path);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stopword file {:?}", path))?;
        StopwordSet::from_words(parse_lines(&content, "stopword_file"))
    } else {
        let default_file = Path::new(DEFAULT_STOPWORD_FILE);
        if default_file.exists() {
            info!(action = "load", component = "default_stopword_file", file_path = ?default_file, "Loading stopwords from default file");
            let content = fs::read_to_string(default_file)
                .with_context(|| format!("Failed to read stopword file {:?}", default_file))?;
            StopwordSet::from_words(parse_lines(&content, "default_stopword_file"))
        } else {
            info!(
                action = "load",
                component = "embedded_stopwords",
                "Using embedded default stopwords"
            );
            StopwordSet::english()
        }
    };

    info!(
        action = "complete",
        component = "stopword_loading",
        stopword_count = stopwords.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Stopwords loaded"
    );
    Ok(stopwords)
}

pub fn init_default_stopwords() -> Result<()> {
    init_default_stopwords_at(Path::new(DEFAULT_STOPWORD_FILE))
}

fn init_default_stopwords_at(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            path.display()
        );
    }

    fs::write(path, DEFAULT_STOPWORDS)
        .with_context(|| format!("Failed to write {:?}", path))?;
    println!("Created {} with default stopwords", path.display());

    Ok(())
}
