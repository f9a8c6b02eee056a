use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

const DEFAULT_LEXICON: &str = include_str!("../sentiment_lexicon.tsv");

/// Polarity of a negated word is multiplied by this factor.
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
    pub intensity: f64,
}

impl LexiconEntry {
    fn is_modifier(&self) -> bool {
        self.intensity != 1.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Sentiment {
    /// -1.0 (very negative) to 1.0 (very positive)
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
}

/// Word-level sentiment lexicon with a simple negation and intensifier model.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
    word_pattern: Regex,
}

fn parse_field(field: Option<&str>, name: &str, line_num: usize) -> Result<f64> {
    let field = field.with_context(|| format!("Missing {} at lexicon line {}", name, line_num))?;
    field
        .trim()
        .parse()
        .with_context(|| format!("Invalid {} '{}' at lexicon line {}", name, field, line_num))
}

impl Lexicon {
    pub fn embedded() -> Result<Self> {
        let lexicon = Self::parse(DEFAULT_LEXICON).context("Failed to parse embedded sentiment lexicon")?;
        info!(action = "loaded", component = "sentiment_lexicon", entry_count = lexicon.len(), "Loaded embedded sentiment lexicon");
        Ok(lexicon)
    }

    /// Parse tab-separated `word polarity subjectivity intensity` lines.
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for (index, line) in content.lines().enumerate() {
            let line_num = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let word = fields.next().unwrap_or_default().trim().to_lowercase();
            let entry = LexiconEntry {
                polarity: parse_field(fields.next(), "polarity", line_num)?,
                subjectivity: parse_field(fields.next(), "subjectivity", line_num)?,
                intensity: parse_field(fields.next(), "intensity", line_num)?,
            };
            if fields.next().is_some() {
                anyhow::bail!("Too many fields at lexicon line {}", line_num);
            }
            entries.insert(word, entry);
        }

        let word_pattern = Regex::new(r"[\w']+").context("Failed to compile word pattern")?;
        Ok(Self {
            entries,
            word_pattern,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(word)
    }

    /// Average polarity and subjectivity over every assessed word in `text`.
    pub fn score(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = self
            .word_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let mut assessments: Vec<Sentiment> = Vec::new();
        let mut negated = false;
        let mut intensity = 1.0;

        for (i, word) in words.iter().enumerate() {
            if is_negation(word) {
                negated = true;
                continue;
            }

            let Some(entry) = self.get(word) else {
                negated = false;
                intensity = 1.0;
                continue;
            };

            let modifies_next = words
                .get(i + 1)
                .is_some_and(|next| self.entries.contains_key(*next));
            if entry.is_modifier() && modifies_next {
                intensity *= entry.intensity;
                continue;
            }

            let mut polarity = entry.polarity * intensity;
            if negated {
                polarity *= NEGATION_FACTOR;
            }
            assessments.push(Sentiment {
                polarity: polarity.clamp(-1.0, 1.0),
                subjectivity: (entry.subjectivity * intensity).clamp(0.0, 1.0),
            });
            negated = false;
            intensity = 1.0;
        }

        if assessments.is_empty() {
            return Sentiment::default();
        }
        let n = assessments.len() as f64;
        Sentiment {
            polarity: assessments.iter().map(|a| a.polarity).sum::<f64>() / n,
            subjectivity: assessments.iter().map(|a| a.subjectivity).sum::<f64>() / n,
        }
    }
}

fn is_negation(word: &str) -> bool {
    matches!(word, "not" | "never" | "no" | "nor" | "cannot") || word.ends_with("n't")
}
