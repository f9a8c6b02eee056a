use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use crate::stopwords::StopwordSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudWord {
    pub word: String,
    pub count: u32,
    /// Count relative to the most frequent word, in (0, 1].
    pub weight: f64,
}

/// Case variants of one lower-cased word, in first-seen order.
#[derive(Debug)]
struct WordGroup {
    key: String,
    variants: Vec<(String, u32)>,
    merged: bool,
}

impl WordGroup {
    fn add(&mut self, word: String, count: u32) {
        match self.variants.iter_mut().find(|(variant, _)| *variant == word) {
            Some((_, existing)) => *existing += count,
            None => self.variants.push((word, count)),
        }
    }

    /// The most frequent case variant (earliest wins ties) and the summed count.
    fn fuse(&self) -> Option<(String, u32)> {
        let mut best: Option<&(String, u32)> = None;
        for variant in &self.variants {
            if best.map_or(true, |(_, count)| variant.1 > *count) {
                best = Some(variant);
            }
        }
        let total = self.variants.iter().map(|(_, count)| count).sum();
        best.map(|(word, _)| (word.clone(), total))
    }
}

fn strip_last_char(word: &str) -> &str {
    match word.char_indices().next_back() {
        Some((index, _)) => &word[..index],
        None => word,
    }
}

/// Computes word-cloud weights the way common word-cloud renderers process text:
/// unigrams only, case-merged, plural-merged, stopwords removed.
#[derive(Debug, Clone)]
pub struct WordCloud {
    word_pattern: Regex,
    stopwords: HashSet<String>,
    max_words: usize,
}

impl WordCloud {
    pub fn new(stopwords: &StopwordSet, max_words: usize) -> Result<Self> {
        let word_pattern = Regex::new(r"\w[\w']*").context("Failed to compile word-cloud pattern")?;
        Ok(Self {
            word_pattern,
            stopwords: stopwords.iter().map(str::to_lowercase).collect(),
            max_words,
        })
    }

    fn words<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.word_pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .map(|word| {
                if word.to_lowercase().ends_with("'s") {
                    &word[..word.len() - 2]
                } else {
                    word
                }
            })
            .filter(|word| !word.is_empty() && !word.chars().all(char::is_numeric))
            .filter(|word| !self.stopwords.contains(&word.to_lowercase()))
            .collect()
    }

    pub fn weights(&self, text: &str) -> Vec<CloudWord> {
        let mut groups: Vec<WordGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for word in self.words(text) {
            let key = word.to_lowercase();
            let position = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(WordGroup {
                    key,
                    variants: Vec::new(),
                    merged: false,
                });
                groups.len() - 1
            });
            groups[position].add(word.to_string(), 1);
        }

        // Fold "cats" into "cat" when both occur; "glass" is left alone
        for i in 0..groups.len() {
            let key = &groups[i].key;
            if !key.ends_with('s') || key.ends_with("ss") {
                continue;
            }
            let Some(&singular) = index.get(strip_last_char(key)) else {
                continue;
            };
            if groups[singular].merged {
                continue;
            }
            let plurals = std::mem::take(&mut groups[i].variants);
            for (word, count) in plurals {
                groups[singular].add(strip_last_char(&word).to_string(), count);
            }
            groups[i].merged = true;
        }

        let mut fused: Vec<(String, u32)> = groups
            .iter()
            .filter(|group| !group.merged)
            .filter_map(WordGroup::fuse)
            .collect();
        fused.sort_by_key(|(_, count)| Reverse(*count));
        fused.truncate(self.max_words);

        let max_count = match fused.first() {
            Some((_, count)) => f64::from(*count),
            None => return Vec::new(),
        };
        fused
            .into_iter()
            .map(|(word, count)| CloudWord {
                weight: f64::from(count) / max_count,
                word,
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(words: &[CloudWord]) -> Vec<(&str, u32)> {
        words.iter().map(|w| (w.word.as_str(), w.count)).collect()
    }

    #[test]
    fn merges_case_plurals_and_possessives() {
        let cloud = WordCloud::new(&StopwordSet::english(), 5_000).unwrap();
        let words = cloud.weights("Cats and cats and CAT cat dog's dog 42 1984");
        assert_eq!(summary(&words), vec![("cat", 4), ("dog", 2)]);
        assert_eq!(words[0].weight, 1.0);
        assert_eq!(words[1].weight, 0.5);
    }

    #[test]
    fn stopwords_match_with_apostrophes_and_case() {
        let cloud = WordCloud::new(&StopwordSet::english(), 5_000).unwrap();
        let words = cloud.weights("Don't STOP believing, The end");
        assert_eq!(
            summary(&words),
            vec![("STOP", 1), ("believing", 1), ("end", 1)]
        );
    }

    #[test]
    fn folds_upper_case_stopwords() {
        let cloud = WordCloud::new(&StopwordSet::from_words(["The"]), 5_000).unwrap();
        assert_eq!(summary(&cloud.weights("the THE fox")), vec![("fox", 1)]);
    }

    #[test]
    fn double_s_is_not_a_plural() {
        let cloud = WordCloud::new(&StopwordSet::default(), 5_000).unwrap();
        let words = cloud.weights("glass glasses glass");
        assert_eq!(summary(&words), vec![("glass", 2), ("glasses", 1)]);
    }

    #[test]
    fn keeps_most_frequent_words_in_first_seen_order() {
        let cloud = WordCloud::new(&StopwordSet::default(), 2).unwrap();
        let words = cloud.weights("b a c a c c d");
        assert_eq!(summary(&words), vec![("c", 3), ("a", 2)]);
        assert!((words[1].weight - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn most_common_case_variant_is_displayed() {
        let cloud = WordCloud::new(&StopwordSet::default(), 5_000).unwrap();
        let words = cloud.weights("Rust rust RUST rust");
        assert_eq!(summary(&words), vec![("rust", 4)]);

        let words = cloud.weights("Rust rust");
        assert_eq!(summary(&words), vec![("Rust", 2)]);
    }

    #[test]
    fn empty_text_has_no_words() {
        let cloud = WordCloud::new(&StopwordSet::default(), 5_000).unwrap();
        assert!(cloud.weights("").is_empty());
        assert!(cloud.weights("... 123 !!").is_empty());
    }
}
