use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::normalize::normalize_token;
use crate::stopwords::StopwordSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Word counts in the order each word was first seen.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Normalize `tokens`, drop empty results and stopwords, and count the rest.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], stopwords: &StopwordSet) -> Self {
        let mut table = Self::default();
        for token in tokens {
            let word = normalize_token(token.as_ref());
            if word.is_empty() || stopwords.contains(&word) {
                continue;
            }
            table.add(word);
        }
        table
    }

    pub fn add(&mut self, word: String) {
        match self.index.get(&word) {
            Some(&position) => self.entries[position].count += 1,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push(WordCount { word, count: 1 });
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u32> {
        self.index.get(word).map(|&position| self.entries[position].count)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count as usize).sum()
    }

    /// Entries by descending count; equal counts keep first-seen order.
    pub fn ranked(&self, top_k: usize) -> Vec<WordCount> {
        let mut sorted = self.entries.clone();
        // sort_by_key is stable, which keeps the first-seen tie-break
        sorted.sort_by_key(|entry| Reverse(entry.count));
        sorted.truncate(top_k);
        sorted
    }
}

/// Rank the `top_k` most frequent normalized, non-stopword tokens.
pub fn rank<S: AsRef<str>>(tokens: &[S], stopwords: &StopwordSet, top_k: usize) -> Vec<WordCount> {
    FrequencyTable::from_tokens(tokens, stopwords).ranked(top_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::truncate;

    fn pairs(ranking: &[WordCount]) -> Vec<(&str, u32)> {
        ranking
            .iter()
            .map(|entry| (entry.word.as_str(), entry.count))
            .collect()
    }

    #[test]
    fn ranks_with_first_seen_tie_break() {
        let stopwords = StopwordSet::from_words(["the"]);
        let bounded = truncate("The cat sat. The CAT sat!", 70_000);
        let ranking = rank(&bounded.tokens, &stopwords, 20);
        assert_eq!(pairs(&ranking), vec![("cat", 2), ("sat", 2)]);
    }

    #[test]
    fn higher_counts_come_first() {
        let stopwords = StopwordSet::default();
        let tokens = ["b", "a", "c", "a", "c", "c"];
        let ranking = rank(&tokens, &stopwords, 20);
        assert_eq!(pairs(&ranking), vec![("c", 3), ("a", 2), ("b", 1)]);
    }

    #[test]
    fn empty_input_ranks_nothing() {
        let tokens: [&str; 0] = [];
        assert!(rank(&tokens, &StopwordSet::default(), 20).is_empty());
    }

    #[test]
    fn limits_to_top_k() {
        let tokens: Vec<String> = (0..30).map(|i| format!("w{}", i)).collect();
        let ranking = rank(&tokens, &StopwordSet::default(), 20);
        assert_eq!(ranking.len(), 20);
        assert_eq!(ranking[0].word, "w0");
        assert_eq!(ranking[19].word, "w19");
    }

    #[test]
    fn fewer_words_than_top_k_returns_all() {
        let ranking = rank(&["x", "y"], &StopwordSet::default(), 20);
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn drops_empty_tokens_and_stopwords() {
        let stopwords = StopwordSet::from_words(["and", "or"]);
        let tokens = ["--", "AND", "bread", "...", "Or", "butter", "and!"];
        let table = FrequencyTable::from_tokens(&tokens, &stopwords);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 2);
        assert_eq!(table.get("and"), None);
        assert_eq!(table.get("bread"), Some(1));
    }

    #[test]
    fn upper_case_stopwords_never_match() {
        let stopwords = StopwordSet::from_words(["The"]);
        let ranking = rank(&["The", "the"], &stopwords, 20);
        assert_eq!(pairs(&ranking), vec![("the", 2)]);
    }

    #[test]
    fn total_matches_surviving_tokens() {
        let stopwords = StopwordSet::from_words(["a"]);
        let tokens = ["A", "cat,", "a", "dog", "!!", "cat", "Dog."];
        let table = FrequencyTable::from_tokens(&tokens, &stopwords);
        assert_eq!(table.total(), 4);
        assert_eq!(table.ranked(usize::MAX).iter().map(|e| e.count as usize).sum::<usize>(), 4);
    }

    #[test]
    fn reranking_ranked_words_counts_each_once() {
        let stopwords = StopwordSet::from_words(["the"]);
        let first = rank(&["The", "Café!", "café", "naïve.", "x-ray"], &stopwords, 20);
        let words: Vec<&str> = first.iter().map(|entry| entry.word.as_str()).collect();
        let second = rank(&words, &stopwords, 20);
        assert_eq!(
            pairs(&second),
            vec![("café", 1), ("naïve", 1), ("xray", 1)]
        );
    }

    #[test]
    fn truncated_tail_never_ranks() {
        let mut raw = String::new();
        for i in 0..70_000 {
            raw.push_str(if i % 2 == 0 { "a " } else { "b " });
        }
        for _ in 0..10 {
            raw.push_str("z ");
        }
        let bounded = truncate(&raw, 70_000);
        let ranking = rank(&bounded.tokens, &StopwordSet::default(), 20);
        assert_eq!(pairs(&ranking), vec![("a", 35_000), ("b", 35_000)]);
    }
}
