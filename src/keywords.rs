use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::stopwords::ENGLISH_STOPWORDS;

/// Number of keywords shown by default.
pub const DEFAULT_TOP_KEYWORDS: usize = 10;

/// Running count of keyword occurrences.
///
/// Tokens are split on whitespace only and keep any attached punctuation, so
/// `ai,` and `ai` count separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordFrequency {
    counts: HashMap<String, usize>,
}

impl KeywordFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds all keywords of `text`, skipping stopwords and single characters.
    pub fn accumulate(&mut self, text: &str) {
        for word in text.to_lowercase().split_whitespace() {
            if word.chars().count() <= 1 || ENGLISH_STOPWORDS.contains(word) {
                continue;
            }
            *self.counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The `n` most frequent keywords, most frequent first.
    ///
    /// Equal counts are ordered alphabetically.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
        entries.truncate(n);
        entries
    }
}
