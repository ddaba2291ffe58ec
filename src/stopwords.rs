use std::collections::HashSet;
use std::ops::Deref;

use lazy_static::lazy_static;

use crate::language::Language;

lazy_static! {
    /// Words that never count as keywords.
    pub static ref ENGLISH_STOPWORDS: StopWords =
        StopWords::from_lines(Language::English, include_str!("../resources/stopwords/stopwords-en.txt"));
}

#[derive(Debug, Clone)]
pub struct StopWords {
    pub language: Language,
    words: HashSet<String>,
}

impl Deref for StopWords {
    type Target = HashSet<String>;

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

impl StopWords {
    /// One word per line, blank lines are ignored.
    pub fn from_lines(language: Language, lines: &str) -> Self {
        let words = lines
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { language, words }
    }

    /// Whether `word` is a stopword, ignoring case.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}
