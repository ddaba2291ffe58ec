use serde::{Deserialize, Serialize};

use crate::stopwords::ENGLISH_STOPWORDS;
use crate::text::is_punctuation;

/// A named thing mentioned in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

impl Entity {
    pub const ACRONYM: &'static str = "ACRONYM";
    pub const PROPER_NOUN: &'static str = "PROPER_NOUN";

    pub fn new<T: ToString, L: ToString>(text: T, label: L) -> Self {
        Self {
            text: text.to_string(),
            label: label.to_string(),
        }
    }
}

/// Finds named entities in a text.
pub trait EntityRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

impl<R: EntityRecognizer + ?Sized> EntityRecognizer for &R {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        (**self).recognize(text)
    }
}

/// Recognizes nothing, for runs without entity recognition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntities;

impl EntityRecognizer for NoEntities {
    fn recognize(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }
}

/// Treats runs of capitalized words as entities.
///
/// Punctuation after a word ends the run, a stopword can't start one. Title
/// cased headlines collapse into a few long entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizedRecognizer;

impl CapitalizedRecognizer {
    fn flush(words: &mut Vec<&str>, entities: &mut Vec<Entity>) {
        if words.is_empty() {
            return;
        }
        let text = words.join(" ");
        let label = if words.len() == 1
            && text.chars().count() >= 2
            && text.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
        {
            Entity::ACRONYM
        } else {
            Entity::PROPER_NOUN
        };
        entities.push(Entity::new(text, label));
        words.clear();
    }
}

impl EntityRecognizer for CapitalizedRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut words = Vec::new();

        for raw in text.split_whitespace() {
            let word = raw.trim_matches(is_punctuation);
            let capitalized = word.chars().next().map_or(false, char::is_uppercase);

            if capitalized && !(words.is_empty() && ENGLISH_STOPWORDS.is_stopword(word)) {
                words.push(word);
            } else {
                Self::flush(&mut words, &mut entities);
            }

            if raw.ends_with(is_punctuation) {
                Self::flush(&mut words, &mut entities);
            }
        }
        Self::flush(&mut words, &mut entities);

        entities
    }
}
