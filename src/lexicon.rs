//! Word level polarity and subjectivity scores.
//!
//! Values follow the pattern adjective lexicon: polarity in `[-1, 1]`,
//! subjectivity in `[0, 1]`.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Score of a single lexicon word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
}

#[rustfmt::skip]
const ENTRIES: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("happy", 0.8, 1.0),
    ("love", 0.5, 0.6),
    ("nice", 0.6, 1.0),
    ("positive", 0.227, 0.545),
    ("strong", 0.433, 0.733),
    ("successful", 0.75, 0.95),
    ("success", 0.3, 0.4),
    ("win", 0.8, 0.4),
    ("wins", 0.8, 0.4),
    ("record", 0.2, 0.3),
    ("new", 0.136, 0.455),
    ("free", 0.4, 0.8),
    ("safe", 0.5, 0.5),
    ("top", 0.5, 0.5),
    ("hope", 0.3, 0.5),
    ("hopeful", 0.5, 0.6),
    ("boost", 0.3, 0.4),
    ("growth", 0.2, 0.3),
    ("surge", 0.25, 0.4),
    ("soars", 0.3, 0.4),
    ("rally", 0.25, 0.4),
    ("breakthrough", 0.5, 0.5),
    ("innovative", 0.5, 0.75),
    ("smart", 0.214, 0.643),
    ("powerful", 0.3, 1.0),
    ("easy", 0.433, 0.833),
    ("fun", 0.3, 0.2),
    ("important", 0.4, 1.0),
    ("interesting", 0.5, 0.5),
    ("popular", 0.6, 0.8),
    ("brilliant", 0.9, 1.0),
    ("perfect", 1.0, 1.0),
    ("impressive", 1.0, 1.0),
    ("bad", -0.7, 0.667),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("dangerous", -0.6, 0.9),
    ("deadly", -0.2, 0.4),
    ("dead", -0.2, 0.4),
    ("fake", -0.5, 1.0),
    ("wrong", -0.5, 0.9),
    ("weak", -0.375, 0.625),
    ("negative", -0.3, 0.4),
    ("crash", -0.4, 0.5),
    ("crisis", -0.4, 0.5),
    ("collapse", -0.5, 0.5),
    ("fear", -0.4, 0.6),
    ("fears", -0.4, 0.6),
    ("threat", -0.4, 0.5),
    ("war", -0.4, 0.4),
    ("loss", -0.4, 0.4),
    ("losses", -0.4, 0.4),
    ("fail", -0.5, 0.3),
    ("fails", -0.5, 0.3),
    ("failure", -0.3166, 0.3),
    ("slump", -0.3, 0.4),
    ("plunge", -0.4, 0.4),
    ("hard", -0.292, 0.542),
    ("difficult", -0.5, 1.0),
    ("serious", -0.333, 0.667),
    ("violent", -0.8, 1.0),
    ("illegal", -0.5, 0.5),
    ("risky", -0.5, 0.75),
    ("worried", -0.5, 0.8),
    ("scandal", -0.5, 0.6),
    ("old", 0.1, 0.2),
    ("big", 0.0, 0.1),
    ("small", -0.25, 0.4),
    ("high", 0.16, 0.54),
    ("low", 0.0, 0.3),
    ("real", 0.2, 0.3),
    ("latest", 0.5, 0.9),
    ("first", 0.25, 0.333),
    ("last", 0.0, 0.067),
];

#[rustfmt::skip]
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.6),
    ("incredibly", 1.6),
    ("highly", 1.4),
    ("so", 1.2),
    ("too", 1.1),
    ("most", 1.3),
    ("more", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("barely", 0.5),
];

#[rustfmt::skip]
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "without", "neither", "cannot",
    "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
    "won't", "can't", "couldn't", "shouldn't", "wouldn't", "hasn't", "haven't",
];

lazy_static! {
    static ref WORDS: HashMap<&'static str, LexiconEntry> = ENTRIES
        .iter()
        .map(|&(word, polarity, subjectivity)| {
            (
                word,
                LexiconEntry {
                    polarity,
                    subjectivity,
                },
            )
        })
        .collect();
    static ref MODIFIERS: HashMap<&'static str, f64> = INTENSIFIERS.iter().copied().collect();
}

/// Polarity and subjectivity of a lowercase word.
pub fn lookup(word: &str) -> Option<LexiconEntry> {
    WORDS.get(word).copied()
}

/// Multiplier applied to the next scored word.
pub fn intensity(word: &str) -> Option<f64> {
    MODIFIERS.get(word).copied()
}

pub fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word)
}
