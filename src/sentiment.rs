use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StimmungError;
use crate::lexicon;
use crate::text;

/// Polarity above this is `Positive`.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below this is `Negative`.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Polarity flip applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in display order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Maps a polarity onto a label, the thresholds themselves are `Neutral`.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = StimmungError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            _ => Err(StimmungError::UnknownSentiment(s.to_string())),
        }
    }
}

/// Raw scores of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sentiment {
    /// Negative to positive, in `[-1, 1]`.
    pub polarity: f64,
    /// Factual to opinionated, in `[0, 1]`.
    pub subjectivity: f64,
}

/// Scores a text for polarity and subjectivity.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> Sentiment;
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for &S {
    fn score(&self, text: &str) -> Sentiment {
        (**self).score(text)
    }
}

/// Lexicon based scorer.
///
/// Every word found in the lexicon is scored. A preceding intensifier such as
/// `very` multiplies the score, a preceding negation flips the polarity at half
/// strength. The text's sentiment is the mean over all scored words.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternScorer;

impl SentimentScorer for PatternScorer {
    fn score(&self, txt: &str) -> Sentiment {
        let mut polarity = 0.0;
        let mut subjectivity = 0.0;
        let mut scored = 0usize;

        let mut negated = false;
        let mut intensity = 1.0;

        for word in text::words(txt).map(str::to_lowercase) {
            if lexicon::is_negation(&word) {
                negated = true;
                continue;
            }
            if let Some(i) = lexicon::intensity(&word) {
                intensity *= i;
                continue;
            }
            if let Some(entry) = lexicon::lookup(&word) {
                let mut p = entry.polarity * intensity;
                if negated {
                    p *= NEGATION_FACTOR;
                }
                polarity += p;
                subjectivity += (entry.subjectivity * intensity).min(1.0);
                scored += 1;
            }
            negated = false;
            intensity = 1.0;
        }

        if scored == 0 {
            return Sentiment::default();
        }

        Sentiment {
            polarity: (polarity / scored as f64).clamp(-1.0, 1.0),
            subjectivity: (subjectivity / scored as f64).clamp(0.0, 1.0),
        }
    }
}

/// The result of classifying a single text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Scores texts and assigns a [`SentimentLabel`].
#[derive(Debug, Clone, Default)]
pub struct Classifier<S: SentimentScorer = PatternScorer> {
    scorer: S,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SentimentScorer> Classifier<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn classify(&self, text: &str) -> Classification {
        let Sentiment {
            polarity,
            subjectivity,
        } = self.scorer.score(text);
        Classification {
            label: SentimentLabel::from_polarity(polarity),
            polarity,
            subjectivity,
        }
    }
}
