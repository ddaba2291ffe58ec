use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::sentiment::{Classification, SentimentLabel};

/// A headline that made it into the result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    #[serde(rename = "Headline")]
    pub headline: String,
    #[serde(rename = "Translated")]
    pub translated: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: SentimentLabel,
    #[serde(rename = "Polarity")]
    pub polarity: f64,
    #[serde(rename = "Subjectivity")]
    pub subjectivity: f64,
}

impl AnalyzedRecord {
    pub fn new<T: ToString>(headline: T, translated: String, classification: Classification) -> Self {
        Self {
            headline: headline.to_string(),
            translated,
            sentiment: classification.label,
            polarity: classification.polarity,
            subjectivity: classification.subjectivity,
        }
    }
}

/// Number of records per sentiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn increment(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Counts in `Positive`, `Neutral`, `Negative` order.
    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, usize)> + '_ {
        SentimentLabel::ALL.iter().map(move |label| (*label, self.get(*label)))
    }
}

impl Serialize for SentimentCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label.as_str(), &count)?;
        }
        map.end()
    }
}
