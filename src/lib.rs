pub use entities::{CapitalizedRecognizer, Entity, EntityRecognizer};
pub use error::StimmungError;
pub use export::Format;
pub use keywords::KeywordFrequency;
pub use language::Language;
pub use pipeline::{Analysis, Config, Pipeline, SentimentFilter};
pub use record::{AnalyzedRecord, SentimentCounts};
pub use sentiment::{Classification, Classifier, PatternScorer, SentimentLabel, SentimentScorer};
pub use source::{BingNews, HeadlineSource, SourceConfig};
pub use translate::{GoogleTranslator, Passthrough, TranslationPolicy, Translator};

pub mod entities;
mod error;
pub mod export;
pub mod keywords;
pub mod language;
pub mod lexicon;
pub mod pipeline;
pub mod record;
pub mod sentiment;
pub mod source;
pub mod stopwords;
pub mod text;
pub mod translate;
