use std::time::Duration;

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::entities::{Entity, EntityRecognizer, NoEntities};
use crate::error::StimmungError;
use crate::keywords::{KeywordFrequency, DEFAULT_TOP_KEYWORDS};
use crate::language::Language;
use crate::record::{AnalyzedRecord, SentimentCounts};
use crate::sentiment::{Classifier, PatternScorer, SentimentLabel, SentimentScorer};
use crate::source::HeadlineSource;
use crate::translate::{TranslationPolicy, Translator};

/// Restricts a run to headlines of one sentiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentFilter {
    label: Option<SentimentLabel>,
}

impl SentimentFilter {
    /// Filter as selected in a form: a toggle plus an optional label.
    ///
    /// An enabled filter without a label filters nothing.
    pub fn new(enabled: bool, label: Option<SentimentLabel>) -> Self {
        match (enabled, label) {
            (true, None) => {
                warn!("Sentiment filter enabled without a sentiment, analyzing all headlines");
                Self::none()
            }
            (true, Some(label)) => Self::only(label),
            (false, _) => Self::none(),
        }
    }

    pub fn none() -> Self {
        Self { label: None }
    }

    pub fn only(label: SentimentLabel) -> Self {
        Self { label: Some(label) }
    }

    pub fn label(&self) -> Option<SentimentLabel> {
        self.label
    }

    pub fn accepts(&self, label: SentimentLabel) -> bool {
        self.label.map_or(true, |only| only == label)
    }
}

impl From<Option<SentimentLabel>> for SentimentFilter {
    fn from(label: Option<SentimentLabel>) -> Self {
        Self { label }
    }
}

/// Parameters of a single analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Language the headlines are translated into.
    target_language: Language,
    /// Which headlines are kept.
    filter: SentimentFilter,
    /// How failed translations are handled.
    translation_policy: TranslationPolicy,
    /// Timeout for a single translation.
    translation_timeout: Duration,
    /// Whether to run entity recognition on kept headlines.
    recognize_entities: bool,
    /// Number of keywords reported by [`Analysis::top_keywords`].
    top_keywords: usize,
}

impl Config {
    /// Default timeout for a single translation.
    pub const DEFAULT_TRANSLATION_TIMEOUT_SEC: u64 = 10;

    /// Convenience method to create a [`ConfigBuilder`]
    #[inline]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn target_language(&self) -> Language {
        self.target_language
    }

    pub fn filter(&self) -> SentimentFilter {
        self.filter
    }

    pub fn translation_policy(&self) -> TranslationPolicy {
        self.translation_policy
    }

    pub fn translation_timeout(&self) -> Duration {
        self.translation_timeout
    }

    pub fn recognize_entities(&self) -> bool {
        self.recognize_entities
    }

    pub fn top_keywords(&self) -> usize {
        self.top_keywords
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    target_language: Option<Language>,
    filter: Option<SentimentFilter>,
    translation_policy: Option<TranslationPolicy>,
    translation_timeout: Option<Duration>,
    recognize_entities: Option<bool>,
    top_keywords: Option<usize>,
}

impl ConfigBuilder {
    pub fn target_language(mut self, target_language: Language) -> Self {
        self.target_language = Some(target_language);
        self
    }

    pub fn filter<T: Into<SentimentFilter>>(mut self, filter: T) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn translation_policy(mut self, translation_policy: TranslationPolicy) -> Self {
        self.translation_policy = Some(translation_policy);
        self
    }

    pub fn translation_timeout(mut self, translation_timeout: Duration) -> Self {
        self.translation_timeout = Some(translation_timeout);
        self
    }

    pub fn recognize_entities(mut self, recognize_entities: bool) -> Self {
        self.recognize_entities = Some(recognize_entities);
        self
    }

    pub fn top_keywords(mut self, top_keywords: usize) -> Self {
        self.top_keywords = Some(top_keywords);
        self
    }

    pub fn build(self) -> Config {
        Config {
            target_language: self.target_language.unwrap_or_default(),
            filter: self.filter.unwrap_or_default(),
            translation_policy: self.translation_policy.unwrap_or_default(),
            translation_timeout: self.translation_timeout.unwrap_or_else(|| {
                Duration::from_secs(Config::DEFAULT_TRANSLATION_TIMEOUT_SEC)
            }),
            recognize_entities: self.recognize_entities.unwrap_or_default(),
            top_keywords: self.top_keywords.unwrap_or(DEFAULT_TOP_KEYWORDS),
        }
    }
}

/// Entities found in the record at `record`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineEntities {
    /// Index into [`Analysis::records`].
    pub record: usize,
    pub entities: Vec<Entity>,
}

/// The outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// The search query, if the headlines were fetched.
    pub query: Option<String>,
    /// Kept headlines, in source order.
    pub records: Vec<AnalyzedRecord>,
    pub counts: SentimentCounts,
    pub keywords: KeywordFrequency,
    pub entities: Vec<HeadlineEntities>,
    /// Why the run has no headlines, if the source failed.
    pub diagnostic: Option<String>,
    /// Whether the run stopped before all headlines were analyzed.
    pub cancelled: bool,
    pub finished_at: DateTime<Local>,
    #[serde(skip)]
    top_keywords: usize,
}

impl Analysis {
    fn new(config: &Config) -> Self {
        Self {
            query: None,
            records: Vec::new(),
            counts: SentimentCounts::default(),
            keywords: KeywordFrequency::new(),
            entities: Vec::new(),
            diagnostic: None,
            cancelled: false,
            finished_at: Local::now(),
            top_keywords: config.top_keywords,
        }
    }

    /// The most frequent keywords, as many as configured.
    pub fn top_keywords(&self) -> Vec<(&str, usize)> {
        self.keywords.top(self.top_keywords)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Classifies, filters, translates and aggregates headlines.
#[derive(Debug, Clone)]
pub struct Pipeline<T, S: SentimentScorer = PatternScorer, R = NoEntities> {
    classifier: Classifier<S>,
    translator: T,
    recognizer: R,
}

impl<T: Translator> Pipeline<T> {
    pub fn new(translator: T) -> Self {
        Self {
            classifier: Classifier::new(),
            translator,
            recognizer: NoEntities,
        }
    }
}

impl<T, S, R> Pipeline<T, S, R>
where
    T: Translator,
    S: SentimentScorer,
    R: EntityRecognizer,
{
    /// Replaces the sentiment scorer.
    pub fn with_scorer<S2: SentimentScorer>(self, scorer: S2) -> Pipeline<T, S2, R> {
        Pipeline {
            classifier: Classifier::with_scorer(scorer),
            translator: self.translator,
            recognizer: self.recognizer,
        }
    }

    /// Replaces the entity recognizer used when entity recognition is enabled.
    pub fn with_recognizer<R2: EntityRecognizer>(self, recognizer: R2) -> Pipeline<T, S, R2> {
        Pipeline {
            classifier: self.classifier,
            translator: self.translator,
            recognizer,
        }
    }

    pub fn classifier(&self) -> &Classifier<S> {
        &self.classifier
    }

    /// Fetches the headlines for `query` and analyzes them.
    ///
    /// A failing source results in an empty analysis with a diagnostic.
    pub async fn analyze<H: HeadlineSource + ?Sized>(
        &self,
        source: &H,
        query: &str,
        config: &Config,
        cancel: &CancellationToken,
    ) -> Analysis {
        let (headlines, diagnostic) = match source.fetch(query).await {
            Ok(headlines) => (headlines, None),
            Err(err) => {
                warn!("Headline source unavailable for {:?}: {:#}", query, err);
                (Vec::new(), Some(format!("Headline source unavailable: {:#}", err)))
            }
        };

        let mut analysis = self.run(headlines, config, cancel).await;
        analysis.query = Some(query.to_string());
        analysis.diagnostic = diagnostic;
        analysis
    }

    /// Analyzes `headlines` one after another, in order.
    ///
    /// Headlines rejected by the filter don't contribute to the counts,
    /// translations, keywords or entities.
    pub async fn run<I>(&self, headlines: I, config: &Config, cancel: &CancellationToken) -> Analysis
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut analysis = Analysis::new(config);
        let mut seen = 0usize;

        for headline in headlines {
            if cancel.is_cancelled() {
                info!("Analysis cancelled after {} headlines", seen);
                analysis.cancelled = true;
                break;
            }
            seen += 1;

            let headline = headline.as_ref();
            let classification = self.classifier.classify(headline);
            if !config.filter.accepts(classification.label) {
                debug!("{} headline filtered: {:?}", classification.label, headline);
                continue;
            }

            let translated = match self.translate(headline, config).await {
                Some(translated) => translated,
                None => continue,
            };

            analysis.counts.increment(classification.label);
            analysis.keywords.accumulate(headline);
            if config.recognize_entities {
                analysis.entities.push(HeadlineEntities {
                    record: analysis.records.len(),
                    entities: self.recognizer.recognize(headline),
                });
            }
            analysis
                .records
                .push(AnalyzedRecord::new(headline, translated, classification));
        }

        info!(
            "Analyzed {} headlines, kept {}",
            seen,
            analysis.records.len()
        );
        analysis.finished_at = Local::now();
        analysis
    }

    /// Translates `text`, applying the configured timeout and failure policy.
    ///
    /// `None` means the headline is dropped.
    async fn translate(&self, text: &str, config: &Config) -> Option<String> {
        let fut = self.translator.translate(text, config.target_language);
        let err = match tokio::time::timeout(config.translation_timeout, fut).await {
            Ok(Ok(translated)) => return Some(translated),
            Ok(Err(err)) => err,
            Err(_) => StimmungError::TranslationTimeout(config.translation_timeout).into(),
        };

        match config.translation_policy {
            TranslationPolicy::PassThrough => {
                warn!("Keeping untranslated headline {:?}: {:#}", text, err);
                Some(text.to_string())
            }
            TranslationPolicy::Skip => {
                warn!("Skipping untranslated headline {:?}: {:#}", text, err);
                None
            }
        }
    }
}
