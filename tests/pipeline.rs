use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use stimmung::entities::Entity;
use stimmung::export;
use stimmung::{
    CapitalizedRecognizer, Config, HeadlineSource, Language, Passthrough, Pipeline,
    SentimentFilter, SentimentLabel, TranslationPolicy, Translator,
};

const HEADLINES: [&str; 5] = [
    "Great day for Rust developers",
    "Terrible storm hits the coast",
    "Committee meets on Tuesday",
    "Good results for Rust",
    "Markets crash again",
];

fn headlines() -> Vec<String> {
    HEADLINES.iter().map(|s| s.to_string()).collect()
}

/// Counts calls and tags the text with the target language.
#[derive(Default)]
struct Tagging {
    calls: AtomicUsize,
}

impl Translator for Tagging {
    fn translate<'a>(&'a self, text: &'a str, target: Language) -> BoxFuture<'a, anyhow::Result<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        futures::future::ok(format!("[{}] {}", target, text)).boxed()
    }
}

/// Fails for every text containing `needle`.
struct FailingOn(&'static str);

impl Translator for FailingOn {
    fn translate<'a>(&'a self, text: &'a str, _target: Language) -> BoxFuture<'a, anyhow::Result<String>> {
        if text.contains(self.0) {
            futures::future::err(anyhow!("service unavailable")).boxed()
        } else {
            futures::future::ok(text.to_uppercase()).boxed()
        }
    }
}

/// Never answers in time.
struct Slow;

impl Translator for Slow {
    fn translate<'a>(&'a self, text: &'a str, _target: Language) -> BoxFuture<'a, anyhow::Result<String>> {
        async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(text.to_string())
        }
        .boxed()
    }
}

/// Cancels the run once it translated `after` headlines.
struct CancelAfter {
    token: CancellationToken,
    after: usize,
    calls: AtomicUsize,
}

impl Translator for CancelAfter {
    fn translate<'a>(&'a self, text: &'a str, _target: Language) -> BoxFuture<'a, anyhow::Result<String>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.after {
            self.token.cancel();
        }
        futures::future::ok(text.to_string()).boxed()
    }
}

struct Unavailable;

impl HeadlineSource for Unavailable {
    fn fetch<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, anyhow::Result<Vec<String>>> {
        futures::future::err(anyhow!("connection refused")).boxed()
    }
}

#[tokio::test]
async fn unfiltered_run_keeps_order_and_counts() {
    let pipeline = Pipeline::new(Tagging::default());
    let config = Config::builder().target_language(Language::Spanish).build();
    let analysis = pipeline
        .run(headlines(), &config, &CancellationToken::new())
        .await;

    let kept: Vec<_> = analysis.records.iter().map(|r| r.headline.as_str()).collect();
    assert_eq!(kept, HEADLINES.to_vec());
    assert_eq!(analysis.counts.total(), analysis.records.len());
    assert_eq!(analysis.counts.get(SentimentLabel::Positive), 2);
    assert_eq!(analysis.counts.get(SentimentLabel::Neutral), 1);
    assert_eq!(analysis.counts.get(SentimentLabel::Negative), 2);

    assert_eq!(analysis.records[0].translated, "[es] Great day for Rust developers");
    assert_eq!(analysis.records[1].sentiment, SentimentLabel::Negative);
    assert_eq!(analysis.records[1].polarity, -1.0);
    assert_eq!(analysis.records[2].sentiment, SentimentLabel::Neutral);
    assert_eq!(analysis.keywords.get("rust"), 2);
    assert_eq!(analysis.keywords.get("storm"), 1);
    assert_eq!(analysis.keywords.get("the"), 0);
    assert!(analysis.entities.is_empty());
}

#[tokio::test]
async fn filter_restricts_everything() {
    let translator = Tagging::default();
    let pipeline = Pipeline::new(&translator);
    let config = Config::builder()
        .filter(SentimentFilter::only(SentimentLabel::Positive))
        .build();
    let analysis = pipeline
        .run(headlines(), &config, &CancellationToken::new())
        .await;

    assert_eq!(analysis.records.len(), 2);
    assert!(analysis
        .records
        .iter()
        .all(|r| r.sentiment == SentimentLabel::Positive));
    assert_eq!(analysis.records[0].headline, HEADLINES[0]);
    assert_eq!(analysis.records[1].headline, HEADLINES[3]);
    assert_eq!(analysis.counts.get(SentimentLabel::Positive), 2);
    assert_eq!(analysis.counts.get(SentimentLabel::Neutral), 0);
    assert_eq!(analysis.counts.get(SentimentLabel::Negative), 0);

    assert_eq!(translator.calls.load(Ordering::SeqCst), 2);
    assert_eq!(analysis.keywords.get("rust"), 2);
    assert_eq!(analysis.keywords.get("storm"), 0);
    assert_eq!(analysis.keywords.get("crash"), 0);
    assert_eq!(
        analysis.top_keywords(),
        vec![
            ("rust", 2),
            ("day", 1),
            ("developers", 1),
            ("good", 1),
            ("great", 1),
            ("results", 1)
        ]
    );
}

#[tokio::test]
async fn enabled_filter_without_label_keeps_all() {
    let config = Config::builder()
        .filter(SentimentFilter::new(true, None))
        .build();
    let analysis = Pipeline::new(Passthrough)
        .run(headlines(), &config, &CancellationToken::new())
        .await;
    assert_eq!(analysis.records.len(), HEADLINES.len());
}

#[tokio::test]
async fn failed_translation_passes_through() {
    let pipeline = Pipeline::new(FailingOn("storm"));
    let analysis = pipeline
        .run(headlines(), &Config::default(), &CancellationToken::new())
        .await;

    assert_eq!(analysis.records.len(), 5);
    assert_eq!(analysis.records[1].translated, HEADLINES[1]);
    assert_eq!(analysis.records[2].translated, "COMMITTEE MEETS ON TUESDAY");
    assert_eq!(analysis.counts.total(), 5);
}

#[tokio::test]
async fn failed_translation_skips() {
    let pipeline = Pipeline::new(FailingOn("storm"));
    let config = Config::builder()
        .translation_policy(TranslationPolicy::Skip)
        .build();
    let analysis = pipeline
        .run(headlines(), &config, &CancellationToken::new())
        .await;

    assert_eq!(analysis.records.len(), 4);
    assert!(analysis.records.iter().all(|r| r.headline != HEADLINES[1]));
    assert_eq!(analysis.counts.get(SentimentLabel::Negative), 1);
    assert_eq!(analysis.counts.total(), 4);
    assert_eq!(analysis.keywords.get("storm"), 0);
}

#[tokio::test]
async fn translation_timeout_applies_policy() {
    let config = Config::builder()
        .translation_timeout(Duration::from_millis(20))
        .build();
    let analysis = Pipeline::new(Slow)
        .run(vec!["Good news"], &config, &CancellationToken::new())
        .await;
    assert_eq!(analysis.records.len(), 1);
    assert_eq!(analysis.records[0].translated, "Good news");

    let config = Config::builder()
        .translation_timeout(Duration::from_millis(20))
        .translation_policy(TranslationPolicy::Skip)
        .build();
    let analysis = Pipeline::new(Slow)
        .run(vec!["Good news"], &config, &CancellationToken::new())
        .await;
    assert!(analysis.records.is_empty());
    assert_eq!(analysis.counts.total(), 0);
}

#[tokio::test]
async fn cancellation_between_headlines() {
    let token = CancellationToken::new();
    let translator = CancelAfter {
        token: token.clone(),
        after: 2,
        calls: AtomicUsize::new(0),
    };
    let analysis = Pipeline::new(translator)
        .run(headlines(), &Config::default(), &token)
        .await;

    assert!(analysis.cancelled);
    assert_eq!(analysis.records.len(), 2);
    assert_eq!(analysis.counts.total(), 2);
}

#[tokio::test]
async fn entities_only_when_enabled() {
    let pipeline = Pipeline::new(Passthrough).with_recognizer(CapitalizedRecognizer);
    let config = Config::builder()
        .filter(SentimentFilter::only(SentimentLabel::Negative))
        .recognize_entities(true)
        .build();
    let analysis = pipeline
        .run(
            vec!["Terrible floods in Pakistan", "Great win for NASA", "Markets crash"],
            &config,
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(analysis.records.len(), 2);
    assert_eq!(analysis.entities.len(), 2);
    assert_eq!(analysis.entities[0].record, 0);
    assert_eq!(
        analysis.entities[0].entities,
        vec![
            Entity::new("Terrible", Entity::PROPER_NOUN),
            Entity::new("Pakistan", Entity::PROPER_NOUN)
        ]
    );
    assert_eq!(analysis.entities[1].record, 1);
    assert_eq!(
        analysis.entities[1].entities,
        vec![Entity::new("Markets", Entity::PROPER_NOUN)]
    );

    let analysis = pipeline
        .run(vec!["Terrible floods in Pakistan"], &Config::default(), &CancellationToken::new())
        .await;
    assert!(analysis.entities.is_empty());
}

#[tokio::test]
async fn unavailable_source_is_empty_run() {
    let pipeline = Pipeline::new(Passthrough);
    let analysis = pipeline
        .analyze(&Unavailable, "Technology", &Config::default(), &CancellationToken::new())
        .await;

    assert_eq!(analysis.query.as_deref(), Some("Technology"));
    assert!(analysis.records.is_empty());
    assert_eq!(analysis.counts.total(), 0);
    assert!(analysis.keywords.is_empty());
    assert!(analysis
        .diagnostic
        .as_deref()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn static_source_analysis_exports() {
    let pipeline = Pipeline::new(Passthrough);
    let analysis = pipeline
        .analyze(&headlines(), "Rust", &Config::default(), &CancellationToken::new())
        .await;
    assert!(analysis.diagnostic.is_none());
    assert_eq!(analysis.records.len(), 5);

    let json = export::to_json(&analysis.records).unwrap();
    assert_eq!(export::from_json(&json).unwrap(), analysis.records);

    let csv = export::to_csv(&analysis.records).unwrap();
    assert_eq!(csv.lines().count(), 6);

    let report = export::render(&analysis);
    assert!(report.contains("Query: Rust"));
    assert!(report.contains("Sentiment Distribution"));
    assert!(report.contains("Top Keywords"));
    assert!(report.contains("Markets crash again"));
}
