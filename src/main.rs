use std::path::PathBuf;
use std::time::Duration;

use log::info;
use structopt::StructOpt;
use tokio_util::sync::CancellationToken;

use stimmung::export::{self, Format};
use stimmung::{
    Analysis, BingNews, CapitalizedRecognizer, Classifier, Config, GoogleTranslator,
    Language, Passthrough, Pipeline, SentimentFilter, SentimentLabel, SourceConfig,
    TranslationPolicy, Translator,
};

#[allow(missing_docs)]
#[derive(Debug, StructOpt)]
#[structopt(name = "stimmung", about = "News headline sentiment and keyword analysis.")]
enum App {
    #[structopt(name = "analyze", about = "Search news headlines and analyze their sentiment.")]
    Analyze {
        #[structopt(name = "query", help = "What to search the news for.")]
        query: String,
        #[structopt(flatten)]
        opts: Opts,
    },
    #[structopt(name = "classify", about = "Classify the sentiment of texts.")]
    Classify {
        #[structopt(name = "texts", required = true, help = "The texts to classify.")]
        texts: Vec<String>,
    },
}

impl App {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            App::Analyze { query, opts } => {
                let analysis = if opts.no_translate {
                    opts.analyze(Passthrough, &query).await?
                } else {
                    opts.analyze(opts.translator()?, &query).await?
                };
                Self::write(opts.output, export::export(&analysis, opts.format)?).await
            }
            App::Classify { texts } => {
                let classifier = Classifier::new();
                for text in texts {
                    let c = classifier.classify(&text);
                    println!(
                        "{}\t{:.3}\t{:.3}\t{}",
                        c.label, c.polarity, c.subjectivity, text
                    );
                }
                Ok(())
            }
        }
    }

    /// Writes the exported analysis.
    ///
    /// If a output file is configured, then the analysis will be stored there,
    /// otherwise to std::out.
    async fn write(out: Option<PathBuf>, content: String) -> anyhow::Result<()> {
        if let Some(out) = out {
            tokio::fs::write(out, content).await?;
        } else {
            println!("{}", content);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, StructOpt)]
pub struct Opts {
    #[structopt(
        long = "lang",
        short = "l",
        default_value = "en",
        help = "Translate headlines to: en, es, fr or ur."
    )]
    lang: Language,
    #[structopt(
        long = "filter",
        short = "f",
        help = "Only keep headlines of this sentiment: positive, neutral or negative."
    )]
    filter: Option<SentimentLabel>,
    #[structopt(long = "entities", help = "Show named entities.")]
    entities: bool,
    #[structopt(long = "no-translate", help = "Keep headlines in their original language.")]
    no_translate: bool,
    #[structopt(
        long = "skip-untranslated",
        help = "Drop headlines that fail to translate instead of keeping the original."
    )]
    skip_untranslated: bool,
    #[structopt(long = "top", help = "Number of top keywords.")]
    top: Option<usize>,
    #[structopt(
        long = "timeout",
        help = "Timeout in seconds for each request and translation."
    )]
    timeout: Option<u64>,
    #[structopt(long = "user-agent", help = "The user-agent used for requests.")]
    user_agent: Option<String>,
    #[structopt(
        long = "format",
        default_value = "table",
        help = "Output format: table, json or csv."
    )]
    format: Format,
    #[structopt(
        long = "output",
        short = "o",
        help = "The file to store the output in.",
        parse(from_os_str)
    )]
    output: Option<PathBuf>,
}

impl Opts {
    fn as_config(&self) -> Config {
        let mut config = Config::builder()
            .target_language(self.lang)
            .filter(SentimentFilter::new(self.filter.is_some(), self.filter))
            .recognize_entities(self.entities);
        if self.skip_untranslated {
            config = config.translation_policy(TranslationPolicy::Skip);
        }
        if let Some(top) = self.top {
            config = config.top_keywords(top);
        }
        if let Some(timeout) = self.timeout {
            config = config.translation_timeout(Duration::from_secs(timeout));
        }
        config.build()
    }

    fn as_source_config(&self) -> SourceConfig {
        let mut config = SourceConfig::builder();
        if let Some(timeout) = self.timeout {
            config = config.request_timeout(Duration::from_secs(timeout));
        }
        if let Some(user_agent) = self.user_agent.clone() {
            config = config.browser_user_agent(user_agent);
        }
        config.build()
    }

    fn translator(&self) -> anyhow::Result<GoogleTranslator> {
        let timeout = self
            .timeout
            .unwrap_or(GoogleTranslator::DEFAULT_REQ_TIMEOUT_SEC);
        GoogleTranslator::with_timeout(Duration::from_secs(timeout))
    }

    async fn analyze<T: Translator>(&self, translator: T, query: &str) -> anyhow::Result<Analysis> {
        let source = BingNews::with_config(self.as_source_config())?;
        let pipeline = Pipeline::new(translator).with_recognizer(CapitalizedRecognizer);

        let cancel = CancellationToken::new();
        let on_ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, finishing current headline");
                on_ctrl_c.cancel();
            }
        });

        Ok(pipeline
            .analyze(&source, query, &self.as_config(), &cancel)
            .await)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    App::from_args().run().await
}
