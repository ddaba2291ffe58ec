use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::StimmungError;
use crate::language::Language;

/// Translates text into a target language, detecting the source language.
pub trait Translator {
    fn translate<'a>(&'a self, text: &'a str, target: Language) -> BoxFuture<'a, Result<String>>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate<'a>(&'a self, text: &'a str, target: Language) -> BoxFuture<'a, Result<String>> {
        (**self).translate(text, target)
    }
}

/// Returns every text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Translator for Passthrough {
    fn translate<'a>(&'a self, text: &'a str, _target: Language) -> BoxFuture<'a, Result<String>> {
        futures::future::ok(text.to_string()).boxed()
    }
}

/// What happens to a headline whose translation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationPolicy {
    /// Keep the headline, with the original text as its translation.
    PassThrough,
    /// Drop the headline from the run.
    Skip,
}

impl Default for TranslationPolicy {
    fn default() -> Self {
        TranslationPolicy::PassThrough
    }
}

/// Client for the public Google translate endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl GoogleTranslator {
    pub const ENDPOINT: &'static str = "https://translate.googleapis.com/translate_a/single";

    /// Default timeout for a single translation request.
    pub const DEFAULT_REQ_TIMEOUT_SEC: u64 = 10;

    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(Self::DEFAULT_REQ_TIMEOUT_SEC))
    }

    /// Uses the public endpoint with `timeout` for every request.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(Self::ENDPOINT)?;
        Self::with_endpoint(endpoint, timeout)
    }

    pub fn with_endpoint(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build http client.")?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The request url translating `text` into `target`.
    pub fn request_url(&self, text: &str, target: Language) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", "auto")
            .append_pair("tl", target.identifier())
            .append_pair("dt", "t")
            .append_pair("q", text);
        url
    }

    async fn request(&self, text: &str, target: Language) -> Result<String> {
        let resp = self
            .client
            .get(self.request_url(text, target))
            .send()
            .await
            .map_err(StimmungError::from)?;

        if !resp.status().is_success() {
            return Err(StimmungError::NoHttpSuccess {
                status: resp.status(),
            })
            .context(format!("Translation into {} failed", target.full_name()));
        }

        let body: Value = resp.json().await.map_err(StimmungError::from)?;
        Ok(parse_translation(&body)?)
    }
}

impl Translator for GoogleTranslator {
    fn translate<'a>(&'a self, text: &'a str, target: Language) -> BoxFuture<'a, Result<String>> {
        self.request(text, target).boxed()
    }
}

/// Joins the translated segments of a `translate_a/single` response.
///
/// The body looks like `[[["Hola ","Hello ",..],["mundo","world",..]],null,"en",..]`.
pub fn parse_translation(body: &Value) -> Result<String, StimmungError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| StimmungError::TranslationFailure {
            reason: "response contains no segments".to_string(),
        })?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(StimmungError::TranslationFailure {
            reason: "response contains no translated text".to_string(),
        });
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_segments() {
        let body = json!([
            [["Hola ", "Hello ", null, null, 10], ["mundo", "world", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "Hola mundo");
    }

    #[test]
    fn rejects_malformed() {
        assert!(parse_translation(&json!({"error": "quota"})).is_err());
        assert!(parse_translation(&json!([[]])).is_err());
        assert!(parse_translation(&json!(null)).is_err());
    }

    #[test]
    fn request_url() {
        let translator = GoogleTranslator::new().unwrap();
        let url = translator.request_url("Good news", Language::Urdu);
        assert_eq!(
            url.as_str(),
            "https://translate.googleapis.com/translate_a/single?client=gtx&sl=auto&tl=ur&dt=t&q=Good+news"
        );
    }

    #[test]
    fn request_timeout() {
        let translator = GoogleTranslator::new().unwrap();
        assert_eq!(translator.timeout(), Duration::from_secs(10));
        let translator = GoogleTranslator::with_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(translator.timeout(), Duration::from_secs(3));
        assert!(translator
            .request_url("x", Language::English)
            .as_str()
            .starts_with(GoogleTranslator::ENDPOINT));
    }

    #[tokio::test]
    async fn passthrough() {
        let text = Passthrough.translate("unchanged", Language::French).await.unwrap();
        assert_eq!(text, "unchanged");
    }
}
