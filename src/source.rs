use std::time::Duration;

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use log::debug;
use reqwest::Client;
use select::document::Document;
use select::predicate::{Class, Name, Predicate};
use url::Url;

use crate::error::StimmungError;

/// Supplies the raw headlines for a search query, in the order they appear.
pub trait HeadlineSource {
    fn fetch<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>>>;
}

/// Fixed list of headlines, returned for every query.
impl HeadlineSource for Vec<String> {
    fn fetch<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
        futures::future::ok(self.clone()).boxed()
    }
}

/// Extracts the text of all headline title anchors, in document order.
pub fn extract_headlines(doc: &Document) -> Vec<String> {
    doc.find(Name("a").and(Class("title")))
        .map(|node| node.text())
        .collect()
}

/// Headlines scraped from the Bing News search page.
#[derive(Debug, Clone)]
pub struct BingNews {
    /// The [`reqwest::Client`] that drives requests.
    client: Client,
    config: SourceConfig,
}

impl BingNews {
    pub fn new() -> Result<Self> {
        Self::with_config(SourceConfig::default())
    }

    pub fn with_config(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.browser_user_agent.clone())
            .build()
            .context("Failed to build http client.")?;
        Ok(Self { client, config })
    }

    /// The search url for `query`.
    pub fn search_url(&self, query: &str) -> Url {
        let mut url = self.config.search_url.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }

    /// Downloads the raw search page for `url`.
    pub(crate) async fn get_page(&self, url: Url) -> Result<Bytes> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(StimmungError::from)?;

        if self.config.http_success_only && !resp.status().is_success() {
            let msg = format!("Unsuccessful request to {:?}", resp.url());
            return Err(StimmungError::NoHttpSuccess {
                status: resp.status(),
            })
            .context(msg);
        }

        Ok(resp.bytes().await.map_err(StimmungError::from)?)
    }
}

/// Parses a downloaded page and extracts its headlines.
pub fn parse_headlines(body: Bytes) -> Result<Vec<String>> {
    match Document::from_read(&*body) {
        Ok(doc) => Ok(extract_headlines(&doc)),
        Err(_) => {
            Err(StimmungError::ReadDocument { body }).context("Failed to read html as document.")
        }
    }
}

impl HeadlineSource for BingNews {
    fn fetch<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
        async move {
            let url = self.search_url(query);
            debug!("requesting {}", url);
            let headlines = parse_headlines(self.get_page(url).await?)?;
            debug!("found {} headlines for {:?}", headlines.len(), query);
            Ok(headlines)
        }
        .boxed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// The search endpoint, the query is appended as `q`.
    search_url: Url,
    /// The user-agent used for requests.
    browser_user_agent: String,
    /// Timeout for requests.
    request_timeout: Duration,
    /// Whether to accept only 2XX responses.
    http_success_only: bool,
}

impl SourceConfig {
    /// Default timeout for search requests.
    pub const DEFAULT_REQ_TIMEOUT_SEC: u64 = 7;

    pub const DEFAULT_SEARCH_URL: &'static str = "https://www.bing.com/news/search";

    /// Default user agent for `stimmung`.
    #[inline]
    pub(crate) fn user_agent() -> String {
        format!("stimmung/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Convenience method to create a [`SourceConfigBuilder`]
    #[inline]
    pub fn builder() -> SourceConfigBuilder {
        SourceConfigBuilder::default()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::builder().build()
    }
}

#[derive(Debug, Default)]
pub struct SourceConfigBuilder {
    search_url: Option<Url>,
    browser_user_agent: Option<String>,
    request_timeout: Option<Duration>,
    http_success_only: Option<bool>,
}

impl SourceConfigBuilder {
    pub fn search_url(mut self, search_url: Url) -> Self {
        self.search_url = Some(search_url);
        self
    }

    pub fn browser_user_agent<T: ToString>(mut self, browser_user_agent: T) -> Self {
        self.browser_user_agent = Some(browser_user_agent.to_string());
        self
    }

    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    pub fn http_success_only(mut self, http_success_only: bool) -> Self {
        self.http_success_only = Some(http_success_only);
        self
    }

    pub fn build(self) -> SourceConfig {
        SourceConfig {
            search_url: self.search_url.unwrap_or_else(|| {
                Url::parse(SourceConfig::DEFAULT_SEARCH_URL).expect("valid default search url")
            }),
            browser_user_agent: self
                .browser_user_agent
                .unwrap_or_else(SourceConfig::user_agent),
            request_timeout: self
                .request_timeout
                .unwrap_or_else(|| Duration::from_secs(SourceConfig::DEFAULT_REQ_TIMEOUT_SEC)),
            http_success_only: self.http_success_only.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="news-card">
            <a class="title" href="/a">Rust 2.0 released</a>
            <a class="source" href="/s">Example Times</a>
          </div>
          <div class="news-card">
            <a class="title big" href="/b">Markets <b>crash</b> again</a>
          </div>
          <span class="title">Not an anchor</span>
        </body></html>
    "#;

    #[test]
    fn extracts_title_anchors_in_order() {
        let doc = Document::from(PAGE);
        assert_eq!(
            extract_headlines(&doc),
            vec!["Rust 2.0 released", "Markets crash again"]
        );
    }

    #[test]
    fn parse_downloaded_page() {
        let headlines = parse_headlines(Bytes::from_static(PAGE.as_bytes())).unwrap();
        assert_eq!(headlines.len(), 2);
    }

    #[test]
    fn no_titles() {
        let doc = Document::from("<html><body><p>nothing</p></body></html>");
        assert!(extract_headlines(&doc).is_empty());
    }

    #[test]
    fn search_url_encodes_query() {
        let source = BingNews::new().unwrap();
        assert_eq!(
            source.search_url("rust & c++").as_str(),
            "https://www.bing.com/news/search?q=rust+%26+c%2B%2B"
        );
    }

    #[test]
    fn default_config() {
        let config = SourceConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(7));
        assert!(config.http_success_only);
        assert!(config.browser_user_agent.starts_with("stimmung/"));
    }

    #[tokio::test]
    async fn static_source() {
        let source = vec!["one".to_string(), "two".to_string()];
        assert_eq!(source.fetch("ignored").await.unwrap(), vec!["one", "two"]);
    }
}
