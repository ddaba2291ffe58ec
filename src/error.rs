use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

/// All different error types this crate uses.
#[derive(Error, Debug)]
pub enum StimmungError {
    /// Received a non success Http response.
    #[error("Expected a 2xx Success but got: {status}")]
    NoHttpSuccess {
        /// Status of the response.
        status: StatusCode,
    },
    /// Failed to get a response.
    #[error("Request failed: {error}")]
    HttpRequestFailure {
        /// The reqwest error.
        #[from]
        error: reqwest::Error,
    },
    /// Failed to read a document.
    #[error("Failed to read document")]
    ReadDocument {
        /// The content that resulted in the error.
        body: Bytes,
    },
    /// The translation service does not support this target.
    #[error("Unsupported language `{0}`, expected one of en, es, fr, ur")]
    UnsupportedLanguage(String),
    /// Not one of `Positive`, `Neutral`, `Negative`.
    #[error("Unknown sentiment `{0}`")]
    UnknownSentiment(String),
    /// Not one of the export formats.
    #[error("Unknown format `{0}`, expected one of table, json, csv")]
    UnknownFormat(String),
    /// The translation service answered, but not with a translation.
    #[error("Translation failed: {reason}")]
    TranslationFailure {
        /// What went wrong.
        reason: String,
    },
    /// The translation service did not answer in time.
    #[error("Translation timed out after {0:?}")]
    TranslationTimeout(std::time::Duration),
}
