//! Error types for the relay pipeline.
//!
//! Every variant here is recoverable from the caller's point of view: the
//! middleware logs the error and falls back to normal request handling, so a
//! broken rendering service never takes the hosting application down with it.

use thiserror::Error;

/// Failures that can occur between deciding to intercept a request and
/// producing a rendered response for it.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The HTTP client could not be built or the fetch itself failed
    /// (connect error, timeout, closed connection mid-body).
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The concatenated rendering-service URL did not parse. Usually a
    /// misconfigured `service_url` or a hostile Host header.
    #[error("invalid upstream url {url:?}: {source}")]
    InvalidUpstreamUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The upstream said `Content-Encoding: gzip` but the body did not
    /// decompress.
    #[error("failed to decode gzip body: {0}")]
    Decode(#[source] std::io::Error),
}
