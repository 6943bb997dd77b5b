//! Immutable copy of the request metadata the relay needs.
//!
//! The inbound request body must survive untouched for the fallback path, so
//! the relay never consumes the request itself. It works off this snapshot
//! instead: method, URI and headers, cloned once at interception time.

use axum::body::Body;
use axum::http::header::{HOST, USER_AGENT};
use axum::http::{HeaderMap, HeaderValue, Method, Request, Uri};

/// Header set by reverse proxies to carry the original scheme. Multi-hop
/// chains append values comma-separated; the first entry is the client-facing
/// one.
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// Read-only view of one intercepted request.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl RequestSnapshot {
    /// Capture the metadata of `req` without touching its body.
    pub fn capture(req: &Request<Body>) -> Self {
        Self {
            method: req.method().clone(),
            uri: req.uri().clone(),
            headers: req.headers().clone(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The path plus query exactly as the client sent it.
    pub fn path_and_query(&self) -> &str {
        self.uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    }

    /// Host the client addressed: the Host header for HTTP/1, the URI
    /// authority for HTTP/2 requests that omit it.
    pub fn host(&self) -> Option<&str> {
        self.headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| self.uri.authority().map(|authority| authority.as_str()))
    }

    /// Scheme the client used, as far as it is visible here: an absolute-form
    /// URI wins, then the first `x-forwarded-proto` entry.
    pub fn scheme(&self) -> Option<&str> {
        self.uri.scheme_str().or_else(|| {
            self.headers
                .get(FORWARDED_PROTO_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(str::trim)
                .filter(|scheme| !scheme.is_empty())
        })
    }

    pub fn user_agent(&self) -> Option<&HeaderValue> {
        self.headers.get(USER_AGENT)
    }
}
