//! Request classification: which requests get a prerendered page.
//!
//! # Responsibilities
//! - Recognize crawler user-agents (case-insensitive substring match)
//! - Recognize the `_escaped_fragment_` AJAX-crawling query marker
//! - Recognize the `X-Bufferbot` header
//! - Veto interception for static-resource paths (`.css`, `.png`, ...)
//!
//! # Design Decisions
//! - Pure: reads request metadata only, no I/O, no shared state
//! - Only GET requests qualify; everything else passes straight through
//! - The resource-extension veto overrides every positive signal, so a bot
//!   asking for `/app.css` always reaches the normal static handler
//! - Extension matching is a case-sensitive suffix test on the path;
//!   `/logo.JPG` is intentionally not vetoed (matches the historical
//!   behavior this list was lifted from)

mod signatures;

pub use signatures::{CRAWLER_SIGNATURES, IGNORED_EXTENSIONS};

use axum::body::Body;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, Request};

/// Header set by Buffer's link-expanding bot, which carries no crawler
/// marker in its user-agent.
pub const BUFFERBOT_HEADER: &str = "x-bufferbot";

/// Returns true if `req` should be answered with a prerendered snapshot
/// instead of reaching the normal handler.
pub fn should_intercept(req: &Request<Body>) -> bool {
    let user_agent = match req.headers().get(USER_AGENT).and_then(|ua| ua.to_str().ok()) {
        Some(ua) => ua,
        None => return false,
    };

    if !req.method().as_str().eq_ignore_ascii_case("GET") {
        return false;
    }

    let wants_rendered = has_escaped_fragment(req.uri().query().unwrap_or(""))
        || is_crawler_user_agent(user_agent)
        || has_bufferbot_marker(req.headers());

    // Resource files are never intercepted, even for a known bot.
    if is_ignored_resource(req.uri().path()) {
        return false;
    }

    wants_rendered
}

/// True if the query string carries a `_escaped_fragment_` key, with or
/// without a value.
fn has_escaped_fragment(query: &str) -> bool {
    url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "_escaped_fragment_")
}

/// True if the user-agent contains any known crawler signature.
fn is_crawler_user_agent(user_agent: &str) -> bool {
    let lowered = user_agent.to_ascii_lowercase();
    CRAWLER_SIGNATURES.iter().any(|sig| lowered.contains(sig))
}

/// True if the Bufferbot marker header is present with a non-empty value.
fn has_bufferbot_marker(headers: &HeaderMap) -> bool {
    headers
        .get(BUFFERBOT_HEADER)
        .map(|value| !value.as_bytes().is_empty())
        .unwrap_or(false)
}

/// True if the path ends in a static-resource extension.
fn is_ignored_resource(path: &str) -> bool {
    IGNORED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::default()).unwrap()
    }

    #[test]
    fn missing_user_agent_is_not_intercepted() {
        let req = request("GET", "/foo", &[]);
        assert!(!should_intercept(&req));
    }

    #[test]
    fn non_get_is_not_intercepted() {
        let req = request("POST", "/foo?bar=true", &[("user-agent", "baiduspider")]);
        assert!(!should_intercept(&req));

        let req = request("HEAD", "/foo", &[("user-agent", "googlebot")]);
        assert!(!should_intercept(&req));
    }

    #[test]
    fn ordinary_browser_is_not_intercepted() {
        let req = request(
            "GET",
            "/foo",
            &[("user-agent", "Mozilla/5.0 (X11; Linux x86_64) Firefox/119.0")],
        );
        assert!(!should_intercept(&req));
    }

    #[test]
    fn crawler_user_agent_is_intercepted() {
        let req = request("GET", "/foo?bar=true", &[("user-agent", "baiduspider")]);
        assert!(should_intercept(&req));
    }

    #[test]
    fn crawler_match_is_case_insensitive_substring() {
        let req = request(
            "GET",
            "/",
            &[("user-agent", "Mozilla/5.0 (compatible; Googlebot/2.1)")],
        );
        assert!(should_intercept(&req));

        let req = request("GET", "/", &[("user-agent", "W3C_Validator/1.3")]);
        assert!(should_intercept(&req));
    }

    #[test]
    fn escaped_fragment_is_intercepted_even_for_unknown_agent() {
        let req = request(
            "GET",
            "/?_escaped_fragment_=",
            &[("user-agent", "Not a known bot")],
        );
        assert!(should_intercept(&req));

        // Key without '=' counts too.
        let req = request(
            "GET",
            "/path?_escaped_fragment_",
            &[("user-agent", "Not a known bot")],
        );
        assert!(should_intercept(&req));
    }

    #[test]
    fn escaped_fragment_must_be_a_key_not_a_substring() {
        let req = request(
            "GET",
            "/?foo=_escaped_fragment_",
            &[("user-agent", "Not a known bot")],
        );
        assert!(!should_intercept(&req));
    }

    #[test]
    fn bufferbot_header_is_intercepted() {
        let req = request(
            "GET",
            "/foo",
            &[("user-agent", "Mozilla/5.0"), ("x-bufferbot", "1")],
        );
        assert!(should_intercept(&req));
    }

    #[test]
    fn empty_bufferbot_header_is_ignored() {
        let req = request(
            "GET",
            "/foo",
            &[("user-agent", "Mozilla/5.0"), ("x-bufferbot", "")],
        );
        assert!(!should_intercept(&req));
    }

    #[test]
    fn resource_extension_overrides_crawler_match() {
        let req = request("GET", "/foo.css", &[("user-agent", "baiduspider")]);
        assert!(!should_intercept(&req));

        let req = request(
            "GET",
            "/assets/app.js?_escaped_fragment_=",
            &[("user-agent", "googlebot")],
        );
        assert!(!should_intercept(&req));
    }

    #[test]
    fn extension_match_is_a_suffix_test_on_the_path() {
        // Extension in the middle of the path does not veto.
        let req = request("GET", "/foo.css/page", &[("user-agent", "baiduspider")]);
        assert!(should_intercept(&req));

        // Extension in the query string does not veto either.
        let req = request(
            "GET",
            "/download?file=movie.mp4",
            &[("user-agent", "baiduspider")],
        );
        assert!(should_intercept(&req));
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let req = request("GET", "/logo.JPG", &[("user-agent", "baiduspider")]);
        assert!(should_intercept(&req));
    }
}
