//! The outbound fetch against the rendering service.
//!
//! # Design Decisions
//! - Redirects are never followed: a 301 from the rendering service is
//!   itself the payload the crawler must see, Location header and all
//! - Identifying headers (token, forwarded user-agent, gzip opt-in) are
//!   attached only when a token is configured, matching what the hosted
//!   service expects from authenticated callers
//! - The whole body is buffered before decoding; pages are snapshot-sized
//!   and the decoder needs the complete gzip stream anyway

use axum::http::header::{HeaderName, ACCEPT_ENCODING, USER_AGENT};
use url::Url;

use crate::config::schema::Settings;
use crate::decode::decode_body;
use crate::error::RelayError;
use crate::relay::hooks::RenderHooks;
use crate::relay::response::RenderedResponse;
use crate::relay::snapshot::RequestSnapshot;
use crate::upstream::url::build_upstream_url;

/// Authentication header understood by the rendering service.
pub const X_PRERENDER_TOKEN: HeaderName = HeaderName::from_static("x-prerender-token");

/// Build the HTTP client used for all rendering-service fetches.
///
/// One client is shared for the process lifetime; it pools connections to
/// the service. A configured [`Settings::fetch_timeout`] bounds each fetch
/// end to end.
pub fn build_render_client(settings: &Settings) -> Result<reqwest::Client, RelayError> {
    let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
    if let Some(timeout) = settings.fetch_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Fetch the rendered page for `snapshot` and normalize it into a
/// [`RenderedResponse`].
///
/// Status and headers are preserved verbatim apart from the gzip framing
/// headers the decoder strips. Every failure maps to a [`RelayError`] so the
/// caller can fall back to normal handling.
pub async fn fetch_rendered(
    client: &reqwest::Client,
    settings: &Settings,
    hooks: &dyn RenderHooks,
    snapshot: &RequestSnapshot,
) -> Result<RenderedResponse, RelayError> {
    let target = build_upstream_url(snapshot, settings, hooks);
    let url = match Url::parse(&target) {
        Ok(url) => url,
        Err(source) => return Err(RelayError::InvalidUpstreamUrl { url: target, source }),
    };

    tracing::debug!(url = %url, "Fetching prerendered page");

    let mut request = client.get(url);
    if let Some(token) = &settings.token {
        request = request.header(X_PRERENDER_TOKEN, token.as_str());
        if let Some(user_agent) = snapshot.user_agent() {
            request = request.header(USER_AGENT, user_agent.clone());
        }
        request = request.header(ACCEPT_ENCODING, "gzip");
    }

    let response = request.send().await?;

    let status = response.status();
    let mut headers = response.headers().clone();
    let raw = response.bytes().await?;
    let body = decode_body(&mut headers, &raw)?;

    Ok(RenderedResponse {
        status,
        headers,
        body,
    })
}
