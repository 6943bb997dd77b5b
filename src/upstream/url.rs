//! Rendering-service URL construction.
//!
//! The rendering service takes the page to render as its path: the outbound
//! URL is the service endpoint with the original absolute page URL appended
//! verbatim. No re-encoding happens here; whatever percent-encoding the
//! client sent is what the rendering service sees.

use crate::config::schema::Settings;
use crate::relay::hooks::RenderHooks;
use crate::relay::snapshot::RequestSnapshot;

/// Scheme assumed when neither the request nor the settings reveal one.
const DEFAULT_SCHEME: &str = "http";

/// Build the URL the rendering service is fetched at:
/// `<service_url>/<scheme>://<host><path?query>`.
///
/// The service endpoint is normalized to exactly one trailing slash. A
/// configured `protocol` override beats the scheme visible on the request.
pub fn build_upstream_url(
    snapshot: &RequestSnapshot,
    settings: &Settings,
    hooks: &dyn RenderHooks,
) -> String {
    let mut service_url = settings.service_url.clone();
    if !service_url.ends_with('/') {
        service_url.push('/');
    }

    let scheme = settings
        .protocol
        .as_deref()
        .filter(|protocol| !protocol.is_empty())
        .or_else(|| snapshot.scheme())
        .unwrap_or(DEFAULT_SCHEME);

    let host = snapshot.host().unwrap_or_default();
    let full_url = format!("{scheme}://{host}{}", snapshot.path_and_query());
    let full_url = hooks.rewrite_url(full_url);

    format!("{service_url}{full_url}")
}
