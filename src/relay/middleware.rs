//! The interception middleware itself.
//!
//! # Responsibilities
//! - Classify every request exactly once
//! - Probe the before-render hook, fetch on a miss
//! - Relay the rendered response, or hand the untouched request to the
//!   inner handler when interception cannot complete
//!
//! # Design Decisions
//! - The inbound request is never consumed before the fallback decision, so
//!   `next.run(req)` always sees it intact
//! - Hook failures downgrade: a broken `before_render` is a cache miss, a
//!   broken fetch is a passthrough; the client never sees a relay error
//! - `after_render` runs on a detached task; responding does not wait for it

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::classify;
use crate::config::schema::Settings;
use crate::error::RelayError;
use crate::observability::metrics;
use crate::relay::hooks::{NoopHooks, RenderHooks};
use crate::relay::snapshot::RequestSnapshot;
use crate::upstream::fetch::{build_render_client, fetch_rendered};

/// Shared state of the interception middleware: settings, hooks and the
/// pooled rendering-service client. Built once, shared via `Arc` across all
/// in-flight requests.
pub struct PrerenderState {
    settings: Settings,
    hooks: Arc<dyn RenderHooks>,
    client: reqwest::Client,
}

impl PrerenderState {
    /// State with the default no-op hooks.
    pub fn new(settings: Settings) -> Result<Self, RelayError> {
        Self::with_hooks(settings, Arc::new(NoopHooks))
    }

    /// State with caller-supplied hooks.
    pub fn with_hooks(settings: Settings, hooks: Arc<dyn RenderHooks>) -> Result<Self, RelayError> {
        let client = build_render_client(&settings)?;
        Ok(Self {
            settings,
            hooks,
            client,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Serve crawlers a prerendered snapshot; pass everyone else through.
///
/// Install with [`axum::middleware::from_fn_with_state`]:
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{middleware, routing::get, Router};
/// use prerender_proxy::{prerender_middleware, PrerenderState, Settings};
///
/// # fn main() -> Result<(), prerender_proxy::RelayError> {
/// let state = Arc::new(PrerenderState::new(Settings::from_env())?);
/// let app: Router = Router::new()
///     .route("/", get(|| async { "hello" }))
///     .layer(middleware::from_fn_with_state(state, prerender_middleware));
/// # Ok(())
/// # }
/// ```
pub async fn prerender_middleware(
    State(state): State<Arc<PrerenderState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !classify::should_intercept(&req) {
        metrics::record_skipped();
        return next.run(req).await;
    }

    let start = Instant::now();
    let snapshot = RequestSnapshot::capture(&req);
    tracing::debug!(
        method = %snapshot.method(),
        path = snapshot.path_and_query(),
        "Intercepting request for prerender"
    );

    match state.hooks.before_render(&snapshot).await {
        Ok(Some(cached)) => {
            tracing::debug!(status = %cached.status, "Serving prerender response from cache");
            metrics::record_intercepted("cached", start);
            return cached.into_response();
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "before_render hook failed; treating as cache miss");
        }
    }

    match fetch_rendered(&state.client, &state.settings, state.hooks.as_ref(), &snapshot).await {
        Ok(rendered) => {
            let hooks = Arc::clone(&state.hooks);
            let observed = rendered.clone();
            tokio::spawn(async move {
                hooks.after_render(&snapshot, &observed).await;
            });
            metrics::record_intercepted("served", start);
            rendered.into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Prerender fetch failed; falling back to normal handling");
            metrics::record_intercepted("fallback", start);
            next.run(req).await
        }
    }
}
