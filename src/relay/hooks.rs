//! Caller-supplied extension points around the render fetch.

use async_trait::async_trait;

use crate::relay::response::RenderedResponse;
use crate::relay::snapshot::RequestSnapshot;

/// Boxed error for hook implementations backed by arbitrary stores.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Hooks invoked around the rendering-service fetch.
///
/// All methods have no-op defaults, so implementors override only what they
/// need. Implementations must be safe under concurrent invocation; one
/// instance is shared across all in-flight requests.
#[async_trait]
pub trait RenderHooks: Send + Sync {
    /// Cache probe before fetching. Returning `Ok(Some(..))` serves that
    /// response without contacting the rendering service. Errors are treated
    /// as a cache miss.
    async fn before_render(
        &self,
        request: &RequestSnapshot,
    ) -> Result<Option<RenderedResponse>, HookError> {
        let _ = request;
        Ok(None)
    }

    /// Observation of a fetched page, dispatched fire-and-forget after the
    /// fetch completes. Runs off the request's critical path; the response
    /// does not wait for it.
    async fn after_render(&self, request: &RequestSnapshot, rendered: &RenderedResponse) {
        let _ = (request, rendered);
    }

    /// Rewrite the reconstructed page URL before it is appended to the
    /// rendering-service endpoint.
    fn rewrite_url(&self, full_url: String) -> String {
        full_url
    }
}

/// The default hook set: no cache, no observation, no rewriting.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

#[async_trait]
impl RenderHooks for NoopHooks {}
