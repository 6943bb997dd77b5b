//! The relay pipeline: classify, probe the cache, fetch, respond or fall
//! back.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → middleware.rs (classify; snapshot metadata)
//!     → hooks.rs      (before_render cache probe)
//!     → upstream::fetch + decode (on cache miss)
//!     → response.rs   (relayed verbatim to the client)
//!     → hooks.rs      (after_render, detached)
//!
//! on any failure: next.run(original request), as if never intercepted
//! ```

pub mod hooks;
pub mod middleware;
pub mod response;
pub mod snapshot;

pub use hooks::{HookError, NoopHooks, RenderHooks};
pub use middleware::{prerender_middleware, PrerenderState};
pub use response::RenderedResponse;
pub use snapshot::RequestSnapshot;
