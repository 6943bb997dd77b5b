//! Prerender interception for axum services.
//!
//! Crawlers and link-preview bots cannot run client-side rendering. This
//! crate decides, per request, whether the caller is such a bot and, when it
//! is, answers with a server-rendered snapshot fetched from an external
//! rendering service. Everyone else reaches the normal handlers untouched.
//!
//! # Request Flow
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!  Client ────────▶│ hosting app / gateway                            │
//!                  │                                                  │
//!                  │  prerender middleware                            │
//!                  │    ├─ classify: bot? ───────no──▶ next handler   │
//!                  │    ├─ before_render hook (cache probe)           │
//!                  │    ├─ fetch rendering service (redirects kept)   │
//!                  │    │    └─ gzip decode                           │
//!                  │    ├─ after_render hook (detached task)          │
//!                  │    └─ relay status + headers + body verbatim     │
//!                  │                                                  │
//!                  │  on any fetch failure ──────────▶ next handler   │
//!                  └──────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! Embed [`prerender_middleware`] in an existing [`axum::Router`] via
//! [`axum::middleware::from_fn_with_state`], or run the gateway binary in
//! front of an application that cannot embed it.

// Decision pipeline
pub mod classify;
pub mod decode;
pub mod relay;
pub mod upstream;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;

// Standalone deployment
pub mod gateway;

pub use config::schema::{GatewayConfig, Settings};
pub use error::RelayError;
pub use relay::hooks::{HookError, NoopHooks, RenderHooks};
pub use relay::middleware::{prerender_middleware, PrerenderState};
pub use relay::response::RenderedResponse;
pub use relay::snapshot::RequestSnapshot;
