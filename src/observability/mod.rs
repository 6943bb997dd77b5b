//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay + gateway produce:
//!     → tracing events (structured, per-request context)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log output (stdout, filtered via RUST_LOG)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Log subscriber setup happens in the binary, not here; the library only
//!   emits events
//! - Metrics are cheap (atomic increments) so they run on every request

pub mod metrics;
