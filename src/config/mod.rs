//! Configuration management.
//!
//! # Data Flow
//! ```text
//! env (PRERENDER_SERVICE_URL, PRERENDER_TOKEN)
//!     → Settings::from_env (library embedders build on this directly)
//!
//! config file (TOML)
//!     → loader.rs (parse & deserialize, semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → render section resolved into Settings for the relay layer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Explicit config fields win over environment variables

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{GatewayConfig, Settings, DEFAULT_SERVICE_URL};
