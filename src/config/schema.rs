//! Configuration schema definitions.
//!
//! Two layers live here:
//! - [`Settings`]: the library-level relay options, built programmatically by
//!   whoever embeds the middleware. Mirrors what the rendering service needs
//!   to know, nothing else.
//! - [`GatewayConfig`]: the TOML-backed configuration of the standalone
//!   gateway binary, which wraps the middleware around a plain
//!   forward-to-origin proxy.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fallback rendering-service endpoint when neither configuration nor the
/// `PRERENDER_SERVICE_URL` environment variable name one.
pub const DEFAULT_SERVICE_URL: &str = "http://service.prerender.io/";

/// Relay options for [`PrerenderState`](crate::PrerenderState).
///
/// Constructed once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the rendering service.
    pub service_url: String,

    /// Secret sent as `X-Prerender-Token` on upstream fetches. When unset,
    /// no identifying headers are attached at all.
    pub token: Option<String>,

    /// Forces the scheme used when reconstructing the page URL, e.g.
    /// `"https"` behind a TLS-terminating load balancer that does not set
    /// `x-forwarded-proto`.
    pub protocol: Option<String>,

    /// Upper bound on one upstream fetch. `None` leaves the fetch unbounded
    /// and relies on the hosting server's own request timeout.
    pub fetch_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Settings {
    /// Settings seeded from `PRERENDER_SERVICE_URL` and `PRERENDER_TOKEN`,
    /// falling back to the public service endpoint. An empty token variable
    /// counts as unset.
    pub fn from_env() -> Self {
        Self {
            service_url: env::var("PRERENDER_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string()),
            token: env::var("PRERENDER_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
            protocol: None,
            fetch_timeout: None,
        }
    }

    /// Override the rendering-service base URL.
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    /// Set the service token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Force the scheme of reconstructed page URLs.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Bound the upstream fetch.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }
}

/// Root configuration for the gateway binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// The origin application requests are forwarded to when not
    /// intercepted.
    pub origin: OriginConfig,

    /// Rendering-service options; unset fields fall back to the
    /// environment.
    pub render: RenderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Total per-request timeout in seconds, covering the prerender fetch.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Origin application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Base URL of the origin (e.g., "http://127.0.0.1:8080").
    pub url: String,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

/// Rendering-service configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// Rendering-service base URL; falls back to `PRERENDER_SERVICE_URL`.
    pub service_url: Option<String>,

    /// Service token; falls back to `PRERENDER_TOKEN`.
    pub token: Option<String>,

    /// Scheme override for reconstructed page URLs.
    pub protocol: Option<String>,

    /// Upstream fetch timeout in seconds; unset means unbounded.
    pub fetch_timeout_secs: Option<u64>,
}

impl RenderConfig {
    /// Resolve into relay [`Settings`], with explicit fields taking
    /// precedence over the environment.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::from_env();
        if let Some(url) = &self.service_url {
            settings = settings.service_url(url.clone());
        }
        if let Some(token) = &self.token {
            settings = settings.token(token.clone());
        }
        if let Some(protocol) = &self.protocol {
            settings = settings.protocol(protocol.clone());
        }
        if let Some(secs) = self.fetch_timeout_secs {
            settings = settings.fetch_timeout(Duration::from_secs(secs));
        }
        settings
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.listener.request_timeout_secs, 30);
        assert_eq!(config.origin.url, "http://127.0.0.1:8080");
        assert!(config.render.service_url.is_none());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn partial_toml_fills_the_rest() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [origin]
            url = "http://10.0.0.5:4000"

            [render]
            service_url = "http://render.internal:3030/"
            token = "MY_TOKEN"
            fetch_timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.origin.url, "http://10.0.0.5:4000");
        let settings = config.render.to_settings();
        assert_eq!(settings.service_url, "http://render.internal:3030/");
        assert_eq!(settings.token.as_deref(), Some("MY_TOKEN"));
        assert_eq!(settings.fetch_timeout, Some(Duration::from_secs(10)));
        assert!(settings.protocol.is_none());
    }

    #[test]
    fn settings_builders_override_fields() {
        let settings = Settings::from_env()
            .service_url("http://localhost:3030")
            .token("tok")
            .protocol("https");
        assert_eq!(settings.service_url, "http://localhost:3030");
        assert_eq!(settings.token.as_deref(), Some("tok"));
        assert_eq!(settings.protocol.as_deref(), Some("https"));
    }
}
