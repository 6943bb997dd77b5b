//! Standalone gateway: the interception middleware wrapped around a plain
//! forward-to-origin proxy.
//!
//! # Responsibilities
//! - Create the Axum router with the prerender middleware installed
//! - Forward non-intercepted requests to the configured origin
//! - Wire up middleware (timeout, tracing)
//! - Serve with graceful shutdown
//!
//! Deployed in front of an application that cannot embed the middleware
//! itself. Crawler traffic is answered from the rendering service; all other
//! traffic is proxied to the origin unchanged.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{middleware, Router};
use bytes::Bytes;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::GatewayConfig;
use crate::error::RelayError;
use crate::relay::middleware::{prerender_middleware, PrerenderState};
use crate::relay::snapshot::FORWARDED_PROTO_HEADER;

/// Largest request body the gateway will buffer for forwarding.
const MAX_FORWARD_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Errors that prevent the gateway from starting.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to initialize relay: {0}")]
    Relay(#[from] RelayError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// State injected into the forwarding handler.
#[derive(Clone)]
struct GatewayState {
    client: reqwest::Client,
    /// Origin base URL without a trailing slash.
    origin_base: String,
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &GatewayConfig) -> Result<Router, RelayError> {
    let prerender = Arc::new(PrerenderState::new(config.render.to_settings())?);

    // The origin leg must relay redirects, not chase them.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let state = GatewayState {
        client,
        origin_base: config.origin.url.trim_end_matches('/').to_string(),
    };

    Ok(Router::new()
        .route("/{*path}", any(forward_to_origin))
        .route("/", any(forward_to_origin))
        .with_state(state)
        .layer(middleware::from_fn_with_state(prerender, prerender_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.listener.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http()))
}

/// Run the gateway on `listener` until Ctrl+C.
pub async fn run(config: GatewayConfig, listener: TcpListener) -> Result<(), GatewayError> {
    let router = build_router(&config)?;
    let addr = listener.local_addr()?;

    tracing::info!(
        address = %addr,
        origin = %config.origin.url,
        "Gateway starting"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

/// Forward a request to the origin and relay its response verbatim.
async fn forward_to_origin(
    State(state): State<GatewayState>,
    request: Request<Body>,
) -> Response {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("{}{}", state.origin_base, path_and_query);

    tracing::debug!(method = %parts.method, target = %target, "Forwarding to origin");

    let body_bytes: Bytes = match axum::body::to_bytes(body, MAX_FORWARD_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "Refusing to buffer request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    // Hop-by-hop headers stop here; everything else is forwarded as-is,
    // Host included.
    let mut headers = parts.headers;
    headers.remove(header::CONNECTION);
    headers.remove(header::TRANSFER_ENCODING);
    if !headers.contains_key(FORWARDED_PROTO_HEADER) {
        headers.insert(FORWARDED_PROTO_HEADER, HeaderValue::from_static("http"));
    }

    let upstream = state
        .client
        .request(parts.method, &target)
        .headers(headers)
        .body(body_bytes)
        .send()
        .await;

    match upstream {
        Ok(response) => {
            let response: axum::http::Response<reqwest::Body> = response.into();
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(err) => {
            tracing::error!(error = %err, origin = %state.origin_base, "Origin request failed");
            (StatusCode::BAD_GATEWAY, "Origin request failed").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
