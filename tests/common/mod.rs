//! Shared utilities for integration testing.

// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::{middleware, Router};
use flate2::write::GzEncoder;
use flate2::Compression;
use tokio::net::TcpListener;

use prerender_proxy::{prerender_middleware, PrerenderState, Settings};

/// One request as seen by a [`RecordingServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// A canned HTTP server that records every request it answers. Stands in
/// for the rendering service and for origin applications.
pub struct RecordingServer {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingServer {
    pub fn new(
        status: StatusCode,
        headers: &[(&str, &str)],
        body: impl Into<Vec<u8>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            status,
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `server` on an ephemeral port for the rest of the test run.
pub async fn spawn_recording_server(server: Arc<RecordingServer>) -> SocketAddr {
    let app = Router::new()
        .fallback(record_and_reply)
        .with_state(server);
    spawn_router(app).await
}

async fn record_and_reply(
    State(server): State<Arc<RecordingServer>>,
    req: Request<Body>,
) -> Response {
    let (parts, body) = req.into_parts();
    let body = axum::body::to_bytes(body, 1024 * 1024).await.unwrap();
    server.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method,
        uri: parts.uri.to_string(),
        headers: parts.headers,
        body: body.to_vec(),
    });

    let mut response = Response::new(Body::from(server.body.clone()));
    *response.status_mut() = server.status;
    for (name, value) in &server.headers {
        response.headers_mut().append(
            HeaderName::try_from(name.as_str()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    response
}

/// A hosting application with the prerender middleware installed: one
/// static-asset route plus a catch-all answering every method with "ok".
pub async fn spawn_app(state: Arc<PrerenderState>) -> SocketAddr {
    let app = Router::new()
        .route("/foo.css", get(|| async { "body { color: pink; }" }))
        .fallback(|| async { "ok" })
        .layer(middleware::from_fn_with_state(state, prerender_middleware));
    spawn_router(app).await
}

/// Bind an ephemeral port and serve `app` on it in the background.
pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Relay settings pointing at a rendering-service mock. Built literally so
/// ambient `PRERENDER_*` variables cannot leak into tests.
pub fn render_settings(addr: SocketAddr) -> Settings {
    Settings {
        service_url: format!("http://{addr}/"),
        token: None,
        protocol: None,
        fetch_timeout: None,
    }
}

/// An address nothing is listening on.
pub fn dead_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Client that relays redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

pub fn gzip(input: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(input).unwrap();
    encoder.finish().unwrap()
}
