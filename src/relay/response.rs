//! The rendered page as relayed back to the client.

use axum::body::Body;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

/// A fully rendered page: status, headers and decoded text body.
///
/// Produced either by fetching the rendering service or by a
/// [`RenderHooks::before_render`](crate::RenderHooks::before_render) cache
/// hit. Relayed to the client verbatim, duplicate headers included.
#[derive(Debug, Clone)]
pub struct RenderedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RenderedResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

impl IntoResponse for RenderedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
