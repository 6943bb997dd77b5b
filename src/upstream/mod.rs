//! Everything that talks to the rendering service: URL composition and the
//! redirect-inhibited fetch.

pub mod fetch;
pub mod url;

pub use fetch::{build_render_client, fetch_rendered, X_PRERENDER_TOKEN};
pub use url::build_upstream_url;
