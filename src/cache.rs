use axum::{extract::Request as AxumHttpRequest, middleware::Next, response::Response as AxumResponse};
use http::{HeaderValue, header::CACHE_CONTROL};

/// Keep responses for 5 minutes in the browser and CDN, so the
/// back button is fast.
pub const CACHE_CONTROL_DEFAULT: &str = "max-age=300";

/// Documents are kept for 5 minutes, the CDN may additionally serve
/// stale content for a week while it revalidates in the background.
/// Pages stay fast, and fixes still show up quickly.
pub const CACHE_CONTROL_DOC: &str = "max-age=300, stale-while-revalidate=604800";

/// Caching policy of a response.
///
/// Handlers add it as a response extension, `cache_middleware` renders it
/// into the `Cache-Control` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// no caching at all, used for errors.
    NoCaching,
    /// short browser and CDN caching.
    Default,
    /// short caching with a long stale-while-revalidate window.
    Doc,
}

impl CachePolicy {
    pub fn render(&self) -> HeaderValue {
        match self {
            CachePolicy::NoCaching => HeaderValue::from_static("no-cache, max-age=0"),
            CachePolicy::Default => HeaderValue::from_static(CACHE_CONTROL_DEFAULT),
            CachePolicy::Doc => HeaderValue::from_static(CACHE_CONTROL_DOC),
        }
    }
}

pub(crate) async fn cache_middleware(req: AxumHttpRequest, next: Next) -> AxumResponse {
    let mut response = next.run(req).await;

    let policy = response
        .extensions()
        .get::<CachePolicy>()
        .copied()
        .unwrap_or_else(|| {
            if response.status().is_success() || response.status().is_redirection() {
                CachePolicy::Default
            } else {
                CachePolicy::NoCaching
            }
        });

    let headers = response.headers_mut();
    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, policy.render());
    }

    response
}
