mod docs;

use crate::{
    Config,
    cache::{CachePolicy, cache_middleware},
    error::AxumNope,
    extractors::is_production_host,
    normalize::{ensure_secure, remove_trailing_slashes, require_post},
    proxy_headers::X_ROBOTS_TAG,
    redirects::RedirectTable,
};
use axum::{
    Extension, Router as AxumRouter,
    extract::Request as AxumHttpRequest,
    handler::Handler as AxumHandler,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response as AxumResponse},
    routing::{MethodRouter, any, get},
};
use http::{HeaderValue, StatusCode};
use std::{convert::Infallible, sync::Arc};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::debug;

pub fn build_axum_app(config: Arc<Config>, redirects: Arc<RedirectTable>) -> AxumRouter {
    let request_timeout = config.request_timeout;

    AxumRouter::new()
        .route(
            "/",
            get(|| async { (Extension(CachePolicy::Default), Redirect::to("/docs")) }),
        )
        .route("/docs", get(docs::docs_index_handler))
        .route("/docs/{lang}/{ref}", get(docs::doc_page_handler))
        .route("/docs/{lang}/{ref}/{*path}", get(docs::doc_page_handler))
        .fallback(fallback)
        .layer(middleware::from_fn(normalize_request_middleware))
        .layer(middleware::from_fn(cache_middleware))
        .layer(middleware::from_fn(robots_middleware))
        .layer(Extension(config))
        .layer(Extension(redirects))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

/// Route for form actions, only accepting `POST`.
///
/// Any other method is answered with an empty `405 Method Not Allowed`.
pub fn post_action<H, T, S>(handler: H) -> MethodRouter<S, Infallible>
where
    H: AxumHandler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    any(handler).route_layer(middleware::from_fn(require_post_middleware))
}

async fn require_post_middleware(request: AxumHttpRequest, next: Next) -> AxumResponse {
    match require_post(request.method()).into_early_response() {
        Some(response) => response,
        None => next.run(request).await,
    }
}

/// Redirects that happen before routing: `https` upgrade, trailing
/// slashes, then the configured redirect rules.
async fn normalize_request_middleware(
    Extension(redirects): Extension<Arc<RedirectTable>>,
    request: AxumHttpRequest,
    next: Next,
) -> AxumResponse {
    if let Some(mut response) = ensure_secure(request.uri(), request.headers()).into_early_response()
    {
        // the redirect depends on x-forwarded-proto, shared caches must not
        // replay it to https clients.
        response.extensions_mut().insert(CachePolicy::NoCaching);
        debug!(uri = %request.uri(), "upgrading to https");
        return response;
    }

    let mut processing = remove_trailing_slashes(request.uri());

    if processing.is_continue() {
        processing = match redirects.check(request.uri().path()).await {
            Ok(processing) => processing,
            Err(err) => return AxumNope::InternalError(err.into()).into_response(),
        };
    }

    match processing.into_early_response() {
        Some(response) => {
            debug!(uri = %request.uri(), status = %response.status(), "early response");
            response
        }
        None => next.run(request).await,
    }
}

/// Keep search engines away from anything but the production host.
async fn robots_middleware(
    Extension(config): Extension<Arc<Config>>,
    request: AxumHttpRequest,
    next: Next,
) -> AxumResponse {
    let production = is_production_host(request.headers(), &config.canonical_host);

    let mut response = next.run(request).await;
    if !production {
        response.headers_mut().insert(
            &X_ROBOTS_TAG,
            HeaderValue::from_static("noindex, nofollow"),
        );
    }

    response
}

async fn fallback() -> impl IntoResponse {
    AxumNope::ResourceNotFound
}
