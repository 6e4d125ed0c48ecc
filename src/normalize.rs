//! Checks that run before routing.
//!
//! Each check looks at the request and either lets it pass or decides the
//! response on its own. The application applies them in order and answers
//! with the first decision.

use crate::{extractors::request_url, proxy_headers::XForwardedProto};
use axum::response::{IntoResponse as _, Response as AxumResponse};
use headers::HeaderMapExt as _;
use http::{
    HeaderMap, HeaderValue, Method, StatusCode, Uri,
    header::LOCATION,
    uri::{PathAndQuery, Scheme},
};
use tracing::{debug, error};

/// Outcome of a request check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processing {
    /// continue with normal routing.
    Continue,
    /// answer with a redirect.
    Redirect {
        location: String,
        status: StatusCode,
    },
    /// answer with this status and an empty body.
    Reject { status: StatusCode },
}

impl Processing {
    pub fn is_continue(&self) -> bool {
        matches!(self, Processing::Continue)
    }

    /// The response ending the request early, `None` when the request
    /// should continue.
    pub fn into_early_response(self) -> Option<AxumResponse> {
        match self {
            Processing::Continue => None,
            Processing::Redirect { location, status } => {
                Some(match HeaderValue::from_str(&location) {
                    Ok(location) => (status, [(LOCATION, location)]).into_response(),
                    Err(err) => {
                        error!(location, ?err, "invalid redirect location");
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    }
                })
            }
            Processing::Reject { status } => Some(status.into_response()),
        }
    }
}

/// Redirect `/some/path/?query` to `/some/path?query`.
///
/// The root path is left alone. Leading slashes and backslashes collapse
/// into a single `/`, browsers would treat `//host` and `/\host` as a
/// different site.
pub fn remove_trailing_slashes(uri: &Uri) -> Processing {
    let path = uri.path();

    let Some(stripped) = path.strip_suffix('/').filter(|_| path != "/") else {
        return Processing::Continue;
    };
    let stripped = stripped.trim_start_matches(['/', '\\']);

    let location = match uri.query().filter(|query| !query.is_empty()) {
        Some(query) => format!("/{stripped}?{query}"),
        None => format!("/{stripped}"),
    };

    Processing::Redirect {
        location,
        status: StatusCode::PERMANENT_REDIRECT,
    }
}

/// Redirect to the `https` version of the URL when the proxy tells us the
/// client used plain `http`.
pub fn ensure_secure(uri: &Uri, headers: &HeaderMap) -> Processing {
    let Some(proto) = headers.typed_get::<XForwardedProto>() else {
        return Processing::Continue;
    };
    if !proto.is_insecure() {
        return Processing::Continue;
    }

    let Some(url) = request_url(uri, headers) else {
        debug!(%uri, "insecure request without host, can't build secure url");
        return Processing::Continue;
    };

    let mut parts = url.into_parts();
    parts.scheme = Some(Scheme::HTTPS);
    parts
        .path_and_query
        .get_or_insert_with(|| PathAndQuery::from_static("/"));

    match Uri::from_parts(parts) {
        Ok(secure) => Processing::Redirect {
            location: secure.to_string(),
            status: StatusCode::FOUND,
        },
        Err(err) => {
            debug!(%uri, ?err, "could not build secure url");
            Processing::Continue
        }
    }
}

/// Only let `POST` requests through, everything else is answered with
/// `405 Method Not Allowed`.
pub fn require_post(method: &Method) -> Processing {
    if method.as_str().eq_ignore_ascii_case(Method::POST.as_str()) {
        Processing::Continue
    } else {
        Processing::Reject {
            status: StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// The path to redirect to after an action, given untrusted input like a
/// `returnTo` query parameter.
///
/// Only site-local paths are accepted. Anything else, especially
/// protocol-relative URLs like `//evil.com` or `/\evil.com`, falls back
/// to `/`.
pub fn safe_redirect_target(to: Option<&str>) -> &str {
    match to {
        Some(to)
            if to.starts_with('/')
                && !to.starts_with("//")
                && !to.starts_with("/\\")
                && HeaderValue::from_str(to).is_ok() =>
        {
            to
        }
        _ => "/",
    }
}

/// Redirect to a sanitized site-local target, see [`safe_redirect_target`].
///
/// Uses `302 Found` unless another status is given.
pub fn safe_redirect(to: Option<&str>, status: Option<StatusCode>) -> Processing {
    Processing::Redirect {
        location: safe_redirect_target(to).to_string(),
        status: status.unwrap_or(StatusCode::FOUND),
    }
}
