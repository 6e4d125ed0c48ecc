use crate::extractors::RequestedHost;
use http::{HeaderMap, Uri, uri::Authority, uri::Scheme};

/// The full URL the client requested.
///
/// Request URIs usually only contain path and query, scheme and authority
/// are then filled in from the `Host` header. Without any known host this
/// returns `None`.
pub(crate) fn request_url(uri: &Uri, headers: &HeaderMap) -> Option<Uri> {
    if uri.authority().is_some() {
        return Some(uri.clone());
    }

    let host = RequestedHost::from_headers(headers)?;
    let authority: Authority = host.as_str().parse().ok()?;

    let mut parts = uri.clone().into_parts();
    parts.authority = Some(authority);
    parts.scheme = Some(Scheme::HTTP);

    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, header::HOST};
    use test_case::test_case;

    #[test]
    fn absolute_uri_is_kept() {
        let uri = Uri::from_static("http://example.com/x?y=1");
        assert_eq!(request_url(&uri, &HeaderMap::new()), Some(uri));
    }

    #[test_case("remix.run", "/docs", "http://remix.run/docs")]
    #[test_case("localhost:3000", "/a?b=c", "http://localhost:3000/a?b=c")]
    fn enriches_with_host_header(host: &'static str, uri: &'static str, expected: &str) {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static(host));

        let url = request_url(&Uri::from_static(uri), &headers).unwrap();
        assert_eq!(url.to_string(), expected);
    }

    #[test]
    fn invalid_host_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("bad/host"));
        assert!(request_url(&Uri::from_static("/x"), &headers).is_none());
    }

    #[test]
    fn missing_host_is_none() {
        assert!(request_url(&Uri::from_static("/x"), &HeaderMap::new()).is_none());
    }
}
