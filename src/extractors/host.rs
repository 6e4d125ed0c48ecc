use http::{HeaderMap, HeaderValue, header::HOST};

/// The HTTP Host header of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestedHost(String);

impl RequestedHost {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare with the canonical hostname, ignoring ASCII case.
    pub(crate) fn is(&self, canonical_host: &str) -> bool {
        self.0.eq_ignore_ascii_case(canonical_host)
    }

    pub(crate) fn from_header_value(header: &HeaderValue) -> Option<Self> {
        header
            .to_str()
            .ok()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .map(|host| Self(host.to_string()))
    }

    pub(crate) fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers.get(HOST).and_then(Self::from_header_value)
    }
}

/// Is this request served on the production hostname?
///
/// Only the `Host` header is compared, including a possible port.
pub fn is_production_host(headers: &HeaderMap, canonical_host: &str) -> bool {
    RequestedHost::from_headers(headers).is_some_and(|host| host.is(canonical_host))
}
