use headers::{Error, Header};
use http::{HeaderName, HeaderValue, uri::Scheme};

pub static X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

const SEP: u8 = b',';

/// Typed X-Forwarded-Proto header, set by the proxy in front of us
/// to the scheme the client used.
///
/// Every proxy in a chain appends its incoming scheme, so the leftmost entry
/// of the first header line is what the client spoke. Later entries only
/// describe hops between proxies.
#[derive(Clone, Debug)]
pub struct XForwardedProto(Scheme);

impl XForwardedProto {
    pub fn proto(&self) -> &Scheme {
        &self.0
    }

    /// The client talked plain HTTP to the proxy.
    pub fn is_insecure(&self) -> bool {
        self.0 == Scheme::HTTP
    }
}

impl Header for XForwardedProto {
    fn name() -> &'static HeaderName {
        &X_FORWARDED_PROTO
    }

    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let Some(value) = values.next() else {
            return Err(Error::invalid());
        };

        let value = value
            .as_bytes()
            .split(|ch| *ch == SEP)
            .next()
            .unwrap_or_default()
            .trim_ascii();
        if value.is_empty() {
            return Err(Error::invalid());
        }

        let proto: Scheme = value.try_into().map_err(|_| Error::invalid())?;

        Ok(Self(proto))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        values.extend(HeaderValue::from_str(self.0.as_str()));
    }
}
