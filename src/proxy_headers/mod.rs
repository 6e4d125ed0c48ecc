mod forwarded_proto;

pub use forwarded_proto::{X_FORWARDED_PROTO, XForwardedProto};

use http::HeaderName;

/// X-Robots-Tag header for search engines.
pub static X_ROBOTS_TAG: HeaderName = HeaderName::from_static("x-robots-tag");
