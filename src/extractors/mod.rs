mod host;
mod original_uri;

pub(crate) use host::RequestedHost;
pub use host::is_production_host;
pub(crate) use original_uri::request_url;
