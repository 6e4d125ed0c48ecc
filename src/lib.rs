//! Request handling for the documentation website: redirects configured in
//! a `_redirects` file, request normalization and response cache policies.

pub mod cache;
pub mod config;
mod env_vars;
mod error;
mod extractors;
pub mod logging;
pub mod normalize;
pub mod proxy_headers;
pub mod redirects;
pub mod routes;
#[cfg(test)]
mod testing;
pub mod web;

pub use self::config::{AppConfig, Config};
pub use self::extractors::is_production_host;
pub use self::redirects::{RedirectRule, RedirectTable, RedirectsError};
