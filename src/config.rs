use crate::env_vars::{env, maybe_env};
use anyhow::{Context as _, Result};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

pub const DEFAULT_CANONICAL_HOST: &str = "remix.run";

pub trait AppConfig: Sized {
    fn from_environment() -> Result<Self>;

    #[cfg(test)]
    fn test_config() -> Result<Self>;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub socket_addr: SocketAddr,

    /// plain text redirect rules, one `from to [code]` rule per line.
    pub redirects_path: PathBuf,

    /// directory holding the rendered documents, laid out as
    /// `<lang>/<ref>/<path>.html`.
    pub docs_root: PathBuf,

    /// the only host that is allowed to be indexed by search engines.
    pub canonical_host: String,

    pub default_lang: String,
    pub default_ref: String,

    pub request_timeout: Duration,

    pub log_filter: String,
}

impl AppConfig for Config {
    fn from_environment() -> Result<Self> {
        let install_root = install_root()?;

        Ok(Self {
            socket_addr: env("DOCS_SITE_SOCKET_ADDR", "0.0.0.0:3000".parse()?)?,
            redirects_path: env("DOCS_SITE_REDIRECTS_PATH", install_root.join("_redirects"))?,
            docs_root: env("DOCS_SITE_DOCS_ROOT", install_root.join("docs"))?,
            canonical_host: env(
                "DOCS_SITE_CANONICAL_HOST",
                DEFAULT_CANONICAL_HOST.to_string(),
            )?,
            default_lang: env("DOCS_SITE_DEFAULT_LANG", "en".to_string())?,
            default_ref: env("DOCS_SITE_DEFAULT_REF", "main".to_string())?,
            request_timeout: Duration::from_secs(env("DOCS_SITE_REQUEST_TIMEOUT", 30u64)?),
            log_filter: maybe_env("DOCS_SITE_LOG")?.unwrap_or_else(|| "info".to_string()),
        })
    }

    #[cfg(test)]
    fn test_config() -> Result<Self> {
        let mut config = Self::from_environment()?;

        // tests provide their own files, never pick up a real deployment.
        config.redirects_path = PathBuf::from("/nonexistent/_redirects");
        config.docs_root = PathBuf::from("/nonexistent/docs");
        config.canonical_host = DEFAULT_CANONICAL_HOST.to_string();
        config.default_lang = "en".to_string();
        config.default_ref = "main".to_string();

        Ok(config)
    }
}

/// The directory the application is installed into.
///
/// The binary lives in `<root>/bin/`, next to it are the `_redirects` file
/// and the `docs` directory.
fn install_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("could not find current executable")?;

    Ok(exe
        .parent()
        .and_then(|bin_dir| bin_dir.parent())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| PathBuf::from(".")))
}
