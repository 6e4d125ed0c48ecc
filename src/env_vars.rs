use anyhow::{Context as _, Result, anyhow};
use std::{env::VarError, error::Error, str::FromStr};
use tracing::trace;

/// Read and parse an environment variable, falling back to `default` when it is unset.
pub fn env<T>(var: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    Ok(maybe_env(var)?.unwrap_or(default))
}

pub fn maybe_env<T>(var: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    match std::env::var(var) {
        Ok(value) => Ok(Some(
            value
                .parse::<T>()
                .with_context(|| format!("failed to parse configuration variable {var}"))?,
        )),
        Err(VarError::NotPresent) => {
            trace!("optional configuration variable {var} is not set");
            Ok(None)
        }
        Err(VarError::NotUnicode(_)) => Err(anyhow!("configuration variable {var} is not UTF-8")),
    }
}
