use anyhow::{Context as _, Result};
use tracing_subscriber::{EnvFilter, filter::Directive, prelude::*};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured default filter.
pub fn init(default_filter: &str) -> Result<()> {
    let directive: Directive = default_filter
        .parse()
        .with_context(|| format!("invalid log filter {default_filter}"))?;

    let filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("could not install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_filter() {
        assert!(init("docs_site=notalevel").is_err());
    }
}
