//! Static redirects, configured in a plain text `_redirects` file.
//!
//! Every line is one rule:
//!
//! ```text
//! # comment
//! /old-path /new-path 301
//! /another-old-path /another-new-path
//! ```
//!
//! Fields are separated by whitespace, the status code is optional and
//! defaults to `302`. Blank lines and lines starting with `#` are ignored.
//! Paths are matched exactly, the first matching rule wins.

use crate::normalize::Processing;
use http::{HeaderValue, StatusCode};
use std::{
    fmt, io,
    path::{Path, PathBuf},
};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

const DEFAULT_STATUS: StatusCode = StatusCode::FOUND;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub from_path: String,
    pub to_location: String,
    pub status: StatusCode,
}

impl RedirectRule {
    pub fn new(
        from_path: impl Into<String>,
        to_location: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            from_path: from_path.into(),
            to_location: to_location.into(),
            status,
        }
    }

    fn processing(&self) -> Processing {
        Processing::Redirect {
            location: self.to_location.clone(),
            status: self.status,
        }
    }
}

impl fmt::Display for RedirectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.from_path,
            self.to_location,
            self.status.as_u16()
        )
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRule {
    #[error("expected `<from> <to> [code]`, found {0} field(s)")]
    MissingFields(usize),
    #[error("status code `{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` is not a valid HTTP status code")]
    InvalidStatus(String),
    #[error("`{0}` can't be used as a redirect location")]
    InvalidLocation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RedirectsError {
    #[error("could not read redirect rules from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid redirect rule on line {line}")]
    Parse {
        line: usize,
        #[source]
        reason: InvalidRule,
    },
}

/// Parse a single non-empty, non-comment line.
fn parse_rule(line: &str) -> Result<RedirectRule, InvalidRule> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let (from, to, code) = match fields.as_slice() {
        [from, to] => (*from, *to, None),
        // anything after the status code is ignored
        [from, to, code, ..] => (*from, *to, Some(*code)),
        _ => return Err(InvalidRule::MissingFields(fields.len())),
    };

    let status = match code {
        None => DEFAULT_STATUS,
        Some(code) => {
            let code: u16 = code
                .parse()
                .map_err(|_| InvalidRule::NotANumber(code.to_string()))?;
            StatusCode::from_u16(code).map_err(|_| InvalidRule::InvalidStatus(code.to_string()))?
        }
    };

    if HeaderValue::from_str(to).is_err() {
        return Err(InvalidRule::InvalidLocation(to.to_string()));
    }

    Ok(RedirectRule::new(from, to, status))
}

/// Parse the content of a redirects file into rules, keeping file order.
///
/// Fails on the first malformed line.
pub fn parse_rules(content: &str) -> Result<Vec<RedirectRule>, RedirectsError> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, content)| {
            parse_rule(content).map_err(|reason| RedirectsError::Parse { line, reason })
        })
        .collect()
}

/// First rule with exactly this `from_path`.
pub fn find_redirect<'a>(rules: &'a [RedirectRule], path: &str) -> Option<&'a RedirectRule> {
    rules.iter().find(|rule| rule.from_path == path)
}

#[instrument]
pub async fn load_rules(path: &Path) -> Result<Vec<RedirectRule>, RedirectsError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RedirectsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let rules = parse_rules(&content)?;
    info!(path = %path.display(), count = rules.len(), "loaded redirect rules");

    Ok(rules)
}

/// The redirect rules of the site.
///
/// The file is read on first use and kept for the lifetime of the table.
/// Concurrent first uses wait for a single load. A failed load is not
/// cached, the next use tries again.
#[derive(Debug)]
pub struct RedirectTable {
    path: PathBuf,
    rules: OnceCell<Vec<RedirectRule>>,
}

impl RedirectTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rules: OnceCell::new(),
        }
    }

    /// Table with already known rules, it will never touch the file system.
    pub fn from_rules(rules: Vec<RedirectRule>) -> Self {
        Self {
            path: PathBuf::new(),
            rules: OnceCell::new_with(Some(rules)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.rules.initialized()
    }

    pub async fn rules(&self) -> Result<&[RedirectRule], RedirectsError> {
        self.rules
            .get_or_try_init(|| load_rules(&self.path))
            .await
            .map(Vec::as_slice)
    }

    /// Redirect for the given request path, or `Processing::Continue`.
    ///
    /// `path` is the path only, a query string is never part of the match.
    pub async fn check(&self, path: &str) -> Result<Processing, RedirectsError> {
        let rules = self.rules().await?;

        Ok(match find_redirect(rules, path) {
            Some(rule) => {
                debug!(%rule, "matched redirect rule");
                rule.processing()
            }
            None => Processing::Continue,
        })
    }
}
