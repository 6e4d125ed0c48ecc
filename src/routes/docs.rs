use crate::{
    Config,
    cache::CachePolicy,
    error::{AxumNope, AxumResult},
};
use anyhow::anyhow;
use axum::{
    Extension,
    extract::Path,
    response::{Html, IntoResponse, Response as AxumResponse},
};
use serde::Deserialize;
use std::{
    io,
    path::{Path as FsPath, PathBuf},
    sync::Arc,
};
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
pub(crate) struct DocParams {
    lang: String,
    r#ref: String,
    path: Option<String>,
}

/// `/docs/{lang}/{ref}` and `/docs/{lang}/{ref}/{*path}`
pub(crate) async fn doc_page_handler(
    Extension(config): Extension<Arc<Config>>,
    Path(params): Path<DocParams>,
) -> AxumResult<AxumResponse> {
    serve_doc(
        &config.docs_root,
        &params.lang,
        &params.r#ref,
        params.path.as_deref(),
    )
    .await
}

/// `/docs` is the same page as the docs of the default language and ref.
pub(crate) async fn docs_index_handler(
    Extension(config): Extension<Arc<Config>>,
) -> AxumResult<AxumResponse> {
    serve_doc(
        &config.docs_root,
        &config.default_lang,
        &config.default_ref,
        None,
    )
    .await
}

#[instrument]
async fn serve_doc(
    docs_root: &FsPath,
    lang: &str,
    r#ref: &str,
    path: Option<&str>,
) -> AxumResult<AxumResponse> {
    let file = doc_file_path(docs_root, lang, r#ref, path)?;

    let content = match tokio::fs::read_to_string(&file).await {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(file = %file.display(), "document not found");
            return Err(AxumNope::ResourceNotFound);
        }
        Err(err) => return Err(err.into()),
    };

    Ok((Extension(CachePolicy::Doc), Html(content)).into_response())
}

/// `<docs_root>/<lang>/<ref>/<path>.html`, `index.html` without a path.
fn doc_file_path(
    docs_root: &FsPath,
    lang: &str,
    r#ref: &str,
    path: Option<&str>,
) -> AxumResult<PathBuf> {
    let mut segments = vec![lang, r#ref];
    if let Some(path) = path.filter(|path| !path.is_empty()) {
        segments.extend(path.split('/'));
    } else {
        segments.push("index");
    }

    if let Some(invalid) = segments
        .iter()
        .find(|segment| matches!(**segment, "" | "." | "..") || segment.contains('\\'))
    {
        return Err(AxumNope::BadRequest(anyhow!(
            "invalid path segment `{invalid}`"
        )));
    }

    let (last, dirs) = segments
        .split_last()
        .expect("there is always at least the lang and ref");

    let mut file = docs_root.to_path_buf();
    file.extend(dirs);
    file.push(format!("{last}.html"));

    Ok(file)
}
