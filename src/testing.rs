use crate::{
    Config,
    cache::CachePolicy,
    config::AppConfig as _,
    redirects::{RedirectRule, RedirectTable},
    routes::build_axum_app,
};
use anyhow::Result;
use axum::{
    Router as AxumRouter,
    body::Body,
    response::Response as AxumResponse,
};
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt as _;
use std::{path::Path, sync::Arc};
use tower::ServiceExt as _;

pub(crate) trait AxumResponseTestExt {
    async fn text(self) -> Result<String>;
    fn redirect_target(&self) -> Option<&str>;
    fn assert_cache_control(&self, policy: CachePolicy);
}

impl AxumResponseTestExt for AxumResponse {
    async fn text(self) -> Result<String> {
        let body = self.into_body().collect().await?.to_bytes();
        Ok(String::from_utf8(body.to_vec())?)
    }

    fn redirect_target(&self) -> Option<&str> {
        self.headers().get(header::LOCATION)?.to_str().ok()
    }

    fn assert_cache_control(&self, policy: CachePolicy) {
        assert_eq!(
            self.headers()
                .get(header::CACHE_CONTROL)
                .expect("missing cache-control header"),
            policy.render(),
        );
    }
}

pub(crate) trait AxumRouterTestExt {
    async fn request_with(
        &self,
        method: Method,
        path: &str,
        f: impl FnOnce(&mut HeaderMap),
    ) -> Result<AxumResponse>;

    async fn get_with_headers(
        &self,
        path: &str,
        f: impl FnOnce(&mut HeaderMap),
    ) -> Result<AxumResponse> {
        self.request_with(Method::GET, path, f).await
    }

    async fn get(&self, path: &str) -> Result<AxumResponse> {
        self.request_with(Method::GET, path, |_| {}).await
    }

    async fn post(&self, path: &str) -> Result<AxumResponse> {
        self.request_with(Method::POST, path, |_| {}).await
    }

    async fn assert_redirect(
        &self,
        path: &str,
        expected_target: &str,
        expected_status: StatusCode,
    ) -> Result<AxumResponse> {
        let response = self.get(path).await?;
        assert_eq!(response.status(), expected_status, "status for {path}");
        assert_eq!(
            response.redirect_target(),
            Some(expected_target),
            "redirect target for {path}"
        );
        Ok(response)
    }
}

impl AxumRouterTestExt for AxumRouter {
    async fn request_with(
        &self,
        method: Method,
        path: &str,
        f: impl FnOnce(&mut HeaderMap),
    ) -> Result<AxumResponse> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(headers) = builder.headers_mut() {
            f(headers);
        }
        Ok(self.clone().oneshot(builder.body(Body::empty())?).await?)
    }
}

/// Full application wired up with the given redirect rules and document tree.
pub(crate) struct TestEnvironment {
    pub(crate) config: Arc<Config>,
    pub(crate) redirects: Arc<RedirectTable>,
}

impl TestEnvironment {
    pub(crate) fn new(rules: Vec<RedirectRule>, docs_root: Option<&Path>) -> Result<Self> {
        let mut config = Config::test_config()?;
        if let Some(docs_root) = docs_root {
            config.docs_root = docs_root.to_path_buf();
        }

        Ok(Self {
            config: Arc::new(config),
            redirects: Arc::new(RedirectTable::from_rules(rules)),
        })
    }

    pub(crate) fn web_app(&self) -> AxumRouter {
        build_axum_app(self.config.clone(), self.redirects.clone())
    }
}
