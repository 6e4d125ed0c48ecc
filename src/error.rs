use crate::cache::CachePolicy;
use axum::{
    Extension,
    response::{IntoResponse, Response as AxumResponse},
};
use http::StatusCode;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AxumNope {
    #[error("Requested resource not found")]
    ResourceNotFound,
    #[error("Bad request")]
    BadRequest(anyhow::Error),
    #[error("Internal server error")]
    InternalError(anyhow::Error),
}

impl AxumNope {
    fn status(&self) -> StatusCode {
        match self {
            AxumNope::ResourceNotFound => StatusCode::NOT_FOUND,
            AxumNope::BadRequest(_) => StatusCode::BAD_REQUEST,
            AxumNope::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AxumNope {
    fn into_response(self) -> AxumResponse {
        let message = match &self {
            AxumNope::ResourceNotFound => "The requested resource does not exist".to_string(),
            AxumNope::BadRequest(source) => format!("Bad request: {source}"),
            AxumNope::InternalError(source) => {
                error!(?source, "internal error while handling request");
                "Internal server error".to_string()
            }
        };

        (
            self.status(),
            Extension(CachePolicy::NoCaching),
            message,
        )
            .into_response()
    }
}

impl From<anyhow::Error> for AxumNope {
    fn from(err: anyhow::Error) -> Self {
        AxumNope::InternalError(err)
    }
}

impl From<std::io::Error> for AxumNope {
    fn from(err: std::io::Error) -> Self {
        AxumNope::InternalError(err.into())
    }
}

pub(crate) type AxumResult<T> = Result<T, AxumNope>;
