//! HTTP error mapping.

use api_shared::{AuthError, ErrorRes};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mras_core::MrasError;

/// Errors returned from handlers, rendered as `{ "success": false, "error": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] MrasError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => match err {
                MrasError::NotFound(_) | MrasError::NoMatches(_) => StatusCode::NOT_FOUND,
                MrasError::AlreadyRegistered(_)
                | MrasError::InvalidReferral(_)
                | MrasError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                MrasError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                MrasError::Internal(_) | MrasError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {:?}", self);
            "Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorRes::new(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
