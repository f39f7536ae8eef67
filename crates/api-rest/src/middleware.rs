use crate::error::ApiError;
use crate::AppState;
use api_shared::{validate_api_key, API_KEY_HEADER};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Rejects requests without the configured `x-api-key`. A no-op when no key is configured.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = validate_api_key(state.api_key.as_deref(), provided) {
        tracing::warn!("Rejected request to {}: {}", req.uri().path(), e);
        return ApiError::from(e).into_response();
    }

    next.run(req).await
}
