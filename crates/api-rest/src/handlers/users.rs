use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;
use api_shared::{ErrorRes, UserRes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mras_core::models::{LoginCredentials, NewUser, UserProfileUpdate};
use mras_core::EntityId;

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = NewUser,
    responses(
        (status = 201, description = "User registered", body = UserRes),
        (status = 400, description = "Invalid input or email already registered", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<UserRes>)> {
    let user = state.services.users.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserRes::with_message("User registered successfully", user)),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginCredentials,
    responses(
        (status = 200, description = "Credentials accepted", body = UserRes),
        (status = 401, description = "Invalid credentials", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(creds): ApiJson<LoginCredentials>,
) -> ApiResult<Json<UserRes>> {
    let user = state.services.users.login(creds).await?;
    Ok(Json(UserRes::with_message("Login successful", user)))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserRes),
        (status = 404, description = "User not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<UserRes>> {
    let user = state.services.users.get(id).await?;
    Ok(Json(UserRes::new(user)))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UserProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = UserRes),
        (status = 404, description = "User not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ApiJson(patch): ApiJson<UserProfileUpdate>,
) -> ApiResult<Json<UserRes>> {
    let user = state.services.users.update_profile(id, patch).await?;
    Ok(Json(UserRes::with_message("Profile updated successfully", user)))
}
