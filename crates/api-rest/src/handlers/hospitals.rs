use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;
use api_shared::{ErrorRes, HospitalRes, HospitalsRes, MessageRes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mras_core::models::{HospitalUpdate, NewHospital};
use mras_core::EntityId;

#[utoipa::path(
    post,
    path = "/hospitals",
    tag = "hospitals",
    request_body = NewHospital,
    responses(
        (status = 201, description = "Hospital created", body = HospitalRes),
        (status = 400, description = "Hospital already exists", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_hospital(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewHospital>,
) -> ApiResult<(StatusCode, Json<HospitalRes>)> {
    let hospital = state.services.hospitals.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(HospitalRes::with_message("Hospital created successfully", hospital)),
    ))
}

#[utoipa::path(
    get,
    path = "/hospitals",
    tag = "hospitals",
    responses((status = 200, description = "All hospitals", body = HospitalsRes))
)]
#[axum::debug_handler]
pub async fn list_hospitals(State(state): State<AppState>) -> ApiResult<Json<HospitalsRes>> {
    let hospitals = state.services.hospitals.list_all().await?;
    Ok(Json(HospitalsRes::new(hospitals)))
}

#[utoipa::path(
    get,
    path = "/hospitals/{id}",
    tag = "hospitals",
    params(("id" = String, Path, description = "Hospital id")),
    responses(
        (status = 200, description = "Hospital", body = HospitalRes),
        (status = 404, description = "Hospital not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_hospital(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<HospitalRes>> {
    let hospital = state.services.hospitals.get(id).await?;
    Ok(Json(HospitalRes::new(hospital)))
}

#[utoipa::path(
    put,
    path = "/hospitals/{id}",
    tag = "hospitals",
    params(("id" = String, Path, description = "Hospital id")),
    request_body = HospitalUpdate,
    responses(
        (status = 200, description = "Hospital updated", body = HospitalRes),
        (status = 404, description = "Hospital or referenced doctor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_hospital(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ApiJson(patch): ApiJson<HospitalUpdate>,
) -> ApiResult<Json<HospitalRes>> {
    let hospital = state.services.hospitals.update(id, patch).await?;
    Ok(Json(HospitalRes::with_message(
        "Hospital updated successfully",
        hospital,
    )))
}

#[utoipa::path(
    delete,
    path = "/hospitals/{id}",
    tag = "hospitals",
    params(("id" = String, Path, description = "Hospital id")),
    responses(
        (status = 200, description = "Hospital deleted", body = MessageRes),
        (status = 404, description = "Hospital not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_hospital(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<MessageRes>> {
    state.services.hospitals.delete(id).await?;
    Ok(Json(MessageRes::new("Hospital deleted successfully")))
}
