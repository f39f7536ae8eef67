use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;
use api_shared::{DoctorRes, DoctorsRes, ErrorRes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mras_core::models::{ActivityStatus, DoctorUpdate, NewDoctor};
use mras_core::EntityId;

#[utoipa::path(
    post,
    path = "/doctors/register",
    tag = "doctors",
    request_body = NewDoctor,
    responses(
        (status = 201, description = "Doctor registered", body = DoctorRes),
        (status = 400, description = "Doctor already registered", body = ErrorRes),
        (status = 404, description = "User or hospital not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn register_doctor(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewDoctor>,
) -> ApiResult<(StatusCode, Json<DoctorRes>)> {
    let doctor = state.services.doctors.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(DoctorRes::with_message("Doctor registered successfully", doctor)),
    ))
}

#[utoipa::path(
    get,
    path = "/doctors",
    tag = "doctors",
    responses((status = 200, description = "All doctors", body = DoctorsRes))
)]
#[axum::debug_handler]
pub async fn list_doctors(State(state): State<AppState>) -> ApiResult<Json<DoctorsRes>> {
    let doctors = state.services.doctors.list_all().await?;
    Ok(Json(DoctorsRes::new(doctors)))
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    tag = "doctors",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor", body = DoctorRes),
        (status = 404, description = "Doctor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<DoctorRes>> {
    let doctor = state.services.doctors.get(id).await?;
    Ok(Json(DoctorRes::new(doctor)))
}

#[utoipa::path(
    get,
    path = "/doctors/hospital/{id}",
    tag = "doctors",
    params(("id" = String, Path, description = "Hospital id")),
    responses(
        (status = 200, description = "Doctors at the hospital", body = DoctorsRes),
        (status = 404, description = "Hospital not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_doctors_by_hospital(
    State(state): State<AppState>,
    ApiPath(hospital): ApiPath<EntityId>,
) -> ApiResult<Json<DoctorsRes>> {
    let doctors = state.services.doctors.list_by_hospital(hospital).await?;
    Ok(Json(DoctorsRes::new(doctors)))
}

#[utoipa::path(
    put,
    path = "/doctors/{id}",
    tag = "doctors",
    params(("id" = String, Path, description = "Doctor id")),
    request_body = DoctorUpdate,
    responses(
        (status = 200, description = "Doctor updated", body = DoctorRes),
        (status = 404, description = "Doctor or hospital not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ApiJson(patch): ApiJson<DoctorUpdate>,
) -> ApiResult<Json<DoctorRes>> {
    let doctor = state.services.doctors.update(id, patch).await?;
    Ok(Json(DoctorRes::with_message("Doctor updated successfully", doctor)))
}

#[utoipa::path(
    patch,
    path = "/doctors/{id}/status",
    tag = "doctors",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor status toggled", body = DoctorRes),
        (status = 404, description = "Doctor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn toggle_doctor_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<DoctorRes>> {
    let doctor = state.services.doctors.toggle_status(id).await?;
    let message = match doctor.status {
        ActivityStatus::Active => "Doctor active",
        ActivityStatus::Inactive => "Doctor inactive",
    };
    Ok(Json(DoctorRes::with_message(message, doctor)))
}
