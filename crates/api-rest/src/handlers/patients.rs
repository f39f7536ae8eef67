use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;
use api_shared::{ErrorRes, MessageRes, PatientRes, PatientsRes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mras_core::models::{NewPatient, PatientUpdate};
use mras_core::EntityId;

#[utoipa::path(
    post,
    path = "/patients/register",
    tag = "patients",
    request_body = NewPatient,
    responses(
        (status = 201, description = "Patient registered", body = PatientRes),
        (status = 400, description = "Patient already registered", body = ErrorRes),
        (status = 404, description = "User or assigned doctor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn register_patient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewPatient>,
) -> ApiResult<(StatusCode, Json<PatientRes>)> {
    let patient = state.services.patients.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(PatientRes::with_message("Patient registered successfully", patient)),
    ))
}

#[utoipa::path(
    get,
    path = "/patients",
    tag = "patients",
    responses((status = 200, description = "All patients", body = PatientsRes))
)]
#[axum::debug_handler]
pub async fn list_patients(State(state): State<AppState>) -> ApiResult<Json<PatientsRes>> {
    let patients = state.services.patients.list_all().await?;
    Ok(Json(PatientsRes::new(patients)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    tag = "patients",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient", body = PatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<PatientRes>> {
    let patient = state.services.patients.get(id).await?;
    Ok(Json(PatientRes::new(patient)))
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    tag = "patients",
    params(("id" = String, Path, description = "Patient id")),
    request_body = PatientUpdate,
    responses(
        (status = 200, description = "Patient updated", body = PatientRes),
        (status = 404, description = "Patient or assigned doctor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ApiJson(patch): ApiJson<PatientUpdate>,
) -> ApiResult<Json<PatientRes>> {
    let patient = state.services.patients.update(id, patch).await?;
    Ok(Json(PatientRes::with_message(
        "Patient updated successfully",
        patient,
    )))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    tag = "patients",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<MessageRes>> {
    state.services.patients.delete(id).await?;
    Ok(Json(MessageRes::new("Patient deleted successfully")))
}
