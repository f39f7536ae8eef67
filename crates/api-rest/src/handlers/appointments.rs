use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;
use api_shared::{AppointmentRes, AppointmentsRes, ErrorRes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mras_core::models::{AppointmentUpdate, NewAppointment};
use mras_core::EntityId;

#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    request_body = NewAppointment,
    responses(
        (status = 201, description = "Appointment scheduled", body = AppointmentRes),
        (status = 404, description = "Patient, doctor or referral not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewAppointment>,
) -> ApiResult<(StatusCode, Json<AppointmentRes>)> {
    let appointment = state.services.appointments.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(AppointmentRes::with_message(
            "Appointment scheduled successfully",
            appointment,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/appointments",
    tag = "appointments",
    responses((status = 200, description = "All appointments", body = AppointmentsRes))
)]
#[axum::debug_handler]
pub async fn list_appointments(State(state): State<AppState>) -> ApiResult<Json<AppointmentsRes>> {
    let appointments = state.services.appointments.list_all().await?;
    Ok(Json(AppointmentsRes::new(appointments)))
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = AppointmentRes),
        (status = 404, description = "Appointment not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<AppointmentRes>> {
    let appointment = state.services.appointments.get(id).await?;
    Ok(Json(AppointmentRes::new(appointment)))
}

#[utoipa::path(
    get,
    path = "/appointments/doctor/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Appointments with the doctor", body = AppointmentsRes),
        (status = 404, description = "Doctor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_appointments_by_doctor(
    State(state): State<AppState>,
    ApiPath(doctor): ApiPath<EntityId>,
) -> ApiResult<Json<AppointmentsRes>> {
    let appointments = state.services.appointments.list_by_doctor(doctor).await?;
    Ok(Json(AppointmentsRes::new(appointments)))
}

#[utoipa::path(
    get,
    path = "/appointments/patient/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Appointments for the patient", body = AppointmentsRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_appointments_by_patient(
    State(state): State<AppState>,
    ApiPath(patient): ApiPath<EntityId>,
) -> ApiResult<Json<AppointmentsRes>> {
    let appointments = state.services.appointments.list_by_patient(patient).await?;
    Ok(Json(AppointmentsRes::new(appointments)))
}

#[utoipa::path(
    put,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = AppointmentUpdate,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentRes),
        (status = 404, description = "Appointment not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ApiJson(patch): ApiJson<AppointmentUpdate>,
) -> ApiResult<Json<AppointmentRes>> {
    let appointment = state.services.appointments.reschedule(id, patch).await?;
    Ok(Json(AppointmentRes::with_message(
        "Appointment updated",
        appointment,
    )))
}

#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment canceled", body = AppointmentRes),
        (status = 404, description = "Appointment not found", body = ErrorRes)
    )
)]
/// Cancels rather than deletes; the appointment stays with status `canceled`.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<AppointmentRes>> {
    let appointment = state.services.appointments.cancel(id).await?;
    Ok(Json(AppointmentRes::with_message(
        "Appointment canceled",
        appointment,
    )))
}
