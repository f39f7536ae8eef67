use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;
use api_shared::{ErrorRes, ReferralRes, ReferralsRes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mras_core::models::NewReferral;
use mras_core::EntityId;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LinkAppointmentReq {
    #[schema(value_type = String)]
    pub appointment: EntityId,
}

#[utoipa::path(
    post,
    path = "/referrals",
    tag = "referrals",
    request_body = NewReferral,
    responses(
        (status = 201, description = "Referral created with status pending", body = ReferralRes),
        (status = 400, description = "Referring and destination hospital are the same", body = ErrorRes),
        (status = 404, description = "A referenced entity does not exist", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_referral(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewReferral>,
) -> ApiResult<(StatusCode, Json<ReferralRes>)> {
    let referral = state.services.referrals.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReferralRes::with_message(
            "Referral created successfully",
            referral,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/referrals",
    tag = "referrals",
    responses((status = 200, description = "All referrals", body = ReferralsRes))
)]
#[axum::debug_handler]
pub async fn list_referrals(State(state): State<AppState>) -> ApiResult<Json<ReferralsRes>> {
    let referrals = state.services.referrals.list_all().await?;
    Ok(Json(ReferralsRes::new(referrals)))
}

#[utoipa::path(
    get,
    path = "/referrals/{id}",
    tag = "referrals",
    params(("id" = String, Path, description = "Referral id")),
    responses(
        (status = 200, description = "Referral", body = ReferralRes),
        (status = 404, description = "Referral not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_referral(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<ReferralRes>> {
    let referral = state.services.referrals.get(id).await?;
    Ok(Json(ReferralRes::new(referral)))
}

#[utoipa::path(
    get,
    path = "/referrals/patient/{id}",
    tag = "referrals",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Referrals for the patient", body = ReferralsRes),
        (status = 404, description = "No referrals found for this patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_referrals_by_patient(
    State(state): State<AppState>,
    ApiPath(patient): ApiPath<EntityId>,
) -> ApiResult<Json<ReferralsRes>> {
    let referrals = state.services.referrals.list_by_patient(patient).await?;
    Ok(Json(ReferralsRes::new(referrals)))
}

#[utoipa::path(
    get,
    path = "/referrals/hospital/{id}",
    tag = "referrals",
    params(("id" = String, Path, description = "Destination hospital id")),
    responses(
        (status = 200, description = "Referrals sent to the hospital", body = ReferralsRes),
        (status = 404, description = "No referrals found for this hospital", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_referrals_by_hospital(
    State(state): State<AppState>,
    ApiPath(hospital): ApiPath<EntityId>,
) -> ApiResult<Json<ReferralsRes>> {
    let referrals = state.services.referrals.list_by_hospital(hospital).await?;
    Ok(Json(ReferralsRes::new(referrals)))
}

#[utoipa::path(
    patch,
    path = "/referrals/approve/{id}",
    tag = "referrals",
    params(("id" = String, Path, description = "Referral id")),
    responses(
        (status = 200, description = "Referral approved", body = ReferralRes),
        (status = 404, description = "Referral not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn approve_referral(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<ReferralRes>> {
    let referral = state.services.referrals.approve(id).await?;
    Ok(Json(ReferralRes::with_message(
        "Referral approved successfully",
        referral,
    )))
}

#[utoipa::path(
    patch,
    path = "/referrals/reject/{id}",
    tag = "referrals",
    params(("id" = String, Path, description = "Referral id")),
    responses(
        (status = 200, description = "Referral rejected", body = ReferralRes),
        (status = 404, description = "Referral not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn reject_referral(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<ReferralRes>> {
    let referral = state.services.referrals.reject(id).await?;
    Ok(Json(ReferralRes::with_message("Referral rejected", referral)))
}

#[utoipa::path(
    patch,
    path = "/referrals/complete/{id}",
    tag = "referrals",
    params(("id" = String, Path, description = "Referral id")),
    responses(
        (status = 200, description = "Referral completed", body = ReferralRes),
        (status = 404, description = "Referral not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn complete_referral(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<ReferralRes>> {
    let referral = state.services.referrals.complete(id).await?;
    Ok(Json(ReferralRes::with_message(
        "Referral completed successfully",
        referral,
    )))
}

#[utoipa::path(
    patch,
    path = "/referrals/{id}/appointment",
    tag = "referrals",
    params(("id" = String, Path, description = "Referral id")),
    request_body = LinkAppointmentReq,
    responses(
        (status = 200, description = "Appointment linked", body = ReferralRes),
        (status = 404, description = "Referral or appointment not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn link_referral_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
    ApiJson(req): ApiJson<LinkAppointmentReq>,
) -> ApiResult<Json<ReferralRes>> {
    let referral = state
        .services
        .referrals
        .link_appointment(id, req.appointment)
        .await?;
    Ok(Json(ReferralRes::with_message(
        "Appointment linked to referral",
        referral,
    )))
}
