//! # API REST
//!
//! REST API implementation for MRAS.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelopes, status mapping, API key check, CORS)
//!
//! Uses `api-shared` for response types and `mras-core` for all data operations.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use axum::routing::{get, patch, post};
use axum::Router;
use handlers::{appointments, doctors, health, hospitals, patients, referrals, users};
use mras_core::Services;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::{ApiError, ApiResult};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    /// Expected `x-api-key`, if the deployment requires one.
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(services: Services, api_key: Option<String>) -> Self {
        Self {
            services: Arc::new(services),
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .map(Arc::from),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "MRAS REST API", description = "Medical Referral and Appointment System"),
    paths(
        health::health,
        users::register,
        users::login,
        users::get_user,
        users::update_user,
        hospitals::create_hospital,
        hospitals::list_hospitals,
        hospitals::get_hospital,
        hospitals::update_hospital,
        hospitals::delete_hospital,
        doctors::register_doctor,
        doctors::list_doctors,
        doctors::get_doctor,
        doctors::list_doctors_by_hospital,
        doctors::update_doctor,
        doctors::toggle_doctor_status,
        patients::register_patient,
        patients::list_patients,
        patients::get_patient,
        patients::update_patient,
        patients::delete_patient,
        appointments::create_appointment,
        appointments::list_appointments,
        appointments::get_appointment,
        appointments::list_appointments_by_doctor,
        appointments::list_appointments_by_patient,
        appointments::reschedule_appointment,
        appointments::cancel_appointment,
        referrals::create_referral,
        referrals::list_referrals,
        referrals::get_referral,
        referrals::list_referrals_by_patient,
        referrals::list_referrals_by_hospital,
        referrals::approve_referral,
        referrals::reject_referral,
        referrals::complete_referral,
        referrals::link_referral_appointment,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::MessageRes,
        api_shared::UserRes,
        api_shared::HospitalRes,
        api_shared::HospitalsRes,
        api_shared::DoctorRes,
        api_shared::DoctorsRes,
        api_shared::PatientRes,
        api_shared::PatientsRes,
        api_shared::AppointmentRes,
        api_shared::AppointmentsRes,
        api_shared::ReferralRes,
        api_shared::ReferralsRes,
        mras_core::models::User,
        mras_core::models::Role,
        mras_core::models::NewUser,
        mras_core::models::LoginCredentials,
        mras_core::models::UserProfileUpdate,
        mras_core::models::ActivityStatus,
        mras_core::models::Hospital,
        mras_core::models::HospitalContact,
        mras_core::models::NewHospital,
        mras_core::models::HospitalUpdate,
        mras_core::models::Doctor,
        mras_core::models::Weekday,
        mras_core::models::NewDoctor,
        mras_core::models::DoctorUpdate,
        mras_core::models::Patient,
        mras_core::models::Gender,
        mras_core::models::BloodType,
        mras_core::models::EmergencyContact,
        mras_core::models::NewPatient,
        mras_core::models::PatientUpdate,
        mras_core::models::Appointment,
        mras_core::models::AppointmentStatus,
        mras_core::models::NewAppointment,
        mras_core::models::AppointmentUpdate,
        mras_core::models::Referral,
        mras_core::models::ReferralStatus,
        mras_core::models::NewReferral,
        referrals::LinkAppointmentReq,
    ))
)]
pub struct ApiDoc;

/// Builds the full application router.
///
/// Everything except `/health` and the Swagger UI sits behind the API key check.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(users::register))
        .route("/auth/login", post(users::login))
        .route("/users/:id", get(users::get_user).put(users::update_user))
        .route(
            "/hospitals",
            post(hospitals::create_hospital).get(hospitals::list_hospitals),
        )
        .route(
            "/hospitals/:id",
            get(hospitals::get_hospital)
                .put(hospitals::update_hospital)
                .delete(hospitals::delete_hospital),
        )
        .route("/doctors", get(doctors::list_doctors))
        .route("/doctors/register", post(doctors::register_doctor))
        .route(
            "/doctors/hospital/:id",
            get(doctors::list_doctors_by_hospital),
        )
        .route(
            "/doctors/:id",
            get(doctors::get_doctor).put(doctors::update_doctor),
        )
        .route("/doctors/:id/status", patch(doctors::toggle_doctor_status))
        .route("/patients", get(patients::list_patients))
        .route("/patients/register", post(patients::register_patient))
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/appointments",
            post(appointments::create_appointment).get(appointments::list_appointments),
        )
        .route(
            "/appointments/:id",
            get(appointments::get_appointment)
                .put(appointments::reschedule_appointment)
                .delete(appointments::cancel_appointment),
        )
        .route(
            "/appointments/doctor/:id",
            get(appointments::list_appointments_by_doctor),
        )
        .route(
            "/appointments/patient/:id",
            get(appointments::list_appointments_by_patient),
        )
        .route(
            "/referrals",
            post(referrals::create_referral).get(referrals::list_referrals),
        )
        .route("/referrals/:id", get(referrals::get_referral))
        .route(
            "/referrals/patient/:id",
            get(referrals::list_referrals_by_patient),
        )
        .route(
            "/referrals/hospital/:id",
            get(referrals::list_referrals_by_hospital),
        )
        .route("/referrals/approve/:id", patch(referrals::approve_referral))
        .route("/referrals/reject/:id", patch(referrals::reject_referral))
        .route(
            "/referrals/complete/:id",
            patch(referrals::complete_referral),
        )
        .route(
            "/referrals/:id/appointment",
            patch(referrals::link_referral_appointment),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests;
