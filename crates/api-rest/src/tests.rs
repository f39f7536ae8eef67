use super::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mras_core::{CoreConfig, StoreBackend};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower::ServiceExt;

async fn test_app(api_key: Option<&str>) -> Router {
    let cfg = CoreConfig::new(StoreBackend::Memory, PathBuf::new(), 1).unwrap();
    let store = cfg.open_store().await.unwrap();
    router(AppState::new(
        Services::new(store, &cfg),
        api_key.map(str::to_string),
    ))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    api_key: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

struct Seeded {
    patient: String,
    doctor: String,
    h1: String,
    h2: String,
}

async fn register_user(app: &Router, name: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        Some(json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "password": "secret1",
            "role": role
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert!(body["user"].get("passwordHash").is_none());
    body["user"]["id"].as_str().unwrap().to_string()
}

async fn create_hospital(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/hospitals",
        Some(json!({
            "name": name,
            "location": "Manchester",
            "contact": {"phone": "0161 496 0000", "email": format!("{}@nhs.example", name.to_lowercase())},
            "departments": ["Radiology"]
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["hospital"]["status"], "active");
    body["hospital"]["id"].as_str().unwrap().to_string()
}

async fn register_doctor(app: &Router, user: &str, hospital: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/doctors/register",
        Some(json!({
            "userId": user,
            "specialization": "Cardiology",
            "experience": 12,
            "hospital": hospital,
            "availability": ["Monday", "Wednesday"],
            "phone": "07700 900010"
        })),
        None,
    )
    .await
}

async fn seed(app: &Router) -> Seeded {
    let u1 = register_user(app, "Una", "patient").await;
    let u2 = register_user(app, "Drew", "doctor").await;
    let h1 = create_hospital(app, "Central").await;
    let h2 = create_hospital(app, "Eastern").await;

    let (status, body) = send(
        app,
        "POST",
        "/patients/register",
        Some(json!({
            "userId": u1,
            "dateOfBirth": "1992-07-14",
            "gender": "Female",
            "bloodType": "O-",
            "medicalHistory": ["hypertension"],
            "emergencyContact": {"name": "Ray", "phone": "07700 900011", "relationship": "Spouse"}
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let patient = body["patient"]["id"].as_str().unwrap().to_string();

    let (status, body) = register_doctor(app, &u2, &h1).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let doctor = body["doctor"]["id"].as_str().unwrap().to_string();

    Seeded {
        patient,
        doctor,
        h1,
        h2,
    }
}

fn referral_body(s: &Seeded, destination: &str) -> Value {
    json!({
        "patient": s.patient,
        "referringDoctor": s.doctor,
        "referringHospital": s.h1,
        "destinationHospital": destination,
        "reason": "checkup"
    })
}

#[tokio::test]
async fn health_is_open() {
    let app = test_app(Some("k3y")).await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn api_key_gates_everything_else() {
    let app = test_app(Some("k3y")).await;

    let (status, body) = send(&app, "GET", "/referrals", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "error": "Missing API key"}));

    let (status, _) = send(&app, "GET", "/referrals", None, Some("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/referrals", None, Some("k3y")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["referrals"], json!([]));
}

#[tokio::test]
async fn same_hospital_referral_is_rejected_with_400() {
    let app = test_app(None).await;
    let s = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/referrals",
        Some(referral_body(&s, &s.h1)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid referral: same hospital");
}

#[tokio::test]
async fn referral_created_pending_then_approved() {
    let app = test_app(None).await;
    let s = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/referrals",
        Some(referral_body(&s, &s.h2)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["referral"]["status"], "pending");
    assert_eq!(body["message"], "Referral created successfully");
    let id = body["referral"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "PATCH", &format!("/referrals/approve/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["referral"]["status"], "approved");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/referrals/hospital/{}", s.h2),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn referral_listing_with_no_matches_is_404() {
    let app = test_app(None).await;
    let s = seed(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/referrals/patient/{}", s.patient),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No referrals found for this patient");
}

#[tokio::test]
async fn appointment_for_unknown_patient_is_404_and_not_stored() {
    let app = test_app(None).await;
    let s = seed(&app).await;
    let ghost = mras_core::EntityId::new().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/appointments",
        Some(json!({"patient": ghost, "doctor": s.doctor, "date": "2026-12-01T10:00:00Z"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "patient not found");

    let (_, body) = send(&app, "GET", "/appointments", None, None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn appointment_cancel_keeps_record() {
    let app = test_app(None).await;
    let s = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/appointments",
        Some(json!({"patient": s.patient, "doctor": s.doctor, "date": "2026-12-01T10:00:00Z"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["appointment"]["status"], "scheduled");
    let id = body["appointment"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "DELETE", &format!("/appointments/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["status"], "canceled");

    let (status, body) = send(&app, "GET", &format!("/appointments/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["status"], "canceled");
}

#[tokio::test]
async fn second_doctor_registration_is_400() {
    let app = test_app(None).await;
    let u = register_user(&app, "Kim", "doctor").await;
    let h = create_hospital(&app, "Western").await;

    let (status, _) = register_doctor(&app, &u, &h).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register_doctor(&app, &u, &h).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Doctor already registered");
}

#[tokio::test]
async fn malformed_ids_and_bodies_are_400() {
    let app = test_app(None).await;

    let (status, body) = send(&app, "GET", "/referrals/not-an-id", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/referrals",
        Some(json!({"patient": "x"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn login_checks_password() {
    let app = test_app(None).await;
    register_user(&app, "Lee", "admin").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        Some(json!({"email": "lee@example.com", "password": "secret1"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        Some(json!({"email": "lee@example.com", "password": "nope123"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app(Some("k3y")).await;
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/referrals/approve/{id}").is_some());
}
