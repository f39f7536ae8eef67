//! # MRAS Core
//!
//! Core business logic for the Medical Referral and Appointment System.
//!
//! This crate contains the data model, the entity store abstraction with its in-memory and
//! sharded-file implementations, the cross-entity validation workflow, and one service per
//! entity kind (including the referral and appointment lifecycles).
//!
//! **No API concerns**: HTTP routing, API keys and response envelopes belong in `api-rest` or
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod password;
pub mod repositories;
pub mod store;
pub mod validation;

pub use config::{CoreConfig, StoreBackend};
pub use error::{MrasError, MrasResult};
pub use mras_types::{EmailAddress, NonEmptyText, TextError};
pub use mras_uuid::EntityId;
pub use repositories::{
    AppointmentService, DoctorService, HospitalService, PatientService, ReferralService,
    UserService,
};
pub use store::{EntityKind, EntityStore};

use std::sync::Arc;

/// Every entity service, sharing one store handle.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub hospitals: HospitalService,
    pub doctors: DoctorService,
    pub patients: PatientService,
    pub appointments: AppointmentService,
    pub referrals: ReferralService,
}

impl Services {
    pub fn new(store: Arc<dyn EntityStore>, cfg: &CoreConfig) -> Self {
        Self {
            users: UserService::new(store.clone(), cfg.password_iterations()),
            hospitals: HospitalService::new(store.clone()),
            doctors: DoctorService::new(store.clone()),
            patients: PatientService::new(store.clone()),
            appointments: AppointmentService::new(store.clone()),
            referrals: ReferralService::new(store),
        }
    }
}
