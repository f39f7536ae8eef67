//! MRAS data model.
//!
//! Each stored entity has a model struct implementing [`Document`](crate::store::Document),
//! plus input types for its creation and partial-update operations. Input types are the
//! explicit request schemas: they deserialize (and validate) request bodies at the API boundary
//! so services only ever receive well-formed values.
//!
//! All JSON field names are camelCase.

pub mod appointment;
pub mod doctor;
pub mod hospital;
pub mod patient;
pub mod referral;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus, AppointmentUpdate, NewAppointment};
pub use doctor::{Doctor, DoctorUpdate, NewDoctor, Weekday};
pub use hospital::{Hospital, HospitalContact, HospitalUpdate, NewHospital};
pub use patient::{BloodType, EmergencyContact, Gender, NewPatient, Patient, PatientUpdate};
pub use referral::{NewReferral, Referral, ReferralStatus};
pub use user::{LoginCredentials, NewUser, Role, User, UserProfileUpdate, UserRecord};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Operational status shared by doctors and hospitals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn toggled(self) -> Self {
        match self {
            ActivityStatus::Active => ActivityStatus::Inactive,
            ActivityStatus::Inactive => ActivityStatus::Active,
        }
    }
}

/// Trims free-text fields; blank text is treated as absent.
pub(crate) fn normalise_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
