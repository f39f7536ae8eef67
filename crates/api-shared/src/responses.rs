//! JSON response envelopes.
//!
//! Successful responses are `{ "success": true, "message"?: ..., <entity or list>: ... }`.
//! Failures are [`ErrorRes`]: `{ "success": false, "error": ... }`.

use mras_core::models::{Appointment, Doctor, Hospital, Patient, Referral, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub success: bool,
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Success with only a message, for deletes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub success: bool,
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Declares a single-entity envelope and a list envelope for one model type.
macro_rules! envelopes {
    ($one:ident, $one_field:ident, $many:ident, $many_field:ident, $model:ty) => {
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
        pub struct $one {
            pub success: bool,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub message: Option<String>,
            pub $one_field: $model,
        }

        impl $one {
            pub fn new($one_field: $model) -> Self {
                Self {
                    success: true,
                    message: None,
                    $one_field,
                }
            }

            pub fn with_message(message: impl Into<String>, $one_field: $model) -> Self {
                Self {
                    success: true,
                    message: Some(message.into()),
                    $one_field,
                }
            }
        }

        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
        pub struct $many {
            pub success: bool,
            pub count: usize,
            pub $many_field: Vec<$model>,
        }

        impl $many {
            pub fn new($many_field: Vec<$model>) -> Self {
                Self {
                    success: true,
                    count: $many_field.len(),
                    $many_field,
                }
            }
        }
    };
}

envelopes!(UserRes, user, UsersRes, users, User);
envelopes!(HospitalRes, hospital, HospitalsRes, hospitals, Hospital);
envelopes!(DoctorRes, doctor, DoctorsRes, doctors, Doctor);
envelopes!(PatientRes, patient, PatientsRes, patients, Patient);
envelopes!(AppointmentRes, appointment, AppointmentsRes, appointments, Appointment);
envelopes!(ReferralRes, referral, ReferralsRes, referrals, Referral);
