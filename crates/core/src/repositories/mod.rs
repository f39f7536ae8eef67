//! Entity services.
//!
//! One service per entity kind. Each service holds the injected store handle and runs the
//! validation workflow before any write that references other entities. Services contain only
//! data operations; HTTP mapping lives in `api-rest`.

pub mod appointments;
pub mod doctors;
pub mod hospitals;
pub mod patients;
pub mod referrals;
pub mod users;

pub use appointments::AppointmentService;
pub use doctors::DoctorService;
pub use hospitals::HospitalService;
pub use patients::PatientService;
pub use referrals::ReferralService;
pub use users::UserService;

use crate::{MrasError, MrasResult};

/// Maps an absent entity to `NotFound(label)`.
pub(crate) fn found<T>(value: Option<T>, label: &str) -> MrasResult<T> {
    value.ok_or_else(|| MrasError::NotFound(label.to_string()))
}

/// Runs CPU-heavy work (password hashing) off the async worker threads.
pub(crate) async fn run_blocking<T, F>(work: F) -> MrasResult<T>
where
    F: FnOnce() -> MrasResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| MrasError::Internal(format!("blocking task failed: {}", e)))?
}
