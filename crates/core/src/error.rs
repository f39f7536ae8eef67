use crate::store::StoreError;

/// Failures surfaced by MRAS core operations.
///
/// Nothing in the core recovers from these silently or retries; each is returned to the caller
/// as the failure value of the operation, and the API surface maps it to an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum MrasError {
    /// A referenced or addressed entity does not exist. Carries the role (for example
    /// `referringDoctor`) or the entity kind that failed to resolve.
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} already registered")]
    AlreadyRegistered(String),
    #[error("invalid referral: {0}")]
    InvalidReferral(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    /// A filtered listing matched nothing and the operation treats that as a failure rather
    /// than an empty success (referrals by patient / by hospital).
    #[error("{0}")]
    NoMatches(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<mras_types::TextError> for MrasError {
    fn from(err: mras_types::TextError) -> Self {
        MrasError::InvalidInput(err.to_string())
    }
}

impl From<mras_uuid::UuidError> for MrasError {
    fn from(err: mras_uuid::UuidError) -> Self {
        MrasError::InvalidInput(err.to_string())
    }
}

pub type MrasResult<T> = std::result::Result<T, MrasError>;
