//! Entity identifiers and sharded-path utilities.
//!
//! Every MRAS document (user, hospital, doctor, patient, appointment, referral) is keyed by a
//! UUID. To keep references comparable and storage paths deterministic, MRAS uses a *canonical*
//! representation for identifiers: **32 lowercase hexadecimal characters** (no hyphens).
//!
//! This crate provides:
//! - [`EntityId`], a wrapper that *guarantees* the canonical format once constructed.
//! - Shared sharding logic used by the file-backed entity store.
//!
//! ## Canonical UUID form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Canonical form is *required* for externally supplied identifiers (path segments and request
//! bodies). Non-canonical values (uppercase, hyphenated, wrong length, non-hex) are rejected.
//!
//! ## Sharded directory layout
//! For a canonical id `u`, documents live under:
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! Example:
//! `mras_data/referrals/55/0e/550e8400e29b41d4a716446655440000/`

mod id;

pub use id::{EntityId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
