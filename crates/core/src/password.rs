//! Password hashing for user accounts.
//!
//! Hashes are PBKDF2-HMAC-SHA256 with a random 32-byte salt, stored as a self-describing string:
//!
//! ```text
//! pbkdf2-sha256$<iterations>$<salt, base64>$<hash, base64>
//! ```
//!
//! The iteration count is part of the stored string, so a hash written under one configuration
//! still verifies after the configured count changes.

use crate::constants::MIN_PASSWORD_LEN;
use crate::{MrasError, MrasResult};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LENGTH: usize = 32;
const HASH_LENGTH: usize = 32;

#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Hashes `password` with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns `MrasError::InvalidInput` if the password is shorter than the minimum length.
    pub fn hash(&self, password: &str) -> MrasResult<String> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(MrasError::InvalidInput(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);

        let digest = derive(password, &salt, self.iterations);
        Ok(format!(
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            STANDARD_NO_PAD.encode(salt),
            STANDARD_NO_PAD.encode(digest)
        ))
    }

    /// Checks `password` against a stored hash string.
    ///
    /// A malformed stored hash is an internal fault, not a credential mismatch.
    pub fn verify(&self, password: &str, stored: &str) -> MrasResult<bool> {
        let mut parts = stored.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(expected), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(MrasError::Internal("malformed password hash".into()));
        };

        if scheme != SCHEME {
            return Err(MrasError::Internal(format!(
                "unsupported password hash scheme '{}'",
                scheme
            )));
        }

        let iterations: u32 = iterations
            .parse()
            .map_err(|_| MrasError::Internal("malformed password hash iterations".into()))?;
        let salt = STANDARD_NO_PAD
            .decode(salt)
            .map_err(|e| MrasError::Internal(format!("malformed password salt: {}", e)))?;
        let expected = STANDARD_NO_PAD
            .decode(expected)
            .map_err(|e| MrasError::Internal(format!("malformed password hash: {}", e)))?;

        let actual = derive(password, &salt, iterations);
        Ok(actual.as_slice().ct_eq(expected.as_slice()).into())
    }
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = PasswordHasher::new(10);
        let stored = hasher.hash("correct horse").unwrap();

        assert!(stored.starts_with("pbkdf2-sha256$10$"));
        assert!(hasher.verify("correct horse", &stored).unwrap());
        assert!(!hasher.verify("wrong horse", &stored).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = PasswordHasher::new(5);
        let a = hasher.hash("secret1").unwrap();
        let b = hasher.hash("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_uses_stored_iteration_count() {
        let stored = PasswordHasher::new(3).hash("secret1").unwrap();
        assert!(PasswordHasher::new(50).verify("secret1", &stored).unwrap());
    }

    #[test]
    fn short_passwords_are_rejected() {
        let err = PasswordHasher::new(1).hash("abc").unwrap_err();
        assert!(matches!(err, MrasError::InvalidInput(_)));
    }

    #[test]
    fn malformed_hash_is_internal_error() {
        let err = PasswordHasher::new(1)
            .verify("secret1", "not-a-hash")
            .unwrap_err();
        assert!(matches!(err, MrasError::Internal(_)));
    }
}
