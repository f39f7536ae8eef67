/// Request header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing API key")]
    Missing,
    #[error("Invalid API key")]
    Invalid,
}

/// Validates the provided API key against the configured one.
///
/// When no key is configured every request is accepted. The expected key is resolved once at
/// startup and passed in; nothing here reads the environment.
pub fn validate_api_key(expected: Option<&str>, provided: Option<&str>) -> Result<(), AuthError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match provided {
        None => Err(AuthError::Missing),
        Some(key) if key == expected => Ok(()),
        Some(_) => Err(AuthError::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_configured_key_allows_everything() {
        assert_eq!(validate_api_key(None, None), Ok(()));
        assert_eq!(validate_api_key(None, Some("anything")), Ok(()));
    }

    #[test]
    fn configured_key_must_match() {
        assert_eq!(validate_api_key(Some("k1"), Some("k1")), Ok(()));
        assert_eq!(validate_api_key(Some("k1"), Some("k2")), Err(AuthError::Invalid));
        assert_eq!(validate_api_key(Some("k1"), None), Err(AuthError::Missing));
    }
}
