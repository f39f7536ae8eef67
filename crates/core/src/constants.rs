//! Constants used throughout the MRAS core crate.

/// Default directory for the file-backed entity store when none is configured.
pub const DEFAULT_DATA_DIR: &str = "mras_data";

/// Filename of the JSON document stored in each sharded entity directory.
pub const DOCUMENT_FILENAME: &str = "document.json";

/// Suffix for in-flight writes; renamed over [`DOCUMENT_FILENAME`] once complete.
pub const DOCUMENT_TMP_SUFFIX: &str = ".tmp";

/// Default PBKDF2 iteration count for user password hashes.
pub const DEFAULT_PASSWORD_ITERATIONS: u32 = 100_000;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Collection directory names, one per entity kind.
pub const USERS_COLLECTION: &str = "users";
pub const HOSPITALS_COLLECTION: &str = "hospitals";
pub const DOCTORS_COLLECTION: &str = "doctors";
pub const PATIENTS_COLLECTION: &str = "patients";
pub const APPOINTMENTS_COLLECTION: &str = "appointments";
pub const REFERRALS_COLLECTION: &str = "referrals";
