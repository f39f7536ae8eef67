//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_PASSWORD_ITERATIONS};
use crate::store::{EntityStore, FileStore, MemoryStore};
use crate::{MrasError, MrasResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Which entity store implementation backs the running process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local maps; contents are lost on exit.
    Memory,
    /// One JSON document per entity under the data directory.
    File,
}

impl FromStr for StoreBackend {
    type Err = MrasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(MrasError::InvalidInput(format!(
                "unknown store backend '{}' (expected 'memory' or 'file')",
                other
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store_backend: StoreBackend,
    data_dir: PathBuf,
    password_iterations: u32,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `MrasError::InvalidInput` if `password_iterations` is zero or the file backend is
    /// selected with an empty data directory.
    pub fn new(
        store_backend: StoreBackend,
        data_dir: PathBuf,
        password_iterations: u32,
    ) -> MrasResult<Self> {
        if password_iterations == 0 {
            return Err(MrasError::InvalidInput(
                "password_iterations must be at least 1".into(),
            ));
        }

        if store_backend == StoreBackend::File && data_dir.as_os_str().is_empty() {
            return Err(MrasError::InvalidInput(
                "data_dir cannot be empty for the file store".into(),
            ));
        }

        Ok(Self {
            store_backend,
            data_dir,
            password_iterations,
        })
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn password_iterations(&self) -> u32 {
        self.password_iterations
    }

    /// Builds the entity store selected by this configuration.
    ///
    /// The file store creates its data directory if it does not exist yet.
    pub async fn open_store(&self) -> MrasResult<Arc<dyn EntityStore>> {
        match self.store_backend {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::File => Ok(Arc::new(FileStore::open(&self.data_dir).await?)),
        }
    }
}

/// Parse the store backend from an optional string value.
///
/// If `value` is `None` or empty/whitespace, the file backend is used.
pub fn store_backend_from_env_value(value: Option<String>) -> MrasResult<StoreBackend> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<StoreBackend>())
        .transpose()
        .map(|parsed| parsed.unwrap_or(StoreBackend::File))
}

/// Parse the data directory from an optional string value, falling back to [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Parse the PBKDF2 iteration count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PASSWORD_ITERATIONS`].
pub fn password_iterations_from_env_value(value: Option<String>) -> MrasResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_PASSWORD_ITERATIONS),
        Some(v) => v.parse::<u32>().map_err(|_| {
            MrasError::InvalidInput(format!("password iterations must be a number, got '{}'", v))
        }),
    }
}
