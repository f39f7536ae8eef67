//! # API Shared
//!
//! Shared utilities and definitions for the MRAS API surface.
//!
//! Contains:
//! - JSON response envelopes (`responses` module)
//! - Shared services like `HealthService`
//! - API key authentication
//!
//! Used by `api-rest` and the root binary.

pub mod auth;
pub mod health;
pub mod responses;

pub use auth::{validate_api_key, AuthError, API_KEY_HEADER};
pub use health::HealthService;
pub use responses::*;
