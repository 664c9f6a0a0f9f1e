//! # API Shared
//!
//! Shared definitions for the contacts API.
//!
//! Contains:
//! - Request/response schemas (`schemas` module)
//! - Caller identity: the `IdentityProvider` trait and the configured `TokenRegistry`
//! - The `HealthService`
//!
//! Used by `api-rest` and the root `contacts-run` binary.

pub mod auth;
pub mod health;
pub mod schemas;

pub use auth::{bearer_token, AuthError, IdentityProvider, TokenRegistry};
pub use health::HealthService;
pub use schemas::*;
