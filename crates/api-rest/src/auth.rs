//! Bearer-token authentication for REST handlers.

use crate::error::ApiError;
use crate::AppState;
use api_shared::{bearer_token, AuthError};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use contacts_core::OwnerId;

/// The authenticated caller. Adding this extractor to a handler makes the route require a valid
/// `Authorization: Bearer <token>` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub OwnerId);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingCredentials)?;
        let token = bearer_token(header)?;

        match state.identity.authenticate(token) {
            Ok(owner) => Ok(CurrentUser(owner)),
            Err(e) => {
                tracing::warn!("Rejected bearer token: {}", e);
                Err(e.into())
            }
        }
    }
}
