//! Caller identity.
//!
//! Token issuance is out of scope: tokens are provisioned out of band and handed to the server as
//! configuration. An [`IdentityProvider`] only turns a presented bearer token into the
//! [`OwnerId`] every core operation is scoped by.

use contacts_core::OwnerId;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingCredentials,
    #[error("invalid bearer token")]
    InvalidToken,
    #[error("invalid token configuration: {0}")]
    Config(String),
}

/// Resolves a presented bearer token to the caller's identity.
pub trait IdentityProvider: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<OwnerId, AuthError>;
}

/// Fixed token → owner table, loaded once at startup.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, OwnerId>,
}

impl TokenRegistry {
    pub fn new(tokens: impl IntoIterator<Item = (String, OwnerId)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Parses `token=owner_id` pairs separated by commas, e.g. `s3cret=1,other=2`.
    ///
    /// `None` or an empty value gives an empty registry, which rejects every request.
    pub fn from_env_value(value: Option<String>) -> Result<Self, AuthError> {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return Ok(Self::default());
        };

        let mut tokens = HashMap::new();
        for pair in value.split(',') {
            let (token, owner) = pair
                .split_once('=')
                .ok_or_else(|| AuthError::Config(format!("expected token=owner_id, got {pair:?}")))?;
            let token = token.trim();
            if token.is_empty() {
                return Err(AuthError::Config("token cannot be empty".into()));
            }
            let owner = owner
                .trim()
                .parse::<i64>()
                .map_err(|_| AuthError::Config(format!("invalid owner id for token: {owner:?}")))?;
            if tokens.insert(token.to_string(), OwnerId::new(owner)).is_some() {
                return Err(AuthError::Config("duplicate token".into()));
            }
        }

        Ok(Self { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IdentityProvider for TokenRegistry {
    fn authenticate(&self, token: &str) -> Result<OwnerId, AuthError> {
        self.tokens
            .get(token)
            .copied()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Extracts the token from an `Authorization` header value of the form `Bearer <token>`.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header_value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MissingCredentials)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingCredentials);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_parses_pairs() {
        let registry = TokenRegistry::from_env_value(Some("alpha=1, beta = 2".into())).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.authenticate("alpha"), Ok(OwnerId::new(1)));
        assert_eq!(registry.authenticate("beta"), Ok(OwnerId::new(2)));
        assert_eq!(registry.authenticate("gamma"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn registry_empty_when_unset() {
        let registry = TokenRegistry::from_env_value(None).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.authenticate("anything"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn registry_rejects_malformed_pairs() {
        for bad in ["alpha", "=1", "alpha=x", "a=1,a=2"] {
            assert!(
                matches!(
                    TokenRegistry::from_env_value(Some(bad.into())),
                    Err(AuthError::Config(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn bearer_token_parses_header() {
        assert_eq!(bearer_token("Bearer abc"), Ok("abc"));
        assert_eq!(bearer_token("bearer   abc "), Ok("abc"));
        assert_eq!(bearer_token("Basic abc"), Err(AuthError::MissingCredentials));
        assert_eq!(bearer_token("Bearer"), Err(AuthError::MissingCredentials));
        assert_eq!(bearer_token("Bearer  "), Err(AuthError::MissingCredentials));
    }
}
