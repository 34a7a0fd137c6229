//! Bearer token authentication
//!
//! Tokens are opaque strings issued out of band and listed in configuration.
//! Each one resolves to [`Claims`] naming the subject and the group it acts in.

use std::collections::HashMap;

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::{config::AuthConfig, error::Error, handlers::ApiError, ids::GroupId};

/// Claims structure for authenticated requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID or client ID)
    pub sub: String,

    /// Group every operation of this caller is scoped to
    pub group: GroupId,

    /// Roles
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Token validator trait
pub trait TokenValidator: Send + Sync {
    /// Validate a token and extract claims
    ///
    /// Rejections are 401 [`ApiError`]s so they render like every other
    /// request failure.
    fn validate_token(&self, token: &str) -> Result<Claims, ApiError>;
}

/// Extract token from Authorization header (Bearer scheme)
pub fn extract_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    if let Some(token) = auth_header.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(ApiError::unauthorized("Invalid Authorization header format"))
    }
}

/// Validator backed by the `[[auth.tokens]]` configuration table
#[derive(Debug, Clone, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, Claims>,
}

impl StaticTokenValidator {
    /// Build a validator from configuration
    ///
    /// Fails if the same token is granted twice.
    pub fn from_config(config: &AuthConfig) -> Result<Self, Error> {
        let mut validator = Self::default();
        for grant in &config.tokens {
            let claims = Claims {
                sub: grant.subject.clone(),
                group: grant.group,
                roles: grant.roles.clone(),
            };
            if validator.tokens.insert(grant.token.clone(), claims).is_some() {
                return Err(Error::Config(Box::new(figment::Error::from(format!(
                    "Token for subject '{}' is granted more than once",
                    grant.subject
                )))));
            }
        }

        if validator.tokens.is_empty() {
            tracing::warn!("No API tokens configured; every label request will be rejected");
        }

        Ok(validator)
    }

    /// Grant a token at runtime
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, claims: Claims) -> Self {
        self.tokens.insert(token.into(), claims);
        self
    }

    /// Number of accepted tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token is accepted
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenValidator for StaticTokenValidator {
    fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Invalid token"))
    }
}
