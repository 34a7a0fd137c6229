//! Authentication middleware that injects [`Claims`] into request extensions

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::token::{extract_token, Claims, TokenValidator};
use crate::handlers::ApiError;

/// Paths served without authentication
const PUBLIC_PATHS: &[&str] = &["/health", "/ready"];

/// Token authentication middleware state
#[derive(Clone)]
pub struct TokenAuth {
    validator: Arc<dyn TokenValidator>,
}

impl std::fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuth").finish_non_exhaustive()
    }
}

impl TokenAuth {
    /// Create the middleware state around a validator
    pub fn new<V: TokenValidator + 'static>(validator: V) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }

    /// Validate the bearer token and inject claims
    ///
    /// Claims already present in the extensions are replaced, so only this
    /// middleware decides who the caller is.
    pub async fn middleware(
        State(auth): State<Self>,
        mut request: Request<Body>,
        next: Next,
    ) -> Result<Response, ApiError> {
        if PUBLIC_PATHS.contains(&request.uri().path()) {
            return Ok(next.run(request).await);
        }

        let token = extract_token(request.headers())?;
        let claims: Claims = auth.validator.validate_token(&token)?;

        tracing::debug!(sub = %claims.sub, group = %claims.group, "Authenticated request");

        request.extensions_mut().insert(claims);

        Ok(next.run(request).await)
    }
}
