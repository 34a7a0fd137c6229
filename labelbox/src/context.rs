//! Per-request context handed to domain functions
//!
//! [`RequestContext`] is assembled from request parts only: the request id set
//! by the request-tracking layer and the [`Claims`] inserted by the token
//! middleware. Nothing from the URL or body ever flows into it, so the group it
//! yields is always the authenticated caller's.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{handlers::ApiError, ids::GroupId, middleware::Claims};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Trusted request-scoped data
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    request_id: Option<String>,
    claims: Option<Claims>,
}

impl RequestContext {
    /// Build a context from the request head
    pub fn from_parts(parts: &Parts) -> Self {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Self {
            request_id,
            claims: parts.extensions.get::<Claims>().cloned(),
        }
    }

    /// A context for an already authenticated caller
    pub fn for_claims(claims: Claims) -> Self {
        Self {
            request_id: None,
            claims: Some(claims),
        }
    }

    /// The request id assigned by the request-tracking layer
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Claims of the authenticated caller, if any
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// The caller's group
    ///
    /// Fails with 401 when the request reached the handler unauthenticated.
    pub fn group(&self) -> Result<GroupId, ApiError> {
        self.claims
            .as_ref()
            .map(|claims| claims.group)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
