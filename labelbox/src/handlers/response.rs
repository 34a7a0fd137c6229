//! Response writing for REST handlers
//!
//! [`respond`] is the one place handler results become HTTP responses, and
//! [`Results`] is the envelope used for every collection.
//!
//! # Example
//!
//! ```rust
//! use axum::http::StatusCode;
//! use labelbox::handlers::{respond, Results};
//!
//! let response = respond(StatusCode::OK, Results::new(vec!["garage", "kitchen"]));
//! assert_eq!(response.status(), StatusCode::OK);
//!
//! let empty = respond(StatusCode::NO_CONTENT, ());
//! assert_eq!(empty.status(), StatusCode::NO_CONTENT);
//! ```

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Collection envelope: `{"items": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Results<T> {
    /// The items in the collection
    pub items: Vec<T>,
}

impl<T> Results<T> {
    /// Wrap a list of items
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> From<Vec<T>> for Results<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

/// Serialize `body` as JSON and write it with `status`
///
/// `204 No Content` always produces an empty body, whatever `body` is. A body
/// that fails to serialize becomes an opaque 500.
pub fn respond<T: Serialize>(status: StatusCode, body: T) -> Response {
    if status == StatusCode::NO_CONTENT {
        return status.into_response();
    }

    match serde_json::to_vec(&body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            bytes,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize response body");
            ApiError::internal("Failed to serialize response").into_response()
        }
    }
}
