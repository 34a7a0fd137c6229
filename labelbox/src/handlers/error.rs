//! API error types for handler operations
//!
//! [`ApiError`] is the single failure type every handler, adapter and the
//! dispatcher return. Its kind decides the HTTP status and every variant
//! renders the same JSON body shape.
//!
//! # Example
//!
//! ```rust
//! use labelbox::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found("Label", "0b6f0d8e-6a4e-4a8e-9d1c-3f1b2a7c9e10");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.kind.status_code().as_u16(), 404);
//! ```

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing entities
    List,
    /// Getting a single entity by ID
    Get,
    /// Creating a new entity
    Create,
    /// Updating an existing entity
    Update,
    /// Deleting an entity
    Delete,
    /// Parsing path parameters or decoding the request body
    Decode,
    /// Resolving the authenticated caller
    Authenticate,
    /// Routing a request to a method-specific branch
    Dispatch,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Decode => write!(f, "decode"),
            Self::Authenticate => write!(f, "authenticate"),
            Self::Dispatch => write!(f, "dispatch"),
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Entity was not found
    NotFound,
    /// Entity already exists
    AlreadyExists,
    /// Request validation failed
    ValidationFailed,
    /// Authentication required
    Unauthorized,
    /// Invalid request format or parameters
    BadRequest,
    /// Request body exceeded the configured limit
    PayloadTooLarge,
    /// Request body is not JSON
    UnsupportedMediaType,
    /// HTTP method not handled by the route
    MethodNotAllowed,
    /// Operation conflicts with current state
    Conflict,
    /// Internal server error
    InternalError,
    /// Service temporarily unavailable
    ServiceUnavailable,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::PayloadTooLarge => write!(f, "payload_too_large"),
            Self::UnsupportedMediaType => write!(f, "unsupported_media_type"),
            Self::MethodNotAllowed => write!(f, "method_not_allowed"),
            Self::Conflict => write!(f, "conflict"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists | Self::Conflict => StatusCode::CONFLICT,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the error code string for this error kind
    #[must_use]
    pub fn error_code(&self) -> String {
        self.to_string().to_uppercase()
    }

    /// Whether the failure was caused by the request rather than the server
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Human-readable error message, safe to show to clients
    pub message: String,
    /// The type of entity involved (e.g., "Label")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
    /// Value of the `Allow` header for method-not-allowed responses
    pub allow: Option<&'static str>,
    /// Underlying cause, logged with server errors and never sent to clients
    pub detail: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
            allow: None,
            detail: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::NotFound, "Entity not found")
            .with_entity(entity_type, entity_id)
    }

    /// Create a bad request error raised while decoding input
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Decode, ApiErrorKind::BadRequest, message)
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Authenticate, ApiErrorKind::Unauthorized, message)
    }

    /// Create a method-not-allowed error listing the methods the route accepts
    pub fn method_not_allowed(method: &Method, allow: &'static str) -> Self {
        let mut error = Self::new(
            ApiOperation::Dispatch,
            ApiErrorKind::MethodNotAllowed,
            format!("Method {} is not allowed on this resource", method),
        );
        error.allow = Some(allow);
        error
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::InternalError, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::ServiceUnavailable)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Client-safe message
    pub error: String,
    /// Upper-case error code, e.g. `NOT_FOUND`
    pub code: String,
    /// HTTP status code
    pub status: u16,
    /// Operation that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Entity type involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Entity id involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        let code = self.kind.error_code();

        if status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                retriable = self.is_retriable(),
                detail = self.detail.as_deref().unwrap_or_default(),
                "API error: {}", self.message
            );
        } else {
            tracing::debug!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                "API error: {}", self.message
            );
        }

        let allow = self.allow;
        let body = ApiErrorResponse {
            error: self.message,
            code,
            status: status.as_u16(),
            operation: Some(self.operation.to_string()),
            entity_type: self.entity_type,
            entity_id: self.entity_id,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(allow) = allow {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

fn repository_operation_to_api_operation(op: RepositoryOperation) -> ApiOperation {
    match op {
        RepositoryOperation::GetAll => ApiOperation::List,
        RepositoryOperation::Create => ApiOperation::Create,
        RepositoryOperation::GetOneByGroup => ApiOperation::Get,
        RepositoryOperation::UpdateByGroup => ApiOperation::Update,
        RepositoryOperation::DeleteByGroup => ApiOperation::Delete,
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = repository_operation_to_api_operation(err.operation);

        let kind = match err.kind {
            RepositoryErrorKind::NotFound => ApiErrorKind::NotFound,
            RepositoryErrorKind::AlreadyExists => ApiErrorKind::AlreadyExists,
            RepositoryErrorKind::ConstraintViolation => ApiErrorKind::Conflict,
            RepositoryErrorKind::ValidationFailed => ApiErrorKind::ValidationFailed,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout => {
                ApiErrorKind::ServiceUnavailable
            }
            RepositoryErrorKind::StorageError | RepositoryErrorKind::Other => {
                ApiErrorKind::InternalError
            }
        };

        // Internal details never reach the client
        let (message, detail) = match kind {
            ApiErrorKind::ServiceUnavailable => {
                ("Service temporarily unavailable".to_string(), Some(err.message))
            }
            ApiErrorKind::InternalError => {
                ("An internal error occurred".to_string(), Some(err.message))
            }
            _ => (err.message, None),
        };

        Self {
            operation,
            kind,
            message,
            entity_type: err.entity_type,
            entity_id: err.entity_id,
            allow: None,
            detail,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match rejection.status() {
            StatusCode::UNSUPPORTED_MEDIA_TYPE => ApiErrorKind::UnsupportedMediaType,
            StatusCode::PAYLOAD_TOO_LARGE => ApiErrorKind::PayloadTooLarge,
            _ => ApiErrorKind::BadRequest,
        };
        Self::new(ApiOperation::Decode, kind, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_api_error_kind_status_codes() {
        assert_eq!(ApiErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiErrorKind::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiErrorKind::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiErrorKind::UnsupportedMediaType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiErrorKind::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_kind_error_codes() {
        assert_eq!(ApiErrorKind::NotFound.error_code(), "NOT_FOUND");
        assert_eq!(ApiErrorKind::MethodNotAllowed.error_code(), "METHOD_NOT_ALLOWED");
        assert_eq!(ApiErrorKind::ServiceUnavailable.error_code(), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ApiErrorKind::BadRequest.is_client_error());
        assert!(ApiErrorKind::NotFound.is_client_error());
        assert!(!ApiErrorKind::InternalError.is_client_error());
        assert!(!ApiErrorKind::ServiceUnavailable.is_client_error());
    }

    #[test]
    fn test_decode_errors_are_tagged_with_decode_operation() {
        let error = ApiError::bad_request("Invalid identifier");
        assert_eq!(error.operation, ApiOperation::Decode);
        assert_eq!(error.kind, ApiErrorKind::BadRequest);
    }

    #[test]
    fn test_from_repository_not_found_keeps_context() {
        let repo_err = RepositoryError::not_found("Label", "lbl-1")
            .with_operation(RepositoryOperation::DeleteByGroup);
        let api_err = ApiError::from(repo_err);

        assert_eq!(api_err.kind, ApiErrorKind::NotFound);
        assert_eq!(api_err.operation, ApiOperation::Delete);
        assert_eq!(api_err.message, "Entity not found");
        assert_eq!(api_err.entity_id.as_deref(), Some("lbl-1"));
    }

    #[test]
    fn test_from_repository_storage_error_hides_message() {
        let repo_err = RepositoryError::storage(
            RepositoryOperation::UpdateByGroup,
            "deadlock detected on relation labels",
        );
        let api_err = ApiError::from(repo_err);

        assert_eq!(api_err.kind, ApiErrorKind::InternalError);
        assert_eq!(api_err.operation, ApiOperation::Update);
        assert_eq!(api_err.message, "An internal error occurred");
        assert_eq!(
            api_err.detail.as_deref(),
            Some("deadlock detected on relation labels")
        );
    }

    #[test]
    fn test_from_repository_timeout_is_unavailable() {
        let repo_err = RepositoryError::timeout(RepositoryOperation::GetAll, "pool wait 30s");
        let api_err = ApiError::from(repo_err);

        assert_eq!(api_err.kind, ApiErrorKind::ServiceUnavailable);
        assert_eq!(api_err.message, "Service temporarily unavailable");
        assert!(api_err.is_retriable());
    }

    #[test]
    fn test_display() {
        let error = ApiError::not_found("Label", "lbl-1");
        assert_eq!(
            error.to_string(),
            "API not_found error during get: Entity not found [Label: lbl-1]"
        );
    }

    #[tokio::test]
    async fn test_into_response_body_shape() {
        let response = ApiError::not_found("Label", "lbl-1").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["status"], 404);
        assert_eq!(body["operation"], "get");
        assert_eq!(body["entity_type"], "Label");
        assert_eq!(body["entity_id"], "lbl-1");
    }

    #[tokio::test]
    async fn test_method_not_allowed_sets_allow_header() {
        let response = ApiError::method_not_allowed(&Method::PATCH, "GET, PUT, DELETE")
            .into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(header::ALLOW).unwrap(),
            "GET, PUT, DELETE"
        );

        let body = json_body(response).await;
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
        assert!(body.get("entity_id").is_none());
    }

    #[tokio::test]
    async fn test_detail_stays_out_of_the_body() {
        let repo_err = RepositoryError::storage(RepositoryOperation::Create, "disk full on /var");
        let response = ApiError::from(repo_err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["error"], "An internal error occurred");
        assert!(!body.to_string().contains("disk full"));
    }
}
