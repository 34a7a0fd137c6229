//! Repository error types
//!
//! Every repository failure carries the operation that failed and a kind. The
//! HTTP layer branches on the kind, never on the message, so a missing entity is
//! always [`RepositoryErrorKind::NotFound`].
//!
//! # Example
//!
//! ```rust
//! use labelbox::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::not_found("Label", "0b6f0d8e-6a4e-4a8e-9d1c-3f1b2a7c9e10")
//!     .with_operation(RepositoryOperation::DeleteByGroup);
//! assert!(error.is_not_found());
//! assert_eq!(error.operation, RepositoryOperation::DeleteByGroup);
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Listing every entity in a group
    GetAll,
    /// Creating a new entity in a group
    Create,
    /// Reading a single entity scoped to a group
    GetOneByGroup,
    /// Updating a single entity scoped to a group
    UpdateByGroup,
    /// Deleting a single entity scoped to a group
    DeleteByGroup,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetAll => write!(f, "get_all"),
            Self::Create => write!(f, "create"),
            Self::GetOneByGroup => write!(f, "get_one_by_group"),
            Self::UpdateByGroup => write!(f, "update_by_group"),
            Self::DeleteByGroup => write!(f, "delete_by_group"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Entity was not found in the requested group
    NotFound,
    /// Entity already exists (duplicate key)
    AlreadyExists,
    /// Storage constraint violation
    ConstraintViolation,
    /// Input rejected before touching storage
    ValidationFailed,
    /// Failed to reach the backing store
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Underlying storage error
    StorageError,
    /// Other unclassified error
    Other,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::StorageError => write!(f, "storage_error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Label")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    ///
    /// Defaults to [`RepositoryOperation::GetOneByGroup`]; use
    /// [`with_operation`](Self::with_operation) for updates and deletes.
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::GetOneByGroup,
            kind: RepositoryErrorKind::NotFound,
            message: "Entity not found".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Create an "already exists" error with entity context
    pub fn already_exists(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::Create,
            kind: RepositoryErrorKind::AlreadyExists,
            message: "Entity already exists".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(identifier.into()),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ValidationFailed, message)
    }

    /// Create a constraint violation error
    pub fn constraint_violation(
        operation: RepositoryOperation,
        message: impl Into<String>,
    ) -> Self {
        Self::new(operation, RepositoryErrorKind::ConstraintViolation, message)
    }

    /// Create a connection failed error
    pub fn connection_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ConnectionFailed, message)
    }

    /// Create a timeout error
    pub fn timeout(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Timeout, message)
    }

    /// Create a storage error
    pub fn storage(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::StorageError, message)
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
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether the entity was absent from the requested group
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryErrorKind::NotFound
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_operation_display() {
        assert_eq!(RepositoryOperation::GetAll.to_string(), "get_all");
        assert_eq!(RepositoryOperation::Create.to_string(), "create");
        assert_eq!(RepositoryOperation::GetOneByGroup.to_string(), "get_one_by_group");
        assert_eq!(RepositoryOperation::UpdateByGroup.to_string(), "update_by_group");
        assert_eq!(RepositoryOperation::DeleteByGroup.to_string(), "delete_by_group");
    }

    #[test]
    fn test_not_found_convenience() {
        let error = RepositoryError::not_found("Label", "lbl-1");
        assert_eq!(error.operation, RepositoryOperation::GetOneByGroup);
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
        assert_eq!(error.entity_type.as_deref(), Some("Label"));
        assert_eq!(error.entity_id.as_deref(), Some("lbl-1"));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_with_operation_keeps_kind() {
        let error = RepositoryError::not_found("Label", "lbl-1")
            .with_operation(RepositoryOperation::DeleteByGroup);
        assert_eq!(error.operation, RepositoryOperation::DeleteByGroup);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_validation_failed_is_not_not_found() {
        let error =
            RepositoryError::validation_failed(RepositoryOperation::UpdateByGroup, "missing id");
        assert_eq!(error.kind, RepositoryErrorKind::ValidationFailed);
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_is_retriable() {
        assert!(RepositoryError::connection_failed(RepositoryOperation::GetAll, "refused")
            .is_retriable());
        assert!(RepositoryError::timeout(RepositoryOperation::Create, "slow").is_retriable());
        assert!(!RepositoryError::not_found("Label", "1").is_retriable());
        assert!(!RepositoryError::storage(RepositoryOperation::Create, "disk").is_retriable());
        assert!(!RepositoryError::already_exists("Label", "Garage").is_retriable());
        assert!(
            !RepositoryError::constraint_violation(RepositoryOperation::Create, "fk")
                .is_retriable()
        );
    }

    #[test]
    fn test_display_with_entity() {
        let error = RepositoryError::not_found("Label", "lbl-1");
        let display = error.to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("get_one_by_group"));
        assert!(display.contains("[Label: lbl-1]"));
    }

    #[test]
    fn test_display_without_entity() {
        let error = RepositoryError::storage(RepositoryOperation::Create, "disk full");
        let display = error.to_string();
        assert!(display.contains("storage_error"));
        assert!(display.contains("disk full"));
        assert!(!display.contains('['));
    }
}
