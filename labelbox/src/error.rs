//! Service error type for startup, configuration and I/O

use thiserror::Error;

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure error type for startup and configuration
///
/// Nothing here is rendered to clients. Request-level failures, including
/// authentication, use [`ApiError`](crate::handlers::ApiError).
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figment_error_converts_to_config() {
        let err: Error = figment::Error::from("missing field".to_string()).into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port 8080").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: port 8080");
    }

    #[test]
    fn test_internal_display() {
        let err = Error::Internal("subscriber already set".into());
        assert_eq!(err.to_string(), "Internal server error: subscriber already set");
    }
}
