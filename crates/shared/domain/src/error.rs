//! Domain-level errors.

use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Password rejected before hashing
    #[error("Password error: {0}")]
    Password(String),

    /// Hashing failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
