//! Domain-level errors.
//!
//! These errors describe values that cannot be decoded into domain types.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for malformed input values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown service type: {0}")]
    UnknownServiceType(String),

    #[error("unknown tender status: {0}")]
    UnknownTenderStatus(String),

    #[error("unknown author type: {0}")]
    UnknownAuthorType(String),

    #[error("unknown decision: {0}")]
    UnknownDecision(String),

    /// Pagination parameters that are not non-negative integers
    #[error("cannot parse {field}: {value}")]
    InvalidPagination { field: &'static str, value: String },
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
