//! Unified error handling for the marketplace services.
//!
//! Domain kinds (missing user, missing rights, missing tender or bid, bad
//! input) are produced by the service layer. Infrastructure failures are
//! wrapped with the name of the operation that failed. The HTTP boundary maps
//! every kind to its own status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Identity & authorization
    #[error("user not exists")]
    UserNotExists,

    #[error("user does not have enough rights")]
    NotEnoughRights,

    // Resource errors
    #[error("tender not found")]
    TenderNotFound,

    #[error("bid not found")]
    BidNotFound,

    /// Used where the tender/bid distinction is not resolved
    #[error("tender or bid not found")]
    TenderOrBidNotFound,

    // Input
    #[error("wrong format or parameters: {0}")]
    WrongInputFormat(String),

    /// The request deadline expired before the operation completed
    #[error("request cancelled")]
    Cancelled,

    // Infrastructure
    #[error("{context}: {source}")]
    Persistence {
        context: String,
        #[source]
        source: Box<AppError>,
    },

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UserNotExists => "USER_NOT_EXISTS",
            AppError::NotEnoughRights => "NOT_ENOUGH_RIGHTS",
            AppError::TenderNotFound => "TENDER_NOT_FOUND",
            AppError::BidNotFound => "BID_NOT_FOUND",
            AppError::TenderOrBidNotFound => "TENDER_OR_BID_NOT_FOUND",
            AppError::WrongInputFormat(_) => "WRONG_INPUT_FORMAT",
            AppError::Cancelled => "CANCELLED",
            AppError::Persistence { .. } => "PERSISTENCE_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UserNotExists => StatusCode::UNAUTHORIZED,
            AppError::NotEnoughRights => StatusCode::FORBIDDEN,
            AppError::TenderNotFound | AppError::BidNotFound | AppError::TenderOrBidNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::WrongInputFormat(_) => StatusCode::BAD_REQUEST,
            AppError::Cancelled => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for the kinds the service layer raises itself
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            AppError::UserNotExists
                | AppError::NotEnoughRights
                | AppError::TenderNotFound
                | AppError::BidNotFound
                | AppError::TenderOrBidNotFound
                | AppError::WrongInputFormat(_)
                | AppError::Cancelled
        )
    }

    /// Wrap an infrastructure failure with the operation that produced it.
    ///
    /// Domain kinds pass through unchanged so callers can still match on them.
    pub fn context(self, operation: impl Into<String>) -> Self {
        if self.is_domain() {
            return self;
        }
        AppError::Persistence {
            context: operation.into(),
            source: Box::new(self),
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Persistence { context, source } => {
                tracing::error!(context = %context, error = ?source, "Persistence error");
                "An internal error occurred".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Client errors carry their own message
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::WrongInputFormat(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_tender_not_found(self) -> AppResult<T>;
    fn ok_or_bid_not_found(self) -> AppResult<T>;
    fn ok_or_user_not_exists(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_tender_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::TenderNotFound)
    }

    fn ok_or_bid_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::BidNotFound)
    }

    fn ok_or_user_not_exists(self) -> AppResult<T> {
        self.ok_or(AppError::UserNotExists)
    }
}

/// Extension trait attaching operation context to fallible results
pub trait ResultExt<T> {
    fn context(self, operation: &str) -> AppResult<T>;
}

impl<T> ResultExt<T> for AppResult<T> {
    fn context(self, operation: &str) -> AppResult<T> {
        self.map_err(|e| e.context(operation))
    }
}

/// Convenience constructors
impl AppError {
    pub fn wrong_input(msg: impl Into<String>) -> Self {
        AppError::WrongInputFormat(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
