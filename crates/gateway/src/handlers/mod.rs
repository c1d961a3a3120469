//! HTTP handlers.

mod bid_handler;
mod health_handler;
mod tender_handler;

pub use bid_handler::bid_routes;
pub use health_handler::health_routes;
pub use tender_handler::tender_routes;

use serde::Deserialize;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::LimitOffset;

/// Caller identity carried in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub username: String,
}

impl UserQuery {
    pub fn username(&self) -> AppResult<&str> {
        require_username(&self.username)
    }
}

/// Raw limit/offset query values, decoded by `window()`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn window(&self) -> AppResult<LimitOffset> {
        Ok(LimitOffset::parse(
            self.limit.as_deref(),
            self.offset.as_deref(),
        )?)
    }
}

/// Reject a missing or empty `username` before it reaches the services.
pub fn require_username(username: &str) -> AppResult<&str> {
    if username.is_empty() {
        return Err(AppError::wrong_input("username is required"));
    }
    Ok(username)
}

/// Decode an identifier taken from the request path.
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::wrong_input(format!("invalid id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_username() {
        assert_eq!(require_username("alice").unwrap(), "alice");
        assert!(matches!(
            require_username(""),
            Err(AppError::WrongInputFormat(_))
        ));
        assert!(UserQuery::default().username().is_err());
    }
}
