//! Service layer - tender and bid use cases.

mod bid_service;
mod tender_service;

pub use bid_service::{BidManager, BidService};
pub use tender_service::{TenderManager, TenderService};

#[cfg(any(test, feature = "test-utils"))]
pub use bid_service::MockBidService;
#[cfg(any(test, feature = "test-utils"))]
pub use tender_service::MockTenderService;

use common::{AppResult, OptionExt, ResultExt};
use domain::UserId;

use crate::repository::UserRepository;

/// Resolve the caller's username to an employee id.
async fn resolve_user(users: &dyn UserRepository, username: &str) -> AppResult<UserId> {
    users
        .find_user_id(username)
        .await
        .context("resolve user")?
        .ok_or_user_not_exists()
        .inspect_err(|_| tracing::debug!(username = %username, "Unknown user"))
}
