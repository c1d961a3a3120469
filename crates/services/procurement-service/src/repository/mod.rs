//! Repository layer for data access.

mod bid_repository;
pub mod entities;
pub mod memory;
mod organization_repository;
mod tender_repository;
mod user_repository;

pub use bid_repository::{BidRepository, BidStore};
pub use memory::InMemoryStore;
pub use organization_repository::{OrganizationRepository, OrganizationStore};
pub use tender_repository::{TenderRepository, TenderStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use bid_repository::MockBidRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use organization_repository::MockOrganizationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use tender_repository::MockTenderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

use common::AppError;
use domain::DomainError;

/// A stored row that no longer decodes into a domain value.
fn corrupt_row(table: &str, err: DomainError) -> AppError {
    AppError::internal(format!("corrupt {table} row: {err}"))
}
