//! Domain layer - Core marketplace entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Tenders, bids and the identifiers that tie them to users and organizations
//! live here and are shared by the service crate and the HTTP gateway.

pub mod bid;
pub mod constants;
pub mod error;
pub mod pagination;
pub mod tender;

pub use bid::{Bid, BidAuthorType, BidDecision, NewBid};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use pagination::LimitOffset;
pub use tender::{NewTender, Tender, TenderServiceType, TenderStatus, TenderUpdate};

use uuid::Uuid;

/// Identifier of an employee record.
pub type UserId = Uuid;

/// Identifier of an organization.
pub type OrganizationId = Uuid;

/// Identifier of a tender.
pub type TenderId = Uuid;

/// Identifier of a bid.
pub type BidId = Uuid;
