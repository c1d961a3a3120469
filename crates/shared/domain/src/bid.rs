//! Bid domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::*;
use crate::error::DomainError;
use crate::{BidId, TenderId};

/// Who authored a bid: an organization or an individual user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidAuthorType {
    Organization,
    User,
}

impl BidAuthorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidAuthorType::Organization => AUTHOR_TYPE_ORGANIZATION,
            BidAuthorType::User => AUTHOR_TYPE_USER,
        }
    }
}

impl FromStr for BidAuthorType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AUTHOR_TYPE_ORGANIZATION => Ok(BidAuthorType::Organization),
            AUTHOR_TYPE_USER => Ok(BidAuthorType::User),
            other => Err(DomainError::UnknownAuthorType(other.to_string())),
        }
    }
}

impl fmt::Display for BidAuthorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review outcome submitted by a user responsible for a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidDecision {
    Approved,
    Rejected,
}

impl FromStr for BidDecision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DECISION_APPROVED => Ok(BidDecision::Approved),
            DECISION_REJECTED => Ok(BidDecision::Rejected),
            other => Err(DomainError::UnknownDecision(other.to_string())),
        }
    }
}

/// Bid domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: BidId,
    pub name: String,
    pub description: String,
    /// Free-form status, starts as "Created"
    pub status: String,
    pub tender_id: TenderId,
    pub author_type: BidAuthorType,
    pub author_id: Uuid,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

impl Bid {
    /// Build a freshly created bid for an already decoded author type.
    pub fn create(new: NewBid, author_type: BidAuthorType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            status: BID_STATUS_CREATED.to_string(),
            tender_id: new.tender_id,
            author_type,
            author_id: new.author_id,
            version: INITIAL_VERSION,
            created_at: Utc::now(),
        }
    }
}

/// Bid creation data transfer object
#[derive(Debug, Clone, PartialEq)]
pub struct NewBid {
    pub name: String,
    pub description: String,
    pub tender_id: TenderId,
    /// Raw author type, decoded by the bid service
    pub author_type: String,
    pub author_id: Uuid,
}
