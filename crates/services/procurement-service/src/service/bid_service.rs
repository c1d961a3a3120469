//! Bid service - placing bids and deciding on them.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OptionExt, ResultExt};
use domain::{Bid, BidAuthorType, BidDecision, BidId, NewBid, TenderId, TenderStatus, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::resolve_user;
use crate::repository::{
    BidRepository, OrganizationRepository, TenderRepository, UserRepository,
};

/// Bid service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BidService: Send + Sync {
    /// Place a bid on an existing tender
    async fn create_bid(&self, new_bid: NewBid) -> AppResult<Bid>;

    /// Bids authored by the user
    async fn list_my_bids(&self, username: &str) -> AppResult<Vec<Bid>>;

    /// Bids placed on a tender the user is responsible for
    async fn list_tender_bids(&self, tender_id: TenderId, username: &str) -> AppResult<Vec<Bid>>;

    /// Status of a bid the user is responsible for
    async fn get_status(&self, bid_id: BidId, username: &str) -> AppResult<String>;

    /// Record a decision on a bid; approval closes the tender, anything else
    /// leaves it untouched
    async fn submit_decision(&self, bid_id: BidId, decision: &str, username: &str)
        -> AppResult<Bid>;
}

/// Concrete implementation of BidService using repositories.
pub struct BidManager {
    bids: Arc<dyn BidRepository>,
    tenders: Arc<dyn TenderRepository>,
    users: Arc<dyn UserRepository>,
    organizations: Arc<dyn OrganizationRepository>,
}

impl BidManager {
    /// Create new bid service instance with repositories
    pub fn new(
        bids: Arc<dyn BidRepository>,
        tenders: Arc<dyn TenderRepository>,
        users: Arc<dyn UserRepository>,
        organizations: Arc<dyn OrganizationRepository>,
    ) -> Self {
        Self {
            bids,
            tenders,
            users,
            organizations,
        }
    }

    /// Require `user_id` among the users responsible for the bid.
    async fn ensure_responsible(&self, user_id: UserId, bid_id: BidId) -> AppResult<()> {
        let responsible = self
            .bids
            .find_responsible_users(&[bid_id])
            .await
            .map_err(|e| {
                warn!(bid_id = %bid_id, error = %e, "Cannot resolve bid responsibles");
                AppError::BidNotFound
            })?;

        if !responsible.contains(&user_id) {
            debug!(user_id = %user_id, bid_id = %bid_id, "Not responsible for bid");
            return Err(AppError::NotEnoughRights);
        }
        Ok(())
    }
}

#[async_trait]
impl BidService for BidManager {
    async fn create_bid(&self, new_bid: NewBid) -> AppResult<Bid> {
        let author_type: BidAuthorType = new_bid.author_type.parse()?;

        let author_exists = match author_type {
            BidAuthorType::Organization => self
                .organizations
                .exists(new_bid.author_id)
                .await
                .context("check organization")?,
            BidAuthorType::User => self
                .users
                .exists(new_bid.author_id)
                .await
                .context("check user")?,
        };
        if !author_exists {
            debug!(author_id = %new_bid.author_id, author_type = %author_type, "Unknown bid author");
            return Err(AppError::UserNotExists);
        }

        self.tenders
            .find_by_id(new_bid.tender_id)
            .await
            .context("read tender")?
            .ok_or_tender_not_found()?;

        let bid = Bid::create(new_bid, author_type);
        self.bids.create(&bid).await.context("create bid")?;

        info!(bid_id = %bid.id, tender_id = %bid.tender_id, "Bid created");
        Ok(bid)
    }

    async fn list_my_bids(&self, username: &str) -> AppResult<Vec<Bid>> {
        let user_id = resolve_user(self.users.as_ref(), username).await?;

        self.bids
            .list_by_author(user_id)
            .await
            .context("list bids")
    }

    async fn list_tender_bids(&self, tender_id: TenderId, username: &str) -> AppResult<Vec<Bid>> {
        let user_id = resolve_user(self.users.as_ref(), username).await?;

        let tender = self
            .tenders
            .find_by_id(tender_id)
            .await
            .context("read tender")?
            .ok_or(AppError::TenderOrBidNotFound)?;

        let organizations = self
            .organizations
            .find_organizations_by_user(user_id)
            .await
            .context("read organizations")?;
        if !organizations.contains(&tender.organization_id) {
            debug!(user_id = %user_id, tender_id = %tender_id, "Not responsible for tender");
            return Err(AppError::NotEnoughRights);
        }

        self.bids.list_by_tender(tender_id).await.map_err(|e| {
            warn!(tender_id = %tender_id, error = %e, "Cannot list tender bids");
            AppError::TenderOrBidNotFound
        })
    }

    async fn get_status(&self, bid_id: BidId, username: &str) -> AppResult<String> {
        let user_id = resolve_user(self.users.as_ref(), username).await?;
        self.ensure_responsible(user_id, bid_id).await?;

        let bid = self
            .bids
            .find_by_id(bid_id)
            .await
            .map_err(|e| {
                warn!(bid_id = %bid_id, error = %e, "Cannot read bid");
                AppError::BidNotFound
            })?
            .ok_or_bid_not_found()?;

        Ok(bid.status)
    }

    async fn submit_decision(
        &self,
        bid_id: BidId,
        decision: &str,
        username: &str,
    ) -> AppResult<Bid> {
        let user_id = resolve_user(self.users.as_ref(), username).await?;

        let bid = self
            .bids
            .find_by_id(bid_id)
            .await
            .context("read bid")?
            .ok_or_bid_not_found()?;
        self.ensure_responsible(user_id, bid_id).await?;

        let tender = self
            .tenders
            .find_by_id(bid.tender_id)
            .await
            .context("read tender")?
            .ok_or_tender_not_found()?;

        match decision.parse::<BidDecision>() {
            Ok(BidDecision::Approved) => {
                self.tenders
                    .update_status(tender.id, TenderStatus::Closed)
                    .await
                    .context("close tender")?;
                info!(bid_id = %bid_id, tender_id = %tender.id, "Bid approved, tender closed");
            }
            Ok(BidDecision::Rejected) => {
                debug!(bid_id = %bid_id, "Bid rejected");
            }
            Err(e) => {
                debug!(bid_id = %bid_id, error = %e, "Decision ignored");
            }
        }

        Ok(bid)
    }
}
