//! Bid repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::corrupt_row;
use super::entities::bid::{self, ActiveModel, Entity as BidEntity};
use common::{AppError, AppResult};
use domain::{Bid, BidId, TenderId, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Bid repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BidRepository: Send + Sync {
    /// Persist a new bid
    async fn create(&self, bid: &Bid) -> AppResult<()>;

    /// Find bid by ID
    async fn find_by_id(&self, id: BidId) -> AppResult<Option<Bid>>;

    /// Bids authored under the given id, ordered by name
    async fn list_by_author(&self, author_id: UserId) -> AppResult<Vec<Bid>>;

    /// Bids placed on a tender
    async fn list_by_tender(&self, tender_id: TenderId) -> AppResult<Vec<Bid>>;

    /// Users allowed to act on the given bids (their authors)
    async fn find_responsible_users(&self, bid_ids: &[BidId]) -> AppResult<Vec<UserId>>;
}

/// Concrete implementation of BidRepository
pub struct BidStore {
    db: DatabaseConnection,
}

impl BidStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(models: Vec<bid::Model>) -> AppResult<Vec<Bid>> {
    models
        .into_iter()
        .map(Bid::try_from)
        .collect::<Result<_, _>>()
        .map_err(|e| corrupt_row("bid", e))
}

#[async_trait]
impl BidRepository for BidStore {
    async fn create(&self, bid: &Bid) -> AppResult<()> {
        BidEntity::insert(ActiveModel::from(bid))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn find_by_id(&self, id: BidId) -> AppResult<Option<Bid>> {
        let result = BidEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result
            .map(Bid::try_from)
            .transpose()
            .map_err(|e| corrupt_row("bid", e))
    }

    async fn list_by_author(&self, author_id: UserId) -> AppResult<Vec<Bid>> {
        let models = BidEntity::find()
            .filter(bid::Column::AuthorId.eq(author_id))
            .order_by_asc(bid::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        to_domain(models)
    }

    async fn list_by_tender(&self, tender_id: TenderId) -> AppResult<Vec<Bid>> {
        let models = BidEntity::find()
            .filter(bid::Column::TenderId.eq(tender_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        to_domain(models)
    }

    async fn find_responsible_users(&self, bid_ids: &[BidId]) -> AppResult<Vec<UserId>> {
        if bid_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = BidEntity::find()
            .select_only()
            .column(bid::Column::AuthorId)
            .filter(bid::Column::Id.is_in(bid_ids.iter().copied()))
            .into_tuple::<UserId>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ids)
    }
}
