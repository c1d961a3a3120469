//! Tender repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, Unchanged,
};

use super::corrupt_row;
use super::entities::tender::{self, ActiveModel, Entity as TenderEntity};
use common::{AppError, AppResult};
use domain::{
    LimitOffset, OrganizationId, Tender, TenderId, TenderServiceType, TenderStatus, TenderUpdate,
    TENDER_STATUS_PUBLISHED,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Tender repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TenderRepository: Send + Sync {
    /// Persist a new tender
    async fn create(&self, tender: &Tender) -> AppResult<()>;

    /// Find tender by ID
    async fn find_by_id(&self, id: TenderId) -> AppResult<Option<Tender>>;

    /// Published tenders of the given service types, ordered by name
    async fn list(
        &self,
        service_types: &[TenderServiceType],
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>>;

    /// Tenders owned by any of the given organizations, ordered by name
    async fn list_by_organizations(
        &self,
        organization_ids: &[OrganizationId],
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>>;

    /// Overwrite the tender status
    async fn update_status(&self, id: TenderId, status: TenderStatus) -> AppResult<()>;

    /// Overwrite the fields present in `update`
    async fn update(&self, id: TenderId, update: &TenderUpdate) -> AppResult<()>;
}

/// Concrete implementation of TenderRepository
pub struct TenderStore {
    db: DatabaseConnection,
}

impl TenderStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(models: Vec<tender::Model>) -> AppResult<Vec<Tender>> {
    models
        .into_iter()
        .map(Tender::try_from)
        .collect::<Result<_, _>>()
        .map_err(|e| corrupt_row("tender", e))
}

#[async_trait]
impl TenderRepository for TenderStore {
    async fn create(&self, tender: &Tender) -> AppResult<()> {
        TenderEntity::insert(ActiveModel::from(tender))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn find_by_id(&self, id: TenderId) -> AppResult<Option<Tender>> {
        let result = TenderEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result
            .map(Tender::try_from)
            .transpose()
            .map_err(|e| corrupt_row("tender", e))
    }

    async fn list(
        &self,
        service_types: &[TenderServiceType],
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>> {
        let models = TenderEntity::find()
            .filter(tender::Column::ServiceType.is_in(service_types.iter().map(|s| s.as_str())))
            .filter(tender::Column::Status.eq(TENDER_STATUS_PUBLISHED))
            .order_by_asc(tender::Column::Name)
            .offset(window.offset())
            .limit(window.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        to_domain(models)
    }

    async fn list_by_organizations(
        &self,
        organization_ids: &[OrganizationId],
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>> {
        if organization_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = TenderEntity::find()
            .filter(tender::Column::OrganizationId.is_in(organization_ids.iter().copied()))
            .order_by_asc(tender::Column::Name)
            .offset(window.offset())
            .limit(window.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        to_domain(models)
    }

    async fn update_status(&self, id: TenderId, status: TenderStatus) -> AppResult<()> {
        TenderEntity::update_many()
            .col_expr(tender::Column::Status, Expr::value(status.as_str()))
            .filter(tender::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn update(&self, id: TenderId, update: &TenderUpdate) -> AppResult<()> {
        if update.is_empty() {
            return Ok(());
        }

        let mut active = ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };

        if let Some(name) = &update.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &update.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(service_type) = update.service_type()? {
            active.service_type = Set(service_type.as_str().to_string());
        }

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}
