//! Organization membership index.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use super::entities::organization::Entity as OrganizationEntity;
use super::entities::organization_responsible::{self, Entity as ResponsibleEntity};
use common::{AppError, AppResult};
use domain::{OrganizationId, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Organization repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Organizations the user is responsible for
    async fn find_organizations_by_user(&self, user_id: UserId) -> AppResult<Vec<OrganizationId>>;

    /// Users responsible for any of the given organizations
    async fn find_responsible_users(
        &self,
        organization_ids: &[OrganizationId],
    ) -> AppResult<Vec<UserId>>;

    /// Check that an organization with this id exists
    async fn exists(&self, organization_id: OrganizationId) -> AppResult<bool>;
}

/// Concrete implementation of OrganizationRepository
pub struct OrganizationStore {
    db: DatabaseConnection,
}

impl OrganizationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrganizationRepository for OrganizationStore {
    async fn find_organizations_by_user(&self, user_id: UserId) -> AppResult<Vec<OrganizationId>> {
        let ids = ResponsibleEntity::find()
            .select_only()
            .column(organization_responsible::Column::OrganizationId)
            .filter(organization_responsible::Column::UserId.eq(user_id))
            .into_tuple::<OrganizationId>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ids)
    }

    async fn find_responsible_users(
        &self,
        organization_ids: &[OrganizationId],
    ) -> AppResult<Vec<UserId>> {
        if organization_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = ResponsibleEntity::find()
            .select_only()
            .column(organization_responsible::Column::UserId)
            .filter(
                organization_responsible::Column::OrganizationId
                    .is_in(organization_ids.iter().copied()),
            )
            .into_tuple::<UserId>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ids)
    }

    async fn exists(&self, organization_id: OrganizationId) -> AppResult<bool> {
        let result = OrganizationEntity::find_by_id(organization_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.is_some())
    }
}
