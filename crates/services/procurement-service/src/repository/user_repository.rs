//! Employee lookups used to resolve and verify callers.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::entities::employee::{self, Entity as EmployeeEntity};
use common::{AppError, AppResult};
use domain::UserId;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Resolve a username to its employee id, `None` when unknown
    async fn find_user_id(&self, username: &str) -> AppResult<Option<UserId>>;

    /// Check that an employee with this id exists
    async fn exists(&self, user_id: UserId) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository backed by the `employee` table
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_user_id(&self, username: &str) -> AppResult<Option<UserId>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|model| model.id))
    }

    async fn exists(&self, user_id: UserId) -> AppResult<bool> {
        let result = EmployeeEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.is_some())
    }
}
