//! Tender service - creation, listing, status and editing of tenders.
//!
//! Every operation that reads or changes a single tender is gated on the
//! caller being responsible for the organization that owns it.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OptionExt, ResultExt};
use domain::{
    LimitOffset, NewTender, Tender, TenderId, TenderServiceType, TenderStatus, TenderUpdate,
    UserId,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::resolve_user;
use crate::repository::{OrganizationRepository, TenderRepository, UserRepository};

/// Tender service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TenderService: Send + Sync {
    /// Create a tender on behalf of `username`
    async fn create_tender(&self, new_tender: NewTender, username: &str) -> AppResult<Tender>;

    /// Published tenders of the given service types (all types when empty)
    async fn list_tenders(
        &self,
        service_types: Vec<TenderServiceType>,
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>>;

    /// Tenders of every organization the user is responsible for
    async fn list_my_tenders(&self, username: &str, window: LimitOffset)
        -> AppResult<Vec<Tender>>;

    /// Current status of a tender
    async fn get_status(&self, tender_id: TenderId, username: &str) -> AppResult<TenderStatus>;

    /// Overwrite the status of a tender
    async fn set_status(
        &self,
        tender_id: TenderId,
        username: &str,
        status: TenderStatus,
    ) -> AppResult<Tender>;

    /// Apply a partial update to a tender
    async fn edit_tender(
        &self,
        tender_id: TenderId,
        update: TenderUpdate,
        username: &str,
    ) -> AppResult<Tender>;
}

/// Concrete implementation of TenderService using repositories.
pub struct TenderManager {
    tenders: Arc<dyn TenderRepository>,
    users: Arc<dyn UserRepository>,
    organizations: Arc<dyn OrganizationRepository>,
}

impl TenderManager {
    /// Create new tender service instance with repositories
    pub fn new(
        tenders: Arc<dyn TenderRepository>,
        users: Arc<dyn UserRepository>,
        organizations: Arc<dyn OrganizationRepository>,
    ) -> Self {
        Self {
            tenders,
            users,
            organizations,
        }
    }

    async fn read_tender(&self, tender_id: TenderId) -> AppResult<Tender> {
        self.tenders
            .find_by_id(tender_id)
            .await
            .context("read tender")?
            .ok_or_tender_not_found()
    }

    /// Require `user_id` among the responsible users of the tender's organization.
    async fn ensure_responsible(&self, user_id: UserId, tender: &Tender) -> AppResult<()> {
        let responsible = self
            .organizations
            .find_responsible_users(&[tender.organization_id])
            .await
            .context("read responsible users")?;

        if !responsible.contains(&user_id) {
            debug!(user_id = %user_id, tender_id = %tender.id, "Not responsible for tender");
            return Err(AppError::NotEnoughRights);
        }
        Ok(())
    }
}

#[async_trait]
impl TenderService for TenderManager {
    async fn create_tender(&self, new_tender: NewTender, username: &str) -> AppResult<Tender> {
        let tender = Tender::create(new_tender);
        resolve_user(self.users.as_ref(), username).await?;

        self.tenders
            .create(&tender)
            .await
            .context("create tender")?;

        info!(
            tender_id = %tender.id,
            organization_id = %tender.organization_id,
            "Tender created"
        );
        Ok(tender)
    }

    async fn list_tenders(
        &self,
        service_types: Vec<TenderServiceType>,
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>> {
        let service_types = if service_types.is_empty() {
            TenderServiceType::ALL.to_vec()
        } else {
            service_types
        };

        let tenders = self
            .tenders
            .list(&service_types, window)
            .await
            .context("list tender")?;

        if tenders.is_empty() {
            return Err(AppError::TenderNotFound);
        }
        Ok(tenders)
    }

    async fn list_my_tenders(
        &self,
        username: &str,
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>> {
        let user_id = resolve_user(self.users.as_ref(), username).await?;

        let organizations = self
            .organizations
            .find_organizations_by_user(user_id)
            .await
            .map_err(|e| {
                warn!(user_id = %user_id, error = %e, "Cannot resolve organizations");
                AppError::NotEnoughRights
            })?;

        let tenders = self
            .tenders
            .list_by_organizations(&organizations, window)
            .await
            .context("list tender")?;

        if tenders.is_empty() {
            return Err(AppError::TenderOrBidNotFound);
        }
        Ok(tenders)
    }

    async fn get_status(&self, tender_id: TenderId, username: &str) -> AppResult<TenderStatus> {
        let user_id = resolve_user(self.users.as_ref(), username).await?;
        let tender = self.read_tender(tender_id).await?;

        if !self.users.exists(user_id).await.context("check user")? {
            return Err(AppError::UserNotExists);
        }
        self.ensure_responsible(user_id, &tender).await?;

        Ok(tender.status)
    }

    async fn set_status(
        &self,
        tender_id: TenderId,
        username: &str,
        status: TenderStatus,
    ) -> AppResult<Tender> {
        let user_id = resolve_user(self.users.as_ref(), username).await?;
        let mut tender = self.read_tender(tender_id).await?;
        self.ensure_responsible(user_id, &tender).await?;

        self.tenders
            .update_status(tender_id, status)
            .await
            .context("update tender status")?;

        info!(tender_id = %tender_id, from = %tender.status, to = %status, "Tender status changed");
        tender.status = status;
        Ok(tender)
    }

    async fn edit_tender(
        &self,
        tender_id: TenderId,
        update: TenderUpdate,
        username: &str,
    ) -> AppResult<Tender> {
        update.service_type()?;

        let user_id = resolve_user(self.users.as_ref(), username).await?;
        let tender = self.read_tender(tender_id).await?;

        let organizations = self
            .organizations
            .find_organizations_by_user(user_id)
            .await
            .context("read organizations")?;
        if !organizations.contains(&tender.organization_id) {
            debug!(user_id = %user_id, tender_id = %tender_id, "Not responsible for tender");
            return Err(AppError::NotEnoughRights);
        }

        self.tenders
            .update(tender_id, &update)
            .await
            .context("update tender")?;

        info!(tender_id = %tender_id, "Tender edited");
        Ok(tender.apply(&update)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockOrganizationRepository, MockTenderRepository, MockUserRepository};
    use mockall::predicate::*;
    use uuid::Uuid;

    struct Mocks {
        tenders: MockTenderRepository,
        users: MockUserRepository,
        organizations: MockOrganizationRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                tenders: MockTenderRepository::new(),
                users: MockUserRepository::new(),
                organizations: MockOrganizationRepository::new(),
            }
        }

        fn known_user(mut self, user_id: UserId) -> Self {
            self.users
                .expect_find_user_id()
                .returning(move |_| Ok(Some(user_id)));
            self
        }

        fn build(self) -> TenderManager {
            TenderManager::new(
                Arc::new(self.tenders),
                Arc::new(self.users),
                Arc::new(self.organizations),
            )
        }
    }

    fn tender_for(organization_id: Uuid) -> Tender {
        Tender::create(NewTender {
            name: "Road repair".to_string(),
            description: "Patch potholes".to_string(),
            service_type: TenderServiceType::Construction,
            organization_id,
        })
    }

    #[tokio::test]
    async fn test_create_tender_unknown_user() {
        let mut mocks = Mocks::new();
        mocks.users.expect_find_user_id().returning(|_| Ok(None));
        mocks.tenders.expect_create().never();

        let result = mocks
            .build()
            .create_tender(
                NewTender {
                    name: "x".to_string(),
                    description: String::new(),
                    service_type: TenderServiceType::Delivery,
                    organization_id: Uuid::new_v4(),
                },
                "ghost",
            )
            .await;

        assert!(matches!(result, Err(AppError::UserNotExists)));
    }

    #[tokio::test]
    async fn test_create_tender_wraps_store_failure() {
        let mut mocks = Mocks::new().known_user(Uuid::new_v4());
        mocks
            .tenders
            .expect_create()
            .returning(|_| Err(AppError::internal("insert failed")));

        let result = mocks
            .build()
            .create_tender(
                NewTender {
                    name: "x".to_string(),
                    description: String::new(),
                    service_type: TenderServiceType::Delivery,
                    organization_id: Uuid::new_v4(),
                },
                "alice",
            )
            .await;

        match result {
            Err(AppError::Persistence { context, source }) => {
                assert_eq!(context, "create tender");
                assert!(matches!(*source, AppError::Internal(_)));
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_tenders_defaults_to_all_service_types() {
        let mut mocks = Mocks::new();
        mocks
            .tenders
            .expect_list()
            .withf(|types, _| types == TenderServiceType::ALL.as_slice())
            .returning(|_, _| Ok(vec![tender_for(Uuid::new_v4())]));

        let tenders = mocks
            .build()
            .list_tenders(Vec::new(), LimitOffset::UNBOUNDED)
            .await
            .unwrap();

        assert_eq!(tenders.len(), 1);
    }

    #[tokio::test]
    async fn test_list_tenders_empty_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.tenders.expect_list().returning(|_, _| Ok(Vec::new()));

        let result = mocks
            .build()
            .list_tenders(vec![TenderServiceType::Delivery], LimitOffset::UNBOUNDED)
            .await;

        assert!(matches!(result, Err(AppError::TenderNotFound)));
    }

    #[tokio::test]
    async fn test_list_tenders_store_failure_has_context() {
        let mut mocks = Mocks::new();
        mocks
            .tenders
            .expect_list()
            .returning(|_, _| Err(AppError::internal("timeout")));

        let err = mocks
            .build()
            .list_tenders(Vec::new(), LimitOffset::UNBOUNDED)
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("list tender"));
    }

    #[tokio::test]
    async fn test_list_my_tenders_organization_failure_is_not_enough_rights() {
        let mut mocks = Mocks::new().known_user(Uuid::new_v4());
        mocks
            .organizations
            .expect_find_organizations_by_user()
            .returning(|_| Err(AppError::internal("down")));

        let result = mocks
            .build()
            .list_my_tenders("alice", LimitOffset::UNBOUNDED)
            .await;

        assert!(matches!(result, Err(AppError::NotEnoughRights)));
    }

    #[tokio::test]
    async fn test_list_my_tenders_empty_is_tender_or_bid_not_found() {
        let org = Uuid::new_v4();
        let mut mocks = Mocks::new().known_user(Uuid::new_v4());
        mocks
            .organizations
            .expect_find_organizations_by_user()
            .returning(move |_| Ok(vec![org]));
        mocks
            .tenders
            .expect_list_by_organizations()
            .withf(move |organizations, _| organizations.to_vec() == vec![org])
            .returning(|_, _| Ok(Vec::new()));

        let result = mocks
            .build()
            .list_my_tenders("alice", LimitOffset::UNBOUNDED)
            .await;

        assert!(matches!(result, Err(AppError::TenderOrBidNotFound)));
    }

    #[tokio::test]
    async fn test_get_status_missing_tender() {
        let mut mocks = Mocks::new().known_user(Uuid::new_v4());
        mocks.tenders.expect_find_by_id().returning(|_| Ok(None));

        let result = mocks.build().get_status(Uuid::new_v4(), "alice").await;

        assert!(matches!(result, Err(AppError::TenderNotFound)));
    }

    #[tokio::test]
    async fn test_get_status_rechecks_user_existence() {
        let tender = tender_for(Uuid::new_v4());
        let mut mocks = Mocks::new().known_user(Uuid::new_v4());
        mocks
            .tenders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(tender.clone())));
        mocks.users.expect_exists().returning(|_| Ok(false));
        mocks.organizations.expect_find_responsible_users().never();

        let result = mocks.build().get_status(Uuid::new_v4(), "alice").await;

        assert!(matches!(result, Err(AppError::UserNotExists)));
    }

    #[tokio::test]
    async fn test_set_status_requires_responsibility() {
        let tender = tender_for(Uuid::new_v4());
        let mut mocks = Mocks::new().known_user(Uuid::new_v4());
        mocks
            .tenders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(tender.clone())));
        mocks
            .organizations
            .expect_find_responsible_users()
            .returning(|_| Ok(vec![Uuid::new_v4()]));
        mocks.tenders.expect_update_status().never();

        let result = mocks
            .build()
            .set_status(Uuid::new_v4(), "mallory", TenderStatus::Closed)
            .await;

        assert!(matches!(result, Err(AppError::NotEnoughRights)));
    }

    #[tokio::test]
    async fn test_set_status_persists_new_status() {
        let user_id = Uuid::new_v4();
        let tender = tender_for(Uuid::new_v4());
        let tender_id = tender.id;
        let mut mocks = Mocks::new().known_user(user_id);
        mocks
            .tenders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(tender.clone())));
        mocks
            .organizations
            .expect_find_responsible_users()
            .returning(move |_| Ok(vec![user_id]));
        mocks
            .tenders
            .expect_update_status()
            .with(eq(tender_id), eq(TenderStatus::Closed))
            .times(1)
            .returning(|_, _| Ok(()));

        let updated = mocks
            .build()
            .set_status(tender_id, "alice", TenderStatus::Closed)
            .await
            .unwrap();

        assert_eq!(updated.status, TenderStatus::Closed);
    }

    #[tokio::test]
    async fn test_edit_checks_service_type_first() {
        let mut mocks = Mocks::new();
        mocks.users.expect_find_user_id().never();
        mocks.tenders.expect_find_by_id().never();

        let update = TenderUpdate {
            service_type: Some("Catering".to_string()),
            ..Default::default()
        };
        let result = mocks
            .build()
            .edit_tender(Uuid::new_v4(), update, "alice")
            .await;

        assert!(matches!(result, Err(AppError::WrongInputFormat(_))));
    }

    #[tokio::test]
    async fn test_edit_user_without_organizations() {
        let tender = tender_for(Uuid::new_v4());
        let mut mocks = Mocks::new().known_user(Uuid::new_v4());
        mocks
            .tenders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(tender.clone())));
        mocks
            .organizations
            .expect_find_organizations_by_user()
            .returning(|_| Ok(Vec::new()));
        mocks.tenders.expect_update().never();

        let update = TenderUpdate {
            name: Some("New name".to_string()),
            ..Default::default()
        };
        let result = mocks
            .build()
            .edit_tender(Uuid::new_v4(), update, "alice")
            .await;

        assert!(matches!(result, Err(AppError::NotEnoughRights)));
    }
}
