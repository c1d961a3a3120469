//! Shared fixtures for the service integration tests.

use std::sync::Arc;

use domain::{NewTender, OrganizationId, TenderServiceType, UserId};
use procurement_service_lib::repository::InMemoryStore;
use procurement_service_lib::service::{BidManager, TenderManager};

/// One organization with a responsible employee, plus an unrelated employee.
pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub tenders: TenderManager,
    pub bids: BidManager,
    pub organization_id: OrganizationId,
    pub owner_id: UserId,
    pub outsider_id: UserId,
}

pub const OWNER: &str = "owner";
pub const OUTSIDER: &str = "outsider";

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let organization_id = store.add_organization().await;
        let owner_id = store.add_user(OWNER).await;
        let outsider_id = store.add_user(OUTSIDER).await;
        store.add_responsible(organization_id, owner_id).await;

        let tenders = TenderManager::new(store.clone(), store.clone(), store.clone());
        let bids = BidManager::new(store.clone(), store.clone(), store.clone(), store.clone());

        Self {
            store,
            tenders,
            bids,
            organization_id,
            owner_id,
            outsider_id,
        }
    }

    pub fn new_tender(&self, name: &str, service_type: TenderServiceType) -> NewTender {
        NewTender {
            name: name.to_string(),
            description: format!("{name} description"),
            service_type,
            organization_id: self.organization_id,
        }
    }
}
