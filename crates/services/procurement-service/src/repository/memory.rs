//! In-memory implementation of every repository trait.
//!
//! Intended for tests and local development. Orderings match the SQL stores:
//! listings sort by name, and limit/offset apply after filtering.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BidRepository, OrganizationRepository, TenderRepository, UserRepository};
use common::AppResult;
use domain::{
    Bid, BidId, LimitOffset, OrganizationId, Tender, TenderId, TenderServiceType, TenderStatus,
    TenderUpdate, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    employees: HashMap<UserId, String>,
    organizations: Vec<OrganizationId>,
    /// (organization, responsible user) pairs
    responsibles: Vec<(OrganizationId, UserId)>,
    tenders: Vec<Tender>,
    bids: Vec<Bid>,
}

/// Shared in-memory store backing all four repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an employee and return its id.
    pub async fn add_user(&self, username: &str) -> UserId {
        let id = Uuid::new_v4();
        self.tables
            .write()
            .await
            .employees
            .insert(id, username.to_string());
        id
    }

    /// Register an organization and return its id.
    pub async fn add_organization(&self) -> OrganizationId {
        let id = Uuid::new_v4();
        self.tables.write().await.organizations.push(id);
        id
    }

    /// Make `user_id` responsible for `organization_id`.
    pub async fn add_responsible(&self, organization_id: OrganizationId, user_id: UserId) {
        self.tables
            .write()
            .await
            .responsibles
            .push((organization_id, user_id));
    }

    /// Snapshot of a stored tender, bypassing any service logic.
    pub async fn tender(&self, id: TenderId) -> Option<Tender> {
        self.tables
            .read()
            .await
            .tenders
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_user_id(&self, username: &str) -> AppResult<Option<UserId>> {
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .iter()
            .find(|(_, name)| name.as_str() == username)
            .map(|(id, _)| *id))
    }

    async fn exists(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.tables.read().await.employees.contains_key(&user_id))
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryStore {
    async fn find_organizations_by_user(&self, user_id: UserId) -> AppResult<Vec<OrganizationId>> {
        let tables = self.tables.read().await;
        Ok(tables
            .responsibles
            .iter()
            .filter(|(_, user)| *user == user_id)
            .map(|(org, _)| *org)
            .collect())
    }

    async fn find_responsible_users(
        &self,
        organization_ids: &[OrganizationId],
    ) -> AppResult<Vec<UserId>> {
        let tables = self.tables.read().await;
        Ok(tables
            .responsibles
            .iter()
            .filter(|(org, _)| organization_ids.contains(org))
            .map(|(_, user)| *user)
            .collect())
    }

    async fn exists(&self, organization_id: OrganizationId) -> AppResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .organizations
            .contains(&organization_id))
    }
}

#[async_trait]
impl TenderRepository for InMemoryStore {
    async fn create(&self, tender: &Tender) -> AppResult<()> {
        self.tables.write().await.tenders.push(tender.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TenderId) -> AppResult<Option<Tender>> {
        Ok(self.tender(id).await)
    }

    async fn list(
        &self,
        service_types: &[TenderServiceType],
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>> {
        let tables = self.tables.read().await;
        let mut matching: Vec<Tender> = tables
            .tenders
            .iter()
            .filter(|t| t.status == TenderStatus::Published)
            .filter(|t| service_types.contains(&t.service_type))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(window.slice(matching))
    }

    async fn list_by_organizations(
        &self,
        organization_ids: &[OrganizationId],
        window: LimitOffset,
    ) -> AppResult<Vec<Tender>> {
        let tables = self.tables.read().await;
        let mut matching: Vec<Tender> = tables
            .tenders
            .iter()
            .filter(|t| organization_ids.contains(&t.organization_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(window.slice(matching))
    }

    async fn update_status(&self, id: TenderId, status: TenderStatus) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(tender) = tables.tenders.iter_mut().find(|t| t.id == id) {
            tender.status = status;
        }
        Ok(())
    }

    async fn update(&self, id: TenderId, update: &TenderUpdate) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(tender) = tables.tenders.iter_mut().find(|t| t.id == id) {
            *tender = tender.clone().apply(update)?;
        }
        Ok(())
    }
}

#[async_trait]
impl BidRepository for InMemoryStore {
    async fn create(&self, bid: &Bid) -> AppResult<()> {
        self.tables.write().await.bids.push(bid.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BidId) -> AppResult<Option<Bid>> {
        let tables = self.tables.read().await;
        Ok(tables.bids.iter().find(|b| b.id == id).cloned())
    }

    async fn list_by_author(&self, author_id: UserId) -> AppResult<Vec<Bid>> {
        let tables = self.tables.read().await;
        let mut matching: Vec<Bid> = tables
            .bids
            .iter()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matching)
    }

    async fn list_by_tender(&self, tender_id: TenderId) -> AppResult<Vec<Bid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bids
            .iter()
            .filter(|b| b.tender_id == tender_id)
            .cloned()
            .collect())
    }

    async fn find_responsible_users(&self, bid_ids: &[BidId]) -> AppResult<Vec<UserId>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bids
            .iter()
            .filter(|b| bid_ids.contains(&b.id))
            .map(|b| b.author_id)
            .collect())
    }
}
