//! Procurement Service Library
//!
//! Tender and bid management on top of PostgreSQL. The services are
//! stateless and are embedded by the HTTP gateway.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};

use crate::config::ProcurementServiceConfig;
use crate::infra::Database;
use crate::repository::{BidStore, InMemoryStore, OrganizationStore, TenderStore, UserStore};
use crate::service::{BidManager, BidService, TenderManager, TenderService};

/// The service handles exposed to the transport layer.
#[derive(Clone)]
pub struct Services {
    pub tenders: Arc<dyn TenderService>,
    pub bids: Arc<dyn BidService>,
}

impl Services {
    /// Wire services over the SQL stores.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let organizations = Arc::new(OrganizationStore::new(db.clone()));
        let tenders = Arc::new(TenderStore::new(db.clone()));
        let bids = Arc::new(BidStore::new(db));

        Self {
            tenders: Arc::new(TenderManager::new(
                tenders.clone(),
                users.clone(),
                organizations.clone(),
            )),
            bids: Arc::new(BidManager::new(bids, tenders, users, organizations)),
        }
    }

    /// Wire services over a single in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            tenders: Arc::new(TenderManager::new(
                store.clone(),
                store.clone(),
                store.clone(),
            )),
            bids: Arc::new(BidManager::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store,
            )),
        }
    }
}

/// Connect to the database described by `config` and build the services.
pub async fn connect(config: &ProcurementServiceConfig) -> Result<(Database, Services), DbErr> {
    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    let services = Services::from_connection(db.get_connection());
    Ok((db, services))
}
