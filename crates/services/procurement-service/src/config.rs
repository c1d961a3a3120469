//! Procurement service configuration.

use common::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// Procurement service configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProcurementServiceConfig {
    /// Connection settings for the tender database
    pub database: DatabaseConfig,
}

impl ProcurementServiceConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database: DatabaseConfig::from_env(),
        }
    }
}
