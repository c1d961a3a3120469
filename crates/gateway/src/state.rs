//! Application state for dependency injection.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use common::{AppError, AppResult};
use procurement_service_lib::service::{BidService, TenderService};
use procurement_service_lib::Services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub tenders: Arc<dyn TenderService>,
    pub bids: Arc<dyn BidService>,
    pub request_timeout: Duration,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services, request_timeout: Duration) -> Self {
        Self {
            tenders: services.tenders,
            bids: services.bids,
            request_timeout,
        }
    }

    /// Run a service call under the request deadline.
    ///
    /// On expiry the call is dropped, aborting any in-flight store access.
    pub async fn deadline<T>(&self, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Request deadline exceeded"
                );
                Err(AppError::Cancelled)
            }
        }
    }
}
