//! API health indicator
//!
//! Kept apart from [`MergeOrchestrator`](super::MergeOrchestrator) so a health
//! check can run while a merge request is still outstanding. Both take the same
//! `&dyn MergeApi`, and `check` only needs `&self`.

use crate::api::MergeApi;
use crate::session::SessionObserver;
use crate::types::ApiStatus;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Checks the merge service and holds the last result
pub struct HealthMonitor<'a> {
    api: &'a dyn MergeApi,
    observer: &'a dyn SessionObserver,
    status: Mutex<ApiStatus>,
}

impl<'a> HealthMonitor<'a> {
    /// Create a monitor that has not checked yet
    pub fn new(api: &'a dyn MergeApi, observer: &'a dyn SessionObserver) -> Self {
        Self {
            api,
            observer,
            status: Mutex::new(ApiStatus::Unknown),
        }
    }

    /// Last known status
    pub fn status(&self) -> ApiStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Query the health endpoint and update the indicator.
    ///
    /// Healthy on any 2xx; non-2xx and transport failures are `Error`. No
    /// alert is raised either way.
    pub async fn check(&self) -> ApiStatus {
        self.set_status(ApiStatus::Checking);

        let status = match self.api.health().await {
            Ok(report) if report.is_healthy() => {
                debug!(details = ?report.details, "API health check passed");
                ApiStatus::Healthy
            }
            Ok(report) => {
                warn!(status = report.status, "API health check failed");
                ApiStatus::Error
            }
            Err(e) => {
                warn!(error = %e, "API health check failed");
                ApiStatus::Error
            }
        };

        self.set_status(status);
        status
    }

    fn set_status(&self, status: ApiStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
        self.observer.api_status_changed(status);
    }
}
