//! Mock merge API and recording observer for testing

use async_trait::async_trait;
use pdf_merger::api::{Endpoints, HealthReport, MergeApi, MergeRequest};
use pdf_merger::error::{Error, Result};
use pdf_merger::session::SessionObserver;
use pdf_merger::types::{ApiStatus, FileEntry, SessionStatus};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Simple mock merge API
///
/// Features:
/// - Call tracking for verification
/// - Configurable merge body and health report
/// - Rejection (non-2xx) and transport error injection
/// - Holding a merge open until the test releases it
pub struct MockMergeApi {
    endpoints: Endpoints,
    merge_body: Mutex<Vec<u8>>,
    health_report: Mutex<HealthReport>,
    // Call tracking
    merge_calls: Mutex<Vec<MergeRequest>>,
    health_calls: Mutex<usize>,
    // Error injection
    merge_rejection: Mutex<Option<(u16, String)>>,
    error_on_merge: Mutex<Option<String>>,
    error_on_health: Mutex<Option<String>>,
    // Request gating
    merge_started: Arc<Notify>,
    merge_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockMergeApi {
    /// Create a mock that merges successfully and reports healthy
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            merge_body: Mutex::new(b"%PDF-1.7 merged".to_vec()),
            health_report: Mutex::new(HealthReport {
                status: 200,
                details: Some(serde_json::json!({ "status": "healthy" })),
            }),
            merge_calls: Mutex::new(Vec::new()),
            health_calls: Mutex::new(0),
            merge_rejection: Mutex::new(None),
            error_on_merge: Mutex::new(None),
            error_on_health: Mutex::new(None),
            merge_started: Arc::new(Notify::new()),
            merge_gate: Mutex::new(None),
        }
    }

    // === Response configuration ===

    /// Set the body returned by a successful merge
    pub fn set_merge_body(&self, body: &[u8]) {
        *self.merge_body.lock().unwrap() = body.to_vec();
    }

    /// Set the report returned by the health probe
    pub fn set_health_report(&self, report: HealthReport) {
        *self.health_report.lock().unwrap() = report;
    }

    // === Error injection ===

    /// Make `merge` answer with a non-2xx status and message
    pub fn reject_merge(&self, status: u16, message: &str) {
        *self.merge_rejection.lock().unwrap() = Some((status, message.to_string()));
    }

    /// Make `merge` fail as if the server were unreachable
    pub fn fail_merge(&self, msg: &str) {
        *self.error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `health` fail as if the server were unreachable
    pub fn fail_health(&self, msg: &str) {
        *self.error_on_health.lock().unwrap() = Some(msg.to_string());
    }

    /// Clear injected merge rejections and transport errors
    pub fn clear_merge_failures(&self) {
        *self.merge_rejection.lock().unwrap() = None;
        *self.error_on_merge.lock().unwrap() = None;
    }

    // === Request gating ===

    /// Hold every merge open until the returned handle is notified
    pub fn hold_merges(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.merge_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Wait until a merge request has reached the mock
    pub async fn merge_started(&self) {
        self.merge_started.notified().await;
    }

    // === Call inspection ===

    /// All merge requests received
    pub fn merge_calls(&self) -> Vec<MergeRequest> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Number of health probes received
    pub fn health_calls(&self) -> usize {
        *self.health_calls.lock().unwrap()
    }
}

fn unreachable(msg: &str) -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        msg.to_string(),
    ))
}

#[async_trait]
impl MergeApi for MockMergeApi {
    async fn health(&self) -> Result<HealthReport> {
        *self.health_calls.lock().unwrap() += 1;
        if let Some(msg) = self.error_on_health.lock().unwrap().as_deref() {
            return Err(unreachable(msg));
        }
        Ok(self.health_report.lock().unwrap().clone())
    }

    async fn merge(&self, request: MergeRequest) -> Result<Vec<u8>> {
        self.merge_calls.lock().unwrap().push(request);
        self.merge_started.notify_one();
        let gate = self.merge_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(msg) = self.error_on_merge.lock().unwrap().as_deref() {
            return Err(unreachable(msg));
        }
        if let Some((status, message)) = self.merge_rejection.lock().unwrap().clone() {
            return Err(Error::MergeRejected { status, message });
        }
        Ok(self.merge_body.lock().unwrap().clone())
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Observer that records every notification
#[derive(Default)]
pub struct RecordingObserver {
    pub statuses: Mutex<Vec<SessionStatus>>,
    pub api_statuses: Mutex<Vec<ApiStatus>>,
    pub alerts: Mutex<Vec<String>>,
    pub file_counts: Mutex<Vec<usize>>,
    pub metadata: Mutex<Vec<(String, String)>>,
}

impl RecordingObserver {
    pub fn statuses(&self) -> Vec<SessionStatus> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn api_statuses(&self) -> Vec<ApiStatus> {
        self.api_statuses.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn file_counts(&self) -> Vec<usize> {
        self.file_counts.lock().unwrap().clone()
    }

    pub fn metadata(&self) -> Vec<(String, String)> {
        self.metadata.lock().unwrap().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn files_changed(&self, files: &[FileEntry]) {
        self.file_counts.lock().unwrap().push(files.len());
    }

    fn metadata_changed(&self, title: &str, author: &str) {
        self.metadata
            .lock()
            .unwrap()
            .push((title.to_string(), author.to_string()));
    }

    fn status_changed(&self, status: SessionStatus) {
        self.statuses.lock().unwrap().push(status);
    }

    fn api_status_changed(&self, status: ApiStatus) {
        self.api_statuses.lock().unwrap().push(status);
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
