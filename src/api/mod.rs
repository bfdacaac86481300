//! Client for the remote PDF merge service
//!
//! The service is opaque: it takes a multipart upload and answers with the
//! merged PDF, and it exposes a health endpoint. [`MergeApi`] is the only
//! way the orchestrator talks to it, so tests can swap in a mock.

mod endpoints;
mod http;

pub use endpoints::{EndpointLayout, Endpoints, is_loopback};
pub use http::{HttpMergeApi, extract_error_message};

use crate::error::Result;
use crate::types::MergeOptions;
use async_trait::async_trait;

/// Multipart field carrying each file (repeated, in merge order)
pub const FILES_FIELD: &str = "files";

/// One file part of a merge request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    /// Original filename
    pub name: String,
    /// Declared MIME type
    pub mime_type: String,
    /// File content
    pub data: Vec<u8>,
}

/// Everything sent in one merge request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Files in merge order
    pub files: Vec<UploadPart>,
    /// Document title (already defaulted if the user left it empty)
    pub title: String,
    /// Document author
    pub author: String,
    /// Fixed processing options
    pub options: MergeOptions,
}

/// Outcome of a health probe that reached the server
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    /// HTTP status code
    pub status: u16,
    /// Response body, if it was JSON. Informational only.
    pub details: Option<serde_json::Value>,
}

impl HealthReport {
    /// Whether the probe answered with a 2xx status
    pub const fn is_healthy(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Merge service operations
#[async_trait]
pub trait MergeApi: Send + Sync {
    /// Probe the health endpoint.
    ///
    /// Returns `Err` only when the server could not be reached; any HTTP
    /// answer produces a report.
    async fn health(&self) -> Result<HealthReport>;

    /// Submit a merge request and return the merged PDF bytes.
    ///
    /// Non-2xx answers are `Error::MergeRejected` carrying the message
    /// extracted from the body.
    async fn merge(&self, request: MergeRequest) -> Result<Vec<u8>>;

    /// The endpoints this client talks to
    fn endpoints(&self) -> &Endpoints;
}
