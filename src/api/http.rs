//! reqwest implementation of the merge service client

use crate::api::{Endpoints, FILES_FIELD, HealthReport, MergeApi, MergeRequest};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("pdf-merger/", env!("CARGO_PKG_VERSION"));

/// Message used when the error body is JSON without an `error` string
pub const GENERIC_MERGE_ERROR: &str = "Failed to merge PDFs";

/// Message used when the error body is not JSON at all
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Merge service client using reqwest
pub struct HttpMergeApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpMergeApi {
    /// Create a client for the given endpoints.
    ///
    /// With `timeout` unset, requests wait for the server indefinitely.
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, endpoints })
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let endpoints = Endpoints::new(&config.api_url, config.endpoint_layout);
        Self::new(endpoints, config.timeout)
    }
}

/// Encode a merge request as a multipart form
fn build_form(request: MergeRequest) -> Result<Form> {
    let mut form = Form::new();

    for file in request.files {
        let part = Part::bytes(file.data)
            .file_name(file.name)
            .mime_str(&file.mime_type)
            .map_err(|e| Error::Internal(format!("invalid MIME type '{}': {e}", file.mime_type)))?;
        form = form.part(FILES_FIELD, part);
    }

    Ok(form
        .text("title", request.title)
        .text("author", request.author)
        .text("pageSize", request.options.page_size.to_string())
        .text("compress", request.options.compress.to_string()))
}

/// Pull a user-facing message out of an error response body.
///
/// `{"error": "..."}` yields the string; other JSON yields
/// [`GENERIC_MERGE_ERROR`]; a body that is not JSON yields [`UNKNOWN_ERROR`].
pub fn extract_error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .filter(|msg| !msg.is_empty())
            .map_or_else(|| GENERIC_MERGE_ERROR.to_string(), ToString::to_string),
        Err(_) => UNKNOWN_ERROR.to_string(),
    }
}

#[async_trait]
impl MergeApi for HttpMergeApi {
    async fn health(&self) -> Result<HealthReport> {
        let url = self.endpoints.health_url();
        debug!(%url, "checking API health");

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default();
        let details = serde_json::from_slice(&body).ok();

        debug!(status, ?details, "API health response");
        Ok(HealthReport { status, details })
    }

    async fn merge(&self, request: MergeRequest) -> Result<Vec<u8>> {
        let url = self.endpoints.merge_url();
        debug!(%url, files = request.files.len(), title = %request.title, "posting merge request");

        let form = build_form(request)?;
        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            debug!(bytes = body.len(), "merge succeeded");
            return Ok(body.to_vec());
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = extract_error_message(&body);
        warn!(status = status.as_u16(), %message, "merge rejected");
        Err(Error::MergeRejected {
            status: status.as_u16(),
            message,
        })
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}
