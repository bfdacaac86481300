//! Shared command context for CLI commands

use pdf_merger::api::HttpMergeApi;
use pdf_merger::config::ClientConfig;
use pdf_merger::error::Result;
use pdf_merger::session::MergeSession;
use std::path::Path;
use tracing::debug;

/// Configuration and API client shared by merge and health
pub struct CommandContext {
    /// Resolved configuration
    pub config: ClientConfig,
    /// Merge service client
    pub api: HttpMergeApi,
}

impl CommandContext {
    /// Resolve configuration and build the API client
    pub fn new(api_url: Option<&str>, config_file: Option<&Path>) -> Result<Self> {
        let config = ClientConfig::load(api_url, config_file)?;
        let api = HttpMergeApi::from_config(&config)?;
        debug!(
            api_url = %config.api_url,
            layout = ?config.endpoint_layout,
            "resolved configuration"
        );
        Ok(Self { config, api })
    }

    /// Fresh session using the configured default author
    pub fn new_session(&self) -> MergeSession {
        MergeSession::new(self.config.author.clone())
    }
}
