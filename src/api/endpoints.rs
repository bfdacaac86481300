//! Endpoint resolution for the merge service
//!
//! Local development servers mount the service under `/api`; deployed
//! instances serve it at the root. Which convention applies is decided from
//! the base address unless the layout is pinned in configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use url::{Host, Url};

/// Path convention for the merge and health endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointLayout {
    /// Pick `Local` for loopback hosts, `Remote` otherwise
    #[default]
    Auto,
    /// `/api/health` and `/api/merge`
    Local,
    /// `/health` and `/merge`
    Remote,
}

/// Resolved request URLs for one API base address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    local: bool,
}

impl Endpoints {
    /// Build endpoints for a base address
    pub fn new(base: &Url, layout: EndpointLayout) -> Self {
        let local = match layout {
            EndpointLayout::Auto => is_loopback(base),
            EndpointLayout::Local => true,
            EndpointLayout::Remote => false,
        };

        Self {
            base: base.as_str().trim_end_matches('/').to_string(),
            local,
        }
    }

    /// Parse a base address and build endpoints for it
    pub fn parse(base: &str, layout: EndpointLayout) -> Result<Self> {
        let url = crate::config::parse_api_url(base)?;
        Ok(Self::new(&url, layout))
    }

    /// Base address without trailing slash
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether the local (`/api`-prefixed) convention is in use
    pub const fn is_local(&self) -> bool {
        self.local
    }

    /// Full URL of the health probe
    pub fn health_url(&self) -> String {
        let path = if self.local { "/api/health" } else { "/health" };
        format!("{}{path}", self.base)
    }

    /// Full URL of the merge endpoint
    pub fn merge_url(&self) -> String {
        let path = if self.local { "/api/merge" } else { "/merge" };
        format!("{}{path}", self.base)
    }
}

/// Whether a URL points at this machine
pub fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
