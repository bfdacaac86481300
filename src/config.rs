//! Client configuration
//!
//! The API base address comes from, in order: the `--api-url` flag, the
//! `MERGE_API_URL` environment variable, `api_url` in the config file, and
//! finally the local development default.

use crate::api::EndpointLayout;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable holding the API base address
pub const API_URL_ENV: &str = "MERGE_API_URL";

/// Base address used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8002";

/// Author attached to merge requests unless overridden
pub const DEFAULT_AUTHOR: &str = "HuberSoftware";

/// Directory name for pdfmerge within the user config dir
const CONFIG_DIR: &str = "pdfmerge";

/// Filename for the config file
const CONFIG_FILE: &str = "config.toml";

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// API base address
    pub api_url: Option<String>,
    /// Default author for merged documents
    pub author: Option<String>,
    /// Path convention for the merge and health endpoints
    pub endpoint_layout: Option<EndpointLayout>,
    /// Request timeout; unset means requests never time out
    pub timeout_secs: Option<u64>,
}

/// Fully resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base address
    pub api_url: Url,
    /// Default author for merged documents
    pub author: String,
    /// Path convention for the merge and health endpoints
    pub endpoint_layout: EndpointLayout,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Resolve configuration from explicit sources.
    ///
    /// Empty strings count as unset, for both the flag and the environment.
    pub fn resolve(
        flag_url: Option<&str>,
        env_url: Option<&str>,
        file: FileConfig,
    ) -> Result<Self> {
        let raw_url = [flag_url, env_url, file.api_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL);

        let api_url = parse_api_url(raw_url)?;

        let author = file
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        Ok(Self {
            api_url,
            author,
            endpoint_layout: file.endpoint_layout.unwrap_or_default(),
            timeout: file.timeout_secs.map(Duration::from_secs),
        })
    }

    /// Load configuration from the process environment and the config file.
    ///
    /// `config_file` overrides the default config location.
    pub fn load(flag_url: Option<&str>, config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => load_file_config(path)?,
            None => config_path()
                .map(|path| load_file_config(&path))
                .transpose()?
                .unwrap_or_default(),
        };
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::resolve(flag_url, env_url.as_deref(), file)
    }
}

/// Parse and validate an API base address
pub fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::Config(format!("invalid API URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "unsupported scheme '{other}' in API URL '{raw}'"
        ))),
    }
}

/// Default config file location, if the platform has a config dir
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config file.
///
/// Returns defaults if the file doesn't exist.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_when_nothing_set() {
        let config = ClientConfig::resolve(None, None, FileConfig::default()).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8002/");
        assert_eq!(config.author, "HuberSoftware");
        assert_eq!(config.endpoint_layout, EndpointLayout::Auto);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_flag_beats_env_beats_file() {
        let file = FileConfig {
            api_url: Some("https://file.example.com".to_string()),
            ..FileConfig::default()
        };

        let config =
            ClientConfig::resolve(Some("https://flag.example.com"), Some("https://env.example.com"), file.clone())
                .unwrap();
        assert_eq!(config.api_url.host_str(), Some("flag.example.com"));

        let config = ClientConfig::resolve(None, Some("https://env.example.com"), file.clone()).unwrap();
        assert_eq!(config.api_url.host_str(), Some("env.example.com"));

        let config = ClientConfig::resolve(None, None, file).unwrap();
        assert_eq!(config.api_url.host_str(), Some("file.example.com"));
    }

    #[test]
    fn test_empty_env_counts_as_unset() {
        let config = ClientConfig::resolve(None, Some(""), FileConfig::default()).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8002/");
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let result = ClientConfig::resolve(Some("not a url"), None, FileConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));

        let result = ClientConfig::resolve(Some("ftp://example.com"), None, FileConfig::default());
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("ftp")));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let file = load_file_config(&temp.path().join("config.toml")).unwrap();
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn test_load_file_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "api_url = \"https://merge.example.com/prod\"\nauthor = \"Docs Team\"\nendpoint_layout = \"local\"\ntimeout_secs = 45\n",
        )
        .unwrap();

        let file = load_file_config(&path).unwrap();
        let config = ClientConfig::resolve(None, None, file).unwrap();
        assert_eq!(config.api_url.path(), "/prod");
        assert_eq!(config.author, "Docs Team");
        assert_eq!(config.endpoint_layout, EndpointLayout::Local);
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "endpoint_layout = \"sideways\"").unwrap();

        let result = load_file_config(&path);
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("failed to parse")));
    }
}
