//! Core types for pdf-merger

use std::path::PathBuf;

/// Where the bytes of a picked file live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// File on disk, read when the merge request is built
    Path(PathBuf),
    /// Bytes already in memory
    Bytes(Vec<u8>),
}

/// A raw picked file, before it passes the type filter
///
/// This is what a file picker or a drop hands over: a name, the declared
/// content type and a size, plus a way to get at the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// Original filename
    pub name: String,
    /// Declared MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
    /// Content source
    pub content: FileContent,
}

impl FileHandle {
    /// Create a handle over in-memory bytes
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: data.len() as u64,
            content: FileContent::Bytes(data),
        }
    }

    /// Read the full content of the handle
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.content {
            FileContent::Bytes(data) => Ok(data.clone()),
            FileContent::Path(path) => tokio::fs::read(path).await,
        }
    }
}

/// One staged file awaiting merge
///
/// Never mutated after creation; only its position in the session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Opaque list-stable key
    pub id: String,
    /// Original filename
    pub display_name: String,
    /// Human-readable size ("1.50 KB")
    pub size_label: String,
    /// Declared MIME type (always in the allow-list)
    pub mime_type: String,
    /// The handle this entry was created from
    pub handle: FileHandle,
}

/// Processing status of a merge session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Nothing in flight, no result held
    #[default]
    Idle,
    /// Merge request in flight
    Submitting,
    /// A merged result is available for download
    Ready,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// Result of the last health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    /// No probe issued yet
    #[default]
    Unknown,
    /// Probe in flight
    Checking,
    /// Last probe answered 2xx
    Healthy,
    /// Last probe failed
    Error,
}

impl ApiStatus {
    /// Label shown next to the status indicator
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "API Status Unknown",
            Self::Checking => "Checking API...",
            Self::Healthy => "API Connected",
            Self::Error => "API Error",
        }
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Page size policy sent to the merge service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// Keep each page at its source size
    #[default]
    Fit,
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fit => write!(f, "fit"),
        }
    }
}

/// Fixed processing options attached to every merge request
///
/// Not user-configurable; kept typed so the request builder has one place
/// to read them from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOptions {
    /// Page size policy
    pub page_size: PageSize,
    /// Ask the service to compress the output
    pub compress: bool,
}
