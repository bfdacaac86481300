//! Downloadable references to merged output
//!
//! A [`DownloadRef`] is a scoped handle to bytes held by an
//! [`ArtifactRegistry`], the way a `blob:` URL points into browser memory.
//! Dropping the ref does not free the bytes; the owner has to call
//! [`ArtifactRegistry::revoke`].

use std::collections::HashMap;
use tracing::debug;

/// URL scheme used for issued references
const BLOB_SCHEME: &str = "blob:";

/// Filename stem used when the session title is empty
pub const DEFAULT_DOWNLOAD_STEM: &str = "merged-document";

/// Handle to a merged artifact held in a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRef {
    /// Opaque `blob:` URL identifying the bytes
    pub url: String,
    /// Length of the referenced data in bytes
    pub size: u64,
    /// Suggested filename for saving the artifact
    pub filename: String,
}

/// Suggested download filename for a session title
pub fn download_filename(title: &str) -> String {
    let stem = if title.is_empty() {
        DEFAULT_DOWNLOAD_STEM
    } else {
        title
    };
    format!("{stem}.pdf")
}

/// In-memory store of merged outputs, keyed by `blob:` URL
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    blobs: HashMap<String, Vec<u8>>,
}

impl ArtifactRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes and issue a reference to them
    pub fn create(&mut self, data: Vec<u8>, filename: String) -> DownloadRef {
        let url = format!("{BLOB_SCHEME}{}", uuid::Uuid::new_v4());
        let size = data.len() as u64;
        self.blobs.insert(url.clone(), data);
        debug!(%url, size, "created download reference");
        DownloadRef {
            url,
            size,
            filename,
        }
    }

    /// Bytes behind a reference, if it has not been revoked
    pub fn get(&self, download: &DownloadRef) -> Option<&[u8]> {
        self.blobs.get(&download.url).map(Vec::as_slice)
    }

    /// Release the bytes behind a reference.
    ///
    /// Returns `false` if the reference was already revoked.
    pub fn revoke(&mut self, download: &DownloadRef) -> bool {
        let removed = self.blobs.remove(&download.url).is_some();
        debug!(url = %download.url, removed, "revoked download reference");
        removed
    }

    /// Number of live references
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no references are live
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}
