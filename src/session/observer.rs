//! Session change notifications

use crate::types::{ApiStatus, FileEntry, SessionStatus};

/// Receives session changes as they happen.
///
/// All methods default to no-ops so implementors only override what they
/// render.
pub trait SessionObserver: Send + Sync {
    /// The staged file list changed
    fn files_changed(&self, _files: &[FileEntry]) {}

    /// The document title or author changed
    fn metadata_changed(&self, _title: &str, _author: &str) {}

    /// The processing status changed
    fn status_changed(&self, _status: SessionStatus) {}

    /// The API health indicator changed
    fn api_status_changed(&self, _status: ApiStatus) {}

    /// A failure must be shown to the user before continuing
    fn alert(&self, _message: &str) {}
}

/// Observer that ignores every notification
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
