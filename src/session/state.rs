//! Merge session state - pure transitions, no I/O
//!
//! Every mutation of the staged list and the status machine lives here so
//! it can be tested without a network or an observer.

use crate::artifact::DownloadRef;
use crate::error::{Error, Result};
use crate::types::{FileEntry, SessionStatus};
use tracing::debug;

/// Title sent when the user leaves the title empty
pub const DEFAULT_TITLE: &str = "Merged Document";

/// In-memory state of one merge attempt
#[derive(Debug, Clone)]
pub struct MergeSession {
    files: Vec<FileEntry>,
    title: String,
    author: String,
    default_author: String,
    status: SessionStatus,
    download: Option<DownloadRef>,
}

impl MergeSession {
    /// Create an empty session whose author resets to `default_author`
    pub fn new(default_author: impl Into<String>) -> Self {
        let default_author = default_author.into();
        Self {
            files: Vec::new(),
            title: String::new(),
            author: default_author.clone(),
            default_author,
            status: SessionStatus::Idle,
            download: None,
        }
    }

    /// Staged files in merge order
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Number of staged files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files are staged
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Title as typed (may be empty)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title to send: the typed title, or [`DEFAULT_TITLE`] if empty
    pub fn resolved_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// Author to send
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Processing status
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Held download reference (present while `Ready`)
    pub const fn download(&self) -> Option<&DownloadRef> {
        self.download.as_ref()
    }

    /// Set the document title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set the document author
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    /// Append accepted entries to the end of the list
    pub fn add_entries(&mut self, entries: Vec<FileEntry>) -> usize {
        let added = entries.len();
        self.files.extend(entries);
        added
    }

    /// Move the entry at `from` to position `to`.
    ///
    /// Both indices must be in bounds; on error the list is untouched.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.files.len();
        for index in [from, to] {
            if index >= len {
                return Err(Error::InvalidIndex { index, len });
            }
        }

        let entry = self.files.remove(from);
        self.files.insert(to, entry);
        debug!(from, to, "moved staged file");
        Ok(())
    }

    /// Move the entry at `index` one position up. Index 0 stays put.
    pub fn move_up(&mut self, index: usize) -> Result<()> {
        if index == 0 {
            if self.files.is_empty() {
                return Err(Error::InvalidIndex { index, len: 0 });
            }
            return Ok(());
        }
        self.move_entry(index, index - 1)
    }

    /// Remove the entry with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|entry| entry.id != id);
        self.files.len() != before
    }

    /// Whether a submission may start now
    pub fn can_submit(&self) -> bool {
        !self.files.is_empty() && self.status == SessionStatus::Idle
    }

    /// Idle -> Submitting. Returns `false` (and changes nothing) if the
    /// guard does not hold.
    pub fn begin_submission(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.status = SessionStatus::Submitting;
        true
    }

    /// Submitting -> Ready, holding the merged result
    pub fn complete_submission(&mut self, download: DownloadRef) -> Result<()> {
        if self.status != SessionStatus::Submitting {
            return Err(Error::Internal(format!(
                "cannot complete a submission while {}",
                self.status
            )));
        }
        self.download = Some(download);
        self.status = SessionStatus::Ready;
        Ok(())
    }

    /// Submitting -> Idle after a failure
    pub fn fail_submission(&mut self) {
        if self.status == SessionStatus::Submitting {
            self.status = SessionStatus::Idle;
        }
    }

    /// Return to the initial state.
    ///
    /// Hands back the held download reference so the caller can revoke it.
    #[must_use = "the returned reference must be revoked"]
    pub fn reset(&mut self) -> Option<DownloadRef> {
        self.files.clear();
        self.title.clear();
        self.author.clone_from(&self.default_author);
        self.status = SessionStatus::Idle;
        self.download.take()
    }
}

impl Default for MergeSession {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_AUTHOR)
    }
}
