//! Merge orchestrator - applies user actions and drives the merge service

use crate::api::{MergeApi, MergeRequest, UploadPart};
use crate::artifact::{ArtifactRegistry, DownloadRef, download_filename};
use crate::error::Result;
use crate::intake::accept_batch;
use crate::session::{MergeSession, SessionObserver};
use crate::types::{FileHandle, MergeOptions, SessionStatus};
use tracing::{debug, info, warn};

/// Result of a submit call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Guard did not hold (no files, or not idle); nothing was sent
    Skipped,
    /// The service returned a merged document
    Merged(DownloadRef),
    /// The merge failed; carries the alert text shown to the user
    Failed(String),
}

/// Owns a merge session and performs its side effects
///
/// Every method takes `&mut self`, so at most one submission is in flight
/// per orchestrator. Health probes go through
/// [`HealthMonitor`](super::HealthMonitor) and may overlap a submission.
pub struct MergeOrchestrator<'a> {
    session: MergeSession,
    artifacts: ArtifactRegistry,
    options: MergeOptions,
    api: &'a dyn MergeApi,
    observer: &'a dyn SessionObserver,
}

impl<'a> MergeOrchestrator<'a> {
    /// Create an orchestrator with an empty session
    pub fn new(api: &'a dyn MergeApi, observer: &'a dyn SessionObserver) -> Self {
        Self::with_session(MergeSession::default(), api, observer)
    }

    /// Create an orchestrator around an existing session
    pub fn with_session(
        session: MergeSession,
        api: &'a dyn MergeApi,
        observer: &'a dyn SessionObserver,
    ) -> Self {
        Self {
            session,
            artifacts: ArtifactRegistry::new(),
            options: MergeOptions::default(),
            api,
            observer,
        }
    }

    /// Current session state
    pub const fn session(&self) -> &MergeSession {
        &self.session
    }

    /// Registry holding merged outputs
    pub const fn artifacts(&self) -> &ArtifactRegistry {
        &self.artifacts
    }

    /// Bytes of the held merged document, if any
    pub fn merged_bytes(&self) -> Option<&[u8]> {
        self.session
            .download()
            .and_then(|download| self.artifacts.get(download))
    }

    /// Stage a batch of picked or dropped files.
    ///
    /// Unsupported types are dropped without notice. Returns how many
    /// entries were added.
    pub fn intake<I>(&mut self, handles: I) -> usize
    where
        I: IntoIterator<Item = FileHandle>,
    {
        let added = self.session.add_entries(accept_batch(handles));
        debug!(added, total = self.session.len(), "staged files");
        if added > 0 {
            self.observer.files_changed(self.session.files());
        }
        added
    }

    /// Move the file at `from` to position `to`
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<()> {
        self.session.move_entry(from, to)?;
        self.observer.files_changed(self.session.files());
        Ok(())
    }

    /// Move the file at `index` one position up
    pub fn move_up(&mut self, index: usize) -> Result<()> {
        self.session.move_up(index)?;
        self.observer.files_changed(self.session.files());
        Ok(())
    }

    /// Remove a staged file by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.session.remove(id);
        if removed {
            self.observer.files_changed(self.session.files());
        }
        removed
    }

    /// Set the document title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.session.set_title(title);
        self.notify_metadata();
    }

    /// Set the document author
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.session.set_author(author);
        self.notify_metadata();
    }

    fn notify_metadata(&self) {
        self.observer
            .metadata_changed(self.session.title(), self.session.author());
    }

    /// Build the request for the current session, reading file contents
    pub async fn build_request(&self) -> Result<MergeRequest> {
        let mut files = Vec::with_capacity(self.session.len());
        for entry in self.session.files() {
            files.push(UploadPart {
                name: entry.display_name.clone(),
                mime_type: entry.mime_type.clone(),
                data: entry.handle.read().await?,
            });
        }

        Ok(MergeRequest {
            files,
            title: self.session.resolved_title().to_string(),
            author: self.session.author().to_string(),
            options: self.options,
        })
    }

    /// Send the staged files to the merge service.
    ///
    /// Does nothing unless files are staged and the session is idle. On
    /// failure the observer gets an alert and the session returns to idle
    /// with its files intact.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.session.begin_submission() {
            debug!(
                files = self.session.len(),
                status = %self.session.status(),
                "submit skipped"
            );
            return SubmitOutcome::Skipped;
        }
        self.observer.status_changed(SessionStatus::Submitting);
        info!(files = self.session.len(), "submitting merge");

        let api = self.api;
        let result = match self.build_request().await {
            Ok(request) => api.merge(request).await,
            Err(e) => Err(e),
        };

        let outcome = match result {
            Ok(data) => {
                let filename = download_filename(self.session.title());
                let download = self.artifacts.create(data, filename);
                match self.session.complete_submission(download.clone()) {
                    Ok(()) => {
                        info!(url = %download.url, size = download.size, "merge complete");
                        SubmitOutcome::Merged(download)
                    }
                    Err(e) => {
                        self.artifacts.revoke(&download);
                        self.fail(&e.to_string())
                    }
                }
            }
            Err(e) => self.fail(&e.to_string()),
        };

        self.observer.status_changed(self.session.status());
        outcome
    }

    fn fail(&mut self, reason: &str) -> SubmitOutcome {
        let message = format!("Failed to merge files: {reason}");
        warn!(%reason, "merge failed");
        self.observer.alert(&message);
        self.session.fail_submission();
        SubmitOutcome::Failed(message)
    }

    /// Clear files and metadata and release the merged document
    pub fn reset(&mut self) {
        if let Some(download) = self.session.reset() {
            self.artifacts.revoke(&download);
        }
        debug!("session reset");
        self.observer.files_changed(self.session.files());
        self.notify_metadata();
        self.observer.status_changed(self.session.status());
    }
}
