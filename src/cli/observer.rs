//! Terminal rendering of session changes

use crate::cli::style::{Stylize, cross, spinner_style};
use indicatif::ProgressBar;
use pdf_merger::session::SessionObserver;
use pdf_merger::types::{ApiStatus, SessionStatus};
use std::time::Duration;

/// Shows a spinner while requests are in flight and prints alerts
pub struct CliObserver {
    spinner: ProgressBar,
}

impl CliObserver {
    /// Create an observer with an idle spinner
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        Self { spinner }
    }

    fn start(&self, message: &'static str) {
        self.spinner.set_message(message);
        self.spinner.enable_steady_tick(Duration::from_millis(80));
    }

    fn stop(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for CliObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for CliObserver {
    fn status_changed(&self, status: SessionStatus) {
        match status {
            SessionStatus::Submitting => self.start("Merging PDF..."),
            SessionStatus::Idle | SessionStatus::Ready => self.stop(),
        }
    }

    fn api_status_changed(&self, status: ApiStatus) {
        match status {
            ApiStatus::Checking => self.start("Checking API..."),
            ApiStatus::Unknown | ApiStatus::Healthy | ApiStatus::Error => self.stop(),
        }
    }

    fn alert(&self, message: &str) {
        self.spinner.suspend(|| {
            anstream::eprintln!("{} {}", cross(), message.error());
        });
    }
}
