//! Upload/merge orchestration
//!
//! Split the same way as the rest of the crate's effectful code:
//! 1. `state` - the session and its transitions (pure, no I/O)
//! 2. `orchestrator` - drives the API calls and notifies the observer
//! 3. `observer` - the notification sink that stands in for a re-render
//! 4. `health` - the API status indicator, probed independently of merges

mod health;
mod observer;
mod orchestrator;
mod state;

pub use health::HealthMonitor;
pub use observer::{NoopObserver, SessionObserver};
pub use orchestrator::{MergeOrchestrator, SubmitOutcome};
pub use state::{DEFAULT_TITLE, MergeSession};
