//! pdf-merger - stage PDFs and images and merge them through a remote API
//!
//! The library holds the upload/merge orchestrator: an ordered list of
//! staged files, a small status machine, and the two outbound calls (health
//! probe and merge request) made through the [`api::MergeApi`] seam.
//!
//! The actual PDF work happens on the remote service. Nothing here parses or
//! renders PDFs.

pub mod api;
pub mod artifact;
pub mod config;
pub mod error;
pub mod intake;
pub mod session;
pub mod types;
