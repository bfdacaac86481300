//! Shared test fixtures

#![allow(dead_code)]

mod mock_api;

pub use mock_api::{MockMergeApi, RecordingObserver};

use pdf_merger::api::{EndpointLayout, Endpoints};
use pdf_merger::types::FileHandle;

/// Endpoints for a local development server
pub fn local_endpoints() -> Endpoints {
    Endpoints::parse("http://localhost:8002", EndpointLayout::Auto).expect("valid test URL")
}

/// In-memory PDF handle
pub fn pdf(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, "application/pdf", format!("%PDF-1.4 {name}").into_bytes())
}

/// In-memory PNG handle
pub fn png(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, "image/png", format!("PNG {name}").into_bytes())
}

/// In-memory plain text handle (never accepted)
pub fn text(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, "text/plain", b"hello".to_vec())
}
