//! File intake: type filtering, size labels and entry synthesis

use crate::error::Result;
use crate::types::{FileContent, FileEntry, FileHandle};
use std::path::Path;
use tracing::debug;

/// Declared content types accepted for merging.
///
/// `image/jpg` is not a registered type but some pickers report it.
pub const SUPPORTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/tiff",
    "image/webp",
];

/// Type reported for extensions we do not recognise
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Whether a declared type may be staged
pub fn is_supported(mime_type: &str) -> bool {
    SUPPORTED_MIME_TYPES.contains(&mime_type)
}

/// Format a byte count with base-1024 units and two decimals.
///
/// `0` is the special case `"0 Bytes"`. Values past the GB range stay in GB.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    format!("{scaled:.2} {}", SIZE_UNITS[unit])
}

/// Declared MIME type for a path, derived from its extension
///
/// Mirrors what a browser file picker reports for the same file.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("html" | "htm") => "text/html",
        Some("json") => "application/json",
        _ => FALLBACK_MIME_TYPE,
    }
}

/// Build a handle for a file on disk.
///
/// Only metadata is read here; the bytes are read when the merge request
/// is built.
pub fn handle_from_path(path: &Path) -> Result<FileHandle> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    Ok(FileHandle {
        name,
        mime_type: mime_type_for_path(path).to_string(),
        size: metadata.len(),
        content: FileContent::Path(path.to_path_buf()),
    })
}

/// Generate a fresh entry id
fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Turn a handle into a staged entry, or `None` if its type is not accepted
pub fn entry_from_handle(handle: FileHandle) -> Option<FileEntry> {
    if !is_supported(&handle.mime_type) {
        debug!(name = %handle.name, mime_type = %handle.mime_type, "dropping unsupported file");
        return None;
    }

    Some(FileEntry {
        id: generate_id(),
        display_name: handle.name.clone(),
        size_label: format_file_size(handle.size),
        mime_type: handle.mime_type.clone(),
        handle,
    })
}

/// Filter a batch of handles, keeping accepted ones in their original order
pub fn accept_batch<I>(handles: I) -> Vec<FileEntry>
where
    I: IntoIterator<Item = FileHandle>,
{
    handles.into_iter().filter_map(entry_from_handle).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn test_format_unit_boundaries() {
        assert_eq!(format_file_size(1), "1.00 Bytes");
        assert_eq!(format_file_size(1023), "1023.00 Bytes");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(1_048_576), "1.00 MB");
        assert_eq!(format_file_size(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn test_format_caps_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1_073_741_824), "2048.00 GB");
    }

    #[test]
    fn test_format_rounds_to_two_decimals() {
        // 1234 / 1024 = 1.2050...
        assert_eq!(format_file_size(1234), "1.21 KB");
    }

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("a.PDF")), "application/pdf");
        assert_eq!(mime_type_for_path(Path::new("scan.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("scan.tif")), "image/tiff");
        assert_eq!(mime_type_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_type_for_path(Path::new("Makefile")), FALLBACK_MIME_TYPE);
    }

    #[test]
    fn test_jpg_alias_is_accepted() {
        assert!(is_supported("image/jpg"));
        assert!(!is_supported("text/plain"));
        assert!(!is_supported(FALLBACK_MIME_TYPE));
    }

    #[test]
    fn test_handle_from_path_reads_metadata() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.pdf");
        fs::write(&path, b"%PDF-1.7 body").unwrap();

        let handle = handle_from_path(&path).unwrap();
        assert_eq!(handle.name, "report.pdf");
        assert_eq!(handle.mime_type, "application/pdf");
        assert_eq!(handle.size, 13);
        assert_eq!(handle.content, FileContent::Path(path));
    }

    #[test]
    fn test_handle_from_missing_path_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = handle_from_path(&temp.path().join("missing.pdf"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = entry_from_handle(FileHandle::from_bytes("a.pdf", "application/pdf", vec![1]))
            .unwrap();
        let b = entry_from_handle(FileHandle::from_bytes("a.pdf", "application/pdf", vec![1]))
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.size_label, "1.00 Bytes");
    }
}
