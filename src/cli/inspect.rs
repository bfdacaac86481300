//! Inspect command - show what intake would stage

use crate::cli::style::{Stylize, arrow, check, cross};
use anstream::println;
use pdf_merger::error::Result;
use pdf_merger::intake::{entry_from_handle, handle_from_path};
use std::path::PathBuf;
use std::process::ExitCode;

/// Run the inspect command
pub fn run_inspect(files: &[PathBuf]) -> Result<ExitCode> {
    let mut staged = 0usize;
    let mut dropped = 0usize;

    for path in files {
        let handle = handle_from_path(path)?;
        let mime_type = handle.mime_type.clone();
        let name = handle.name.clone();

        if let Some(entry) = entry_from_handle(handle) {
            staged += 1;
            println!(
                "  {} {:>3}. {}  {}  {}",
                check(),
                staged,
                entry.display_name.accent(),
                entry.size_label,
                entry.mime_type.muted()
            );
        } else {
            dropped += 1;
            println!(
                "  {}      {}  {}",
                cross(),
                name,
                format!("{mime_type} (unsupported)").muted()
            );
        }
    }

    println!();
    println!(
        "{} {} staged, {} dropped",
        arrow(),
        staged.accent(),
        dropped.accent()
    );
    Ok(ExitCode::SUCCESS)
}
