//! Merge command - stage files and merge them into one PDF

use crate::cli::context::CommandContext;
use crate::cli::observer::CliObserver;
use crate::cli::style::{Stylize, arrow, check};
use anstream::println;
use dialoguer::Confirm;
use pdf_merger::error::{Error, Result};
use pdf_merger::intake::{format_file_size, handle_from_path};
use pdf_merger::session::{MergeOrchestrator, MergeSession, SubmitOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

/// Options for the merge command
#[derive(Debug, Clone, Default)]
pub struct MergeCommandOptions {
    /// Document title (empty means the service default title)
    pub title: Option<String>,
    /// Document author (defaults to the configured author)
    pub author: Option<String>,
    /// Where to write the merged PDF
    pub output: Option<PathBuf>,
    /// Reorderings applied after staging, in order
    pub moves: Vec<(usize, usize)>,
    /// Show the plan without sending anything
    pub dry_run: bool,
    /// Preview plan and prompt for confirmation before sending
    pub confirm: bool,
}

/// Run the merge command
pub async fn run_merge(
    ctx: &CommandContext,
    files: &[PathBuf],
    options: MergeCommandOptions,
) -> Result<ExitCode> {
    // Stat everything up front so a typo fails before any upload
    let handles = files
        .iter()
        .map(|path| handle_from_path(path))
        .collect::<Result<Vec<_>>>()?;
    let picked = handles.len();

    let observer = CliObserver::new();
    let mut orchestrator =
        MergeOrchestrator::with_session(ctx.new_session(), &ctx.api, &observer);

    let staged = orchestrator.intake(handles);
    if staged < picked {
        println!(
            "{}",
            format!("Skipped {} unsupported file(s)", picked - staged).warn()
        );
    }
    if staged == 0 {
        println!("{}", "No supported files to merge.".muted());
        return Ok(ExitCode::SUCCESS);
    }

    for &(from, to) in &options.moves {
        orchestrator.move_entry(from, to)?;
    }
    if let Some(title) = options.title {
        orchestrator.set_title(title);
    }
    if let Some(author) = options.author {
        orchestrator.set_author(author);
    }

    if options.dry_run {
        print_merge_plan(orchestrator.session());
        println!("{}", "Dry run - nothing was sent.".muted());
        return Ok(ExitCode::SUCCESS);
    }

    if options.confirm {
        print_merge_plan(orchestrator.session());
        if !Confirm::new()
            .with_prompt("Proceed with merge?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(ExitCode::SUCCESS);
        }
        println!();
    }

    let outcome = orchestrator.submit().await;
    match outcome {
        SubmitOutcome::Merged(download) => {
            let output = options
                .output
                .unwrap_or_else(|| PathBuf::from(&download.filename));
            let bytes = orchestrator
                .merged_bytes()
                .ok_or_else(|| Error::Internal("merged document is no longer held".to_string()))?;
            tokio::fs::write(&output, bytes).await?;

            println!(
                "{} Merged {} file(s) into {} ({})",
                check(),
                staged.accent(),
                output.display().accent(),
                format_file_size(download.size)
            );
            orchestrator.reset();
            Ok(ExitCode::SUCCESS)
        }
        // The observer already printed the alert
        SubmitOutcome::Failed(_) => Ok(ExitCode::FAILURE),
        SubmitOutcome::Skipped => {
            println!("{}", "Nothing to merge.".muted());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Print the staged files and metadata
fn print_merge_plan(session: &MergeSession) {
    println!("{}:", "Merge plan".emphasis());
    println!();
    for (index, entry) in session.files().iter().enumerate() {
        println!(
            "  {} {}. {}  {}",
            arrow(),
            index,
            entry.display_name.accent(),
            entry.size_label.muted()
        );
    }
    println!();
    println!("  Title:  {}", session.resolved_title());
    println!("  Author: {}", session.author());
    println!();
}

/// Parse a `FROM:TO` reorder argument
pub fn parse_move(raw: &str) -> std::result::Result<(usize, usize), String> {
    let (from, to) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{raw}'"))?;
    let from = from
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid FROM index '{from}': {e}"))?;
    let to = to
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid TO index '{to}': {e}"))?;
    Ok((from, to))
}
