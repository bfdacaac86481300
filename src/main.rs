//! pdfmerge - merge PDFs and images through a remote merge API

mod cli;

use clap::{Parser, Subcommand};
use cli::style::Stylize;
use cli::{CommandContext, MergeCommandOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "PDFMERGE_LOG";

#[derive(Parser)]
#[command(
    name = "pdfmerge",
    version,
    about = "Merge PDFs and images into a single PDF through a remote merge API"
)]
struct Cli {
    /// API base address (overrides MERGE_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Config file (defaults to <config dir>/pdfmerge/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge files into one PDF, in the order given
    Merge {
        /// PDFs and images to merge
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document author
        #[arg(long)]
        author: Option<String>,

        /// Output path (defaults to "<title>.pdf")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Move the file at FROM to position TO (zero-based, repeatable).
        /// Positions count only supported files, after unsupported ones are dropped
        #[arg(long = "move", value_name = "FROM:TO", value_parser = cli::merge::parse_move)]
        moves: Vec<(usize, usize)>,

        /// Show what would be merged without sending anything
        #[arg(long)]
        dry_run: bool,

        /// Preview and ask for confirmation before sending
        #[arg(long)]
        confirm: bool,
    },
    /// Check that the merge API is reachable
    Health,
    /// Show which files would be staged and which would be dropped
    Inspect {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Inspect { files } => cli::run_inspect(&files),
        Commands::Health => match CommandContext::new(args.api_url.as_deref(), args.config.as_deref()) {
            Ok(ctx) => cli::run_health(&ctx).await,
            Err(e) => Err(e),
        },
        Commands::Merge {
            files,
            title,
            author,
            output,
            moves,
            dry_run,
            confirm,
        } => match CommandContext::new(args.api_url.as_deref(), args.config.as_deref()) {
            Ok(ctx) => {
                let options = MergeCommandOptions {
                    title,
                    author,
                    output,
                    moves,
                    dry_run,
                    confirm,
                };
                cli::run_merge(&ctx, &files, options).await
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            anstream::eprintln!("{} {e}", "Error:".error());
            ExitCode::FAILURE
        }
    }
}
