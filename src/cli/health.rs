//! Health command - probe the merge API

use crate::cli::context::CommandContext;
use crate::cli::observer::CliObserver;
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use pdf_merger::api::MergeApi;
use pdf_merger::error::Result;
use pdf_merger::session::HealthMonitor;
use pdf_merger::types::ApiStatus;
use std::process::ExitCode;

/// Run the health command
pub async fn run_health(ctx: &CommandContext) -> Result<ExitCode> {
    let observer = CliObserver::new();
    let monitor = HealthMonitor::new(&ctx.api, &observer);

    println!(
        "{} {}",
        "Probing".muted(),
        ctx.api.endpoints().health_url().accent()
    );

    let status = monitor.check().await;
    if status == ApiStatus::Healthy {
        println!("{} {}", check(), status.label().success());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} {}", cross(), status.label().error());
        Ok(ExitCode::FAILURE)
    }
}
