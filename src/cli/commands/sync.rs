//! Sync command implementation
//!
//! Builds the run configuration, authenticates against the plant API and
//! hands both exports to the sync runner.

use super::shared::{create_spinner, print_reasons, print_sync_stats, setup_logging};
use crate::Result;
use crate::app::services::garden_api::{Credentials, GardenApiClient};
use crate::app::services::sync_runner::{SyncReport, SyncRunner};
use crate::cli::args::{OutputFormat, SyncArgs};
use colored::*;
use indicatif::HumanDuration;
use tracing::{debug, info};

/// Number of failure reasons printed in the human summary
const REASONS_SHOWN: usize = 10;

/// Sync command runner
pub async fn run_sync(args: SyncArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet, args.log_file.as_deref())?;

    info!("Starting BRAHMS sync");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config();
    config.validate()?;

    let credentials = Credentials::from_env()?;
    let api = GardenApiClient::connect(&config.api, &credentials).await?;
    info!("Connected to {}", api.base_url());

    let mut runner = SyncRunner::new(api, config);
    if args.show_progress() {
        runner = runner.with_progress(create_spinner("starting"));
    }

    let report = runner.run().await?;

    match args.output_format {
        OutputFormat::Human => print_human_report(&report),
        OutputFormat::Json => print_json_report(&report)?,
    }

    Ok(())
}

fn print_human_report(report: &SyncReport) {
    println!("\n{}", "BRAHMS Sync Complete".bright_green().bold());
    match report.previous_run {
        Some(previous) => println!(
            "  {} {}",
            "Rows modified after:".bright_cyan(),
            previous.to_string().bright_white()
        ),
        None => println!("  {}", "Full sync".bright_cyan()),
    }
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(report.duration).to_string().bright_white()
    );

    if let Some(stats) = &report.collections {
        print_sync_stats("Collections", stats, false);
        print_reasons(&stats.errors, REASONS_SHOWN);
    }
    if let Some(stats) = &report.images {
        print_sync_stats("Species images", stats, true);
        print_reasons(&stats.errors, REASONS_SHOWN);
    }

    if report.has_failures() {
        println!(
            "\n{}",
            "Some rows were not synced; see the log for details".bright_yellow()
        );
    }
    println!();
}

fn print_json_report(report: &SyncReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
