//! Validate command implementation
//!
//! Runs the configured exports through the payload builders without any
//! network access and reports how many rows would be accepted.

use super::shared::{print_reasons, setup_logging};
use crate::app::services::brahms_parser::ParseStats;
use crate::app::services::sync_runner::{ExportKind, validate_export};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::{Error, Result};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false, None)?;

    info!("Validating BRAHMS exports");
    debug!("Validation arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config();
    config.validate()?;

    let mut results = Vec::new();
    for (kind, path) in exports(&args) {
        let stats = validate_export(&path, kind, &config)?;
        results.push((kind, path, stats));
    }

    match args.output_format {
        OutputFormat::Human => print_human_report(&results, args.show_errors),
        OutputFormat::Json => print_json_report(&results)?,
    }

    Ok(())
}

fn exports(args: &ValidateArgs) -> Vec<(ExportKind, PathBuf)> {
    let collections = args
        .input
        .plant_data_path
        .clone()
        .map(|path| (ExportKind::Collections, path));
    let images = args
        .input
        .image_data_path
        .clone()
        .map(|path| (ExportKind::Images, path));

    collections.into_iter().chain(images).collect()
}

fn print_human_report(results: &[(ExportKind, PathBuf, ParseStats)], show_errors: usize) {
    println!("\n{}", "BRAHMS Export Validation".bright_green().bold());

    for (kind, path, stats) in results {
        println!("\n{} {}", kind.to_string().bright_cyan().bold(), path.display());
        println!(
            "  {} {}",
            "Rows:".bright_cyan(),
            stats.total_rows.to_string().bright_white()
        );
        println!(
            "  {} {} ({:.1}%)",
            "Accepted:".bright_cyan(),
            stats.payloads_built.to_string().bright_white().bold(),
            stats.success_rate()
        );

        if stats.rows_rejected > 0 {
            println!(
                "  {} {}",
                "Rejected:".bright_red(),
                stats.rows_rejected.to_string().bright_red().bold()
            );
            print_reasons(&stats.errors, show_errors);
        }
    }
    println!();
}

fn print_json_report(results: &[(ExportKind, PathBuf, ParseStats)]) -> Result<()> {
    let report: Vec<serde_json::Value> = results
        .iter()
        .map(|(kind, path, stats)| {
            serde_json::json!({
                "export": kind,
                "path": path,
                "total_rows": stats.total_rows,
                "accepted": stats.payloads_built,
                "rejected": stats.rows_rejected,
                "success_rate_percent": stats.success_rate(),
                "errors": stats.errors,
            })
        })
        .collect();

    let json = serde_json::to_string_pretty(&report).map_err(|e| {
        Error::configuration(format!("Failed to serialize validation report: {}", e))
    })?;
    println!("{}", json);
    Ok(())
}
