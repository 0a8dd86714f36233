//! Shared components for CLI commands
//!
//! Logging setup, progress spinner and report formatting used by more than
//! one command.

use crate::app::services::sync_runner::SyncStats;
use crate::{Error, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Set up structured logging on stderr, optionally mirrored to a file
pub fn setup_logging(log_level: &str, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("brahms_sync={}", log_level)));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| Error::io(format!("Failed to open log file {}", path.display()), e))?;

            Some(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let result = if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Spinner counting processed rows
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} rows {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print the counters of one export as an indented block
pub fn print_sync_stats(title: &str, stats: &SyncStats, images: bool) {
    println!("\n{}", title.bright_green().bold());
    println!(
        "  {} {}",
        "Rows read:".bright_cyan(),
        stats.rows_read.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Unmodified:".bright_cyan(),
        stats.unmodified.to_string().bright_white()
    );

    if images {
        println!(
            "  {} {}",
            "Images uploaded:".bright_cyan(),
            stats.posted.to_string().bright_white().bold()
        );
        println!(
            "  {} {}",
            "No matching species:".bright_cyan(),
            stats.images_unmatched.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Several matching species:".bright_cyan(),
            stats.images_ambiguous.to_string().bright_white()
        );
    } else {
        println!(
            "  {} {}",
            "Collections posted:".bright_cyan(),
            stats.posted.to_string().bright_white().bold()
        );
    }

    if stats.rejected > 0 {
        println!(
            "  {} {}",
            "Rejected:".bright_yellow(),
            stats.rejected.to_string().bright_yellow().bold()
        );
    }
    if stats.failed > 0 {
        println!(
            "  {} {}",
            "Failed:".bright_red(),
            stats.failed.to_string().bright_red().bold()
        );
    }
}

/// Print up to `limit` reasons, then a count of the rest
pub fn print_reasons(reasons: &[String], limit: usize) {
    for reason in reasons.iter().take(limit) {
        println!("   • {}", reason);
    }
    if reasons.len() > limit {
        println!("   • ... and {} more", reasons.len() - limit);
    }
}
