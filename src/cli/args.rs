//! Command-line argument definitions for BRAHMS sync
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{FieldPolicy, PathRemap, SyncConfig};
use crate::constants::{
    DEFAULT_DELIMITER, DEFAULT_ENCODING, DEFAULT_FALLBACK_ENCODING, DEFAULT_PARALLEL_WORKERS,
    DEFAULT_TARGET,
};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the BRAHMS sync tool
///
/// Pushes BRAHMS living-collection and species image exports to the
/// Red Butte Garden plant API.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "brahms-sync",
    version,
    about = "Sync BRAHMS collection and image exports to the Red Butte Garden plant API",
    long_about = "Reads delimited exports from the BRAHMS botanical database, turns each row into \
                  the JSON payload the garden plant API expects and posts it. Only rows modified \
                  since the previous run are sent unless --full-sync is given."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Sync exports to the plant API
    Sync(SyncArgs),
    /// Check exports offline and report which rows would be rejected
    Validate(ValidateArgs),
}

/// Export locations and dialect, shared by every command
#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    /// Living-collections export
    #[arg(
        short = 'p',
        long = "plant-data-path",
        value_name = "FILE",
        help = "Path to the BRAHMS living-collections export"
    )]
    pub plant_data_path: Option<PathBuf>,

    /// Species image export
    #[arg(
        short = 'i',
        long = "image-data-path",
        value_name = "FILE",
        help = "Path to the BRAHMS species image export"
    )]
    pub image_data_path: Option<PathBuf>,

    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value_t = DEFAULT_DELIMITER,
        help = "Field delimiter of the exports"
    )]
    pub delimiter: char,

    #[arg(
        long = "encoding",
        value_name = "LABEL",
        default_value = DEFAULT_ENCODING,
        help = "Text encoding of the exports (e.g. utf-8, windows-1252)"
    )]
    pub encoding: String,

    /// Encoding retried once when `--encoding` cannot decode a file
    #[arg(
        long = "fallback-encoding",
        value_name = "LABEL",
        default_value = DEFAULT_FALLBACK_ENCODING,
        help = "Encoding tried once when the primary encoding fails"
    )]
    pub fallback_encoding: String,

    #[arg(
        long = "no-fallback",
        help = "Fail on the first decoding error instead of retrying"
    )]
    pub no_fallback: bool,

    /// Field-failure policy
    ///
    /// strict rejects a row on any bad hardiness zone, bloom month or date
    /// part; lenient drops the bad value and keeps the row.
    #[arg(
        long = "policy",
        value_enum,
        default_value = "strict",
        help = "How to treat fields that cannot be normalised"
    )]
    pub policy: FieldPolicy,

    /// Directory prefix in the image export to replace
    #[arg(
        long = "remap-prefix",
        value_name = "PREFIX",
        requires = "remap_to",
        help = "Image directory prefix to replace (e.g. 'B:\\')"
    )]
    pub remap_prefix: Option<String>,

    /// Local directory replacing `--remap-prefix`
    #[arg(
        long = "remap-to",
        value_name = "DIR",
        requires = "remap_prefix",
        help = "Local directory that mirrors the remapped prefix"
    )]
    pub remap_to: Option<PathBuf>,
}

/// Arguments for the sync command
#[derive(Debug, Clone, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(
        short = 't',
        long = "target",
        value_name = "HOST",
        default_value = DEFAULT_TARGET,
        help = "Host of the garden website"
    )]
    pub target: String,

    #[arg(long = "no-ssl", help = "Use http instead of https")]
    pub no_ssl: bool,

    /// Number of rows in flight at once
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = DEFAULT_PARALLEL_WORKERS,
        help = "Number of rows synced concurrently"
    )]
    pub workers: usize,

    /// Last-run state file
    ///
    /// Defaults to brahms-sync/state.json under the user config directory.
    #[arg(
        long = "state-file",
        value_name = "FILE",
        help = "Path of the last-run state file"
    )]
    pub state_file: Option<PathBuf>,

    #[arg(
        long = "full-sync",
        help = "Sync every row regardless of its last-modified value"
    )]
    pub full_sync: bool,

    #[arg(
        long = "log-file",
        value_name = "FILE",
        help = "Also write log records to this file"
    )]
    pub log_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the validation report"
    )]
    pub output_format: OutputFormat,

    #[arg(
        long = "show-errors",
        value_name = "COUNT",
        default_value_t = 10,
        help = "Number of rejection reasons listed per export"
    )]
    pub show_errors: usize,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl InputArgs {
    /// Check that at least one export was given
    pub fn validate(&self) -> Result<()> {
        if self.plant_data_path.is_none() && self.image_data_path.is_none() {
            return Err(Error::configuration(
                "Give --plant-data-path, --image-data-path or both",
            ));
        }
        Ok(())
    }

    pub fn path_remap(&self) -> PathRemap {
        match (&self.remap_prefix, &self.remap_to) {
            (Some(from), Some(to)) => PathRemap::Prefix {
                from: from.clone(),
                to: to.clone(),
            },
            _ => PathRemap::Identity,
        }
    }

    /// Apply the input options to a configuration
    pub fn apply(&self, config: SyncConfig) -> SyncConfig {
        let mut config = config
            .with_dialect(self.delimiter, self.encoding.clone())
            .with_field_policy(self.policy)
            .with_path_remap(self.path_remap());

        config.input.fallback_encoding =
            (!self.no_fallback).then(|| self.fallback_encoding.clone());

        if let Some(path) = &self.plant_data_path {
            config = config.with_plant_data_path(path.clone());
        }
        if let Some(path) = &self.image_data_path {
            config = config.with_image_data_path(path.clone());
        }
        config
    }
}

impl SyncArgs {
    pub fn validate(&self) -> Result<()> {
        self.input.validate()
    }

    /// Build the run configuration from these arguments
    pub fn to_config(&self) -> SyncConfig {
        let mut config = self
            .input
            .apply(SyncConfig::default())
            .with_target(self.target.clone(), !self.no_ssl)
            .with_workers(self.workers);

        if let Some(state_file) = &self.state_file {
            config = config.with_state_file(state_file.clone());
        }
        if self.full_sync {
            config = config.with_full_sync();
        }
        config
    }

    /// Determine the log level from verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress spinner only outside quiet and JSON modes
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl ValidateArgs {
    pub fn validate(&self) -> Result<()> {
        self.input.validate()
    }

    pub fn to_config(&self) -> SyncConfig {
        self.input.apply(SyncConfig::default())
    }

    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
