//! Command implementations for the BRAHMS sync CLI
//!
//! Each command lives in its own module:
//! - `sync`: authenticate and push exports to the plant API
//! - `validate`: offline check of exports against the payload builders

pub mod shared;
pub mod sync;
pub mod validate;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the subcommand handler
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Sync(sync_args)) => sync::run_sync(sync_args).await,
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        None => Err(Error::configuration("No command given")),
    }
}
