//! Collection sync
//!
//! Each modified row becomes one `POST collections/`. The API answers
//! `201 Created` for a new collection; any other answer is logged and counted
//! as a failure without stopping the run.

use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, info, warn};

use super::drive_rows;
use super::filter::{Freshness, ModifiedFilter};
use super::source::open_export;
use super::stats::{RowOutcome, SyncStats, describe_failure};
use crate::Result;
use crate::app::services::brahms_parser::build_collection_payload;
use crate::app::services::garden_api::GardenApi;
use crate::config::{ParserConfig, SyncConfig};

/// Sync every row of a collection export
pub async fn sync_collections<A: GardenApi>(
    api: &A,
    path: &Path,
    config: &SyncConfig,
    filter: ModifiedFilter,
    progress: Option<&ProgressBar>,
) -> Result<SyncStats> {
    info!("Syncing collections from {}", path.display());

    let mut rows = open_export(path, &config.input)?;
    match rows.read_header()? {
        Some(header) => config.parsing.collection_columns.validate_header(&header)?,
        None => {
            warn!("Collection export {} is empty", path.display());
            return Ok(SyncStats::default());
        }
    }

    if let Some(pb) = progress {
        pb.set_message("collections");
    }

    let parsing = &config.parsing;
    let stats = drive_rows(
        rows,
        config.performance.workers,
        progress,
        move |row| async move {
            match row {
                Ok(row) => sync_collection_row(api, &row, parsing, filter).await,
                Err(e) => RowOutcome::Rejected(e.to_string()),
            }
        },
    )
    .await;

    info!(
        "Collections: {} rows, {} posted, {} unmodified, {} rejected, {} failed",
        stats.rows_read, stats.posted, stats.unmodified, stats.rejected, stats.failed
    );
    Ok(stats)
}

/// Filter, build and POST one collection row
pub async fn sync_collection_row<A: GardenApi>(
    api: &A,
    row: &[String],
    parsing: &ParserConfig,
    filter: ModifiedFilter,
) -> RowOutcome {
    let columns = &parsing.collection_columns;
    let plant_id = columns.row_id(row);

    match filter.classify(columns.last_modified(row)) {
        Freshness::Unmodified => {
            debug!(plant_id, "Not modified since last run");
            return RowOutcome::Unmodified;
        }
        Freshness::Unparseable => {
            warn!(plant_id, "Unreadable last-modified value, syncing anyway")
        }
        Freshness::Modified | Freshness::NoTimestamp => {}
    }

    let payload = match build_collection_payload(row, parsing) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(plant_id, "Skipping collection row: {}", e);
            return RowOutcome::Rejected(e.to_string());
        }
    };

    match api.post_collection(&payload).await {
        Ok(()) => {
            info!(plant_id, "Collection created");
            RowOutcome::Posted
        }
        Err(e) => {
            let reason = describe_failure(&e);
            warn!(plant_id, "Collection not created: {}", reason);
            RowOutcome::Failed(format!("{}: {}", plant_id, reason))
        }
    }
}
