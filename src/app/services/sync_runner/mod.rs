//! Sync orchestration
//!
//! Drives export rows through the payload builders and into the garden API.
//! Rows are read lazily and processed by a bounded pool of concurrent
//! futures; each row either completes or is abandoned on its own, so a run
//! only stops early on file-level problems.
//!
//! ## Architecture
//!
//! - [`source`] - Opens exports with the configured dialect and encoding fallback
//! - [`filter`] - Last-modified filter against the previous run
//! - [`collections`] - Per-row collection sync
//! - [`images`] - Per-row species image sync
//! - [`runner`] - Whole-run orchestration and state persistence
//! - [`validation`] - Offline transformation report
//! - [`stats`] - Run statistics

pub mod collections;
pub mod filter;
pub mod images;
pub mod runner;
pub mod source;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub mod tests;

pub use collections::{sync_collection_row, sync_collections};
pub use filter::{Freshness, ModifiedFilter};
pub use images::{sync_image_row, sync_images};
pub use runner::{SyncReport, SyncRunner};
pub use source::open_export;
pub use stats::{RowOutcome, SyncStats};
pub use validation::{ExportKind, validate_export};

use futures::{StreamExt, stream};
use indicatif::ProgressBar;
use std::future::Future;

use crate::Result;
use crate::app::services::brahms_parser::ExportRows;

/// Run `per_row` over every data row with at most `workers` rows in flight
pub(crate) async fn drive_rows<F, Fut>(
    rows: ExportRows,
    workers: usize,
    progress: Option<&ProgressBar>,
    per_row: F,
) -> SyncStats
where
    F: FnMut(Result<Vec<String>>) -> Fut,
    Fut: Future<Output = RowOutcome>,
{
    let mut stats = SyncStats::default();
    let mut outcomes = stream::iter(rows).map(per_row).buffer_unordered(workers.max(1));

    while let Some(outcome) = outcomes.next().await {
        stats.record(outcome);
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    stats
}
