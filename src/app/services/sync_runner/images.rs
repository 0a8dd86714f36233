//! Species image sync
//!
//! An image row is matched to a species by name, cultivar, vernacular name
//! and genus. Only an exact single match gets the image; rows matching no
//! species or several are reported and left alone.

use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, info, warn};

use super::drive_rows;
use super::filter::{Freshness, ModifiedFilter};
use super::source::open_export;
use super::stats::{RowOutcome, SyncStats, describe_failure};
use crate::Result;
use crate::app::services::brahms_parser::{PathMapper, row_to_image_query};
use crate::app::services::garden_api::GardenApi;
use crate::config::{ParserConfig, SyncConfig};

/// Sync every row of an image export
pub async fn sync_images<A: GardenApi>(
    api: &A,
    path: &Path,
    config: &SyncConfig,
    filter: ModifiedFilter,
    progress: Option<&ProgressBar>,
) -> Result<SyncStats> {
    info!("Syncing species images from {}", path.display());

    let mut rows = open_export(path, &config.input)?;
    match rows.read_header()? {
        Some(header) => config.parsing.image_columns.validate_header(&header)?,
        None => {
            warn!("Image export {} is empty", path.display());
            return Ok(SyncStats::default());
        }
    }

    if let Some(pb) = progress {
        pb.set_message("images");
    }

    let parsing = &config.parsing;
    let mapper = parsing.path_remap.mapper();
    let mapper = mapper.as_ref();

    let stats = drive_rows(
        rows,
        config.performance.workers,
        progress,
        move |row| async move {
            match row {
                Ok(row) => sync_image_row(api, &row, parsing, mapper, filter).await,
                Err(e) => RowOutcome::Rejected(e.to_string()),
            }
        },
    )
    .await;

    info!(
        "Images: {} rows, {} uploaded, {} unmatched, {} ambiguous, {} rejected, {} failed",
        stats.rows_read,
        stats.posted,
        stats.images_unmatched,
        stats.images_ambiguous,
        stats.rejected,
        stats.failed
    );
    Ok(stats)
}

/// Filter, match and upload one image row
pub async fn sync_image_row<A: GardenApi>(
    api: &A,
    row: &[String],
    parsing: &ParserConfig,
    mapper: &dyn PathMapper,
    filter: ModifiedFilter,
) -> RowOutcome {
    let columns = &parsing.image_columns;
    let image = columns.row_id(row);

    match filter.classify(columns.last_modified(row)) {
        Freshness::Unmodified => {
            debug!(image, "Not modified since last run");
            return RowOutcome::Unmodified;
        }
        Freshness::Unparseable => warn!(image, "Unreadable last-modified value, syncing anyway"),
        Freshness::Modified | Freshness::NoTimestamp => {}
    }

    let record = match row_to_image_query(row, parsing, mapper) {
        Ok(record) => record,
        Err(e) => {
            warn!(image, "Skipping image row: {}", e);
            return RowOutcome::Rejected(e.to_string());
        }
    };

    let search = match api.find_species(&record.query).await {
        Ok(search) => search,
        Err(e) => {
            let reason = describe_failure(&e);
            warn!(image, "Species search failed: {}", reason);
            return RowOutcome::Failed(format!("{}: {}", image, reason));
        }
    };

    match search.unique_id() {
        Some(species_id) => match api.set_species_image(species_id, &record).await {
            Ok(()) => {
                info!(image, species_id, "Image attached");
                RowOutcome::ImageUploaded
            }
            Err(e) => {
                let reason = describe_failure(&e);
                warn!(image, species_id, "Image upload failed: {}", reason);
                RowOutcome::ImageUploadFailed(format!("{}: {}", image, reason))
            }
        },
        None if search.count == 1 => {
            warn!(
                image,
                returned = search.results.len(),
                "Species search reported one match but returned a different page"
            );
            RowOutcome::ImageUnmatched
        }
        None if search.count == 0 => {
            warn!(image, query = ?record.query, "No species matches image");
            RowOutcome::ImageUnmatched
        }
        None => {
            warn!(
                image,
                count = search.count,
                query = ?record.query,
                "Several species match image"
            );
            RowOutcome::ImageAmbiguous
        }
    }
}
