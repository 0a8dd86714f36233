//! Offline transformation report
//!
//! Runs an export through the payload builders without contacting the API,
//! so a new export can be checked before a real sync.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use super::source::open_export;
use crate::Result;
use crate::app::services::brahms_parser::{
    ParseStats, build_collection_payload, row_to_image_query,
};
use crate::config::SyncConfig;

/// Which export layout a file follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Collections,
    Images,
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportKind::Collections => write!(f, "collections"),
            ExportKind::Images => write!(f, "images"),
        }
    }
}

/// Count the rows of an export that would produce a payload
pub fn validate_export(path: &Path, kind: ExportKind, config: &SyncConfig) -> Result<ParseStats> {
    info!("Validating {} export {}", kind, path.display());

    let mut rows = open_export(path, &config.input)?;
    let Some(header) = rows.read_header()? else {
        warn!("Export {} is empty", path.display());
        return Ok(ParseStats::new());
    };

    match kind {
        ExportKind::Collections => config.parsing.collection_columns.validate_header(&header)?,
        ExportKind::Images => config.parsing.image_columns.validate_header(&header)?,
    }

    let mapper = config.parsing.path_remap.mapper();
    let mut stats = ParseStats::new();

    for row in rows {
        let result = row.and_then(|row| match kind {
            ExportKind::Collections => build_collection_payload(&row, &config.parsing).map(|_| ()),
            ExportKind::Images => {
                row_to_image_query(&row, &config.parsing, mapper.as_ref()).map(|_| ())
            }
        });

        match result {
            Ok(()) => stats.record_success(),
            Err(e) => {
                debug!("Rejected: {}", e);
                stats.record_rejection(e.to_string());
            }
        }
    }

    info!(
        "{}: {} of {} rows usable ({:.1}%)",
        path.display(),
        stats.payloads_built,
        stats.total_rows,
        stats.success_rate()
    );
    Ok(stats)
}
