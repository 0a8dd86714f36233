//! Run statistics

use serde::{Deserialize, Serialize};

use crate::Error;

/// What happened to one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Not modified since the last run
    Unmodified,
    /// Could not be turned into a payload
    Rejected(String),
    /// Collection created
    Posted,
    /// The API refused or could not be reached
    Failed(String),
    /// Exactly one species matched and the image was attached
    ImageUploaded,
    /// Exactly one species matched but the upload failed
    ImageUploadFailed(String),
    /// No species matched the image row
    ImageUnmatched,
    /// Several species matched the image row
    ImageAmbiguous,
}

/// Counters for one export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    /// Data rows read, header excluded
    pub rows_read: usize,
    pub unmodified: usize,
    pub rejected: usize,
    /// Successful collection POSTs and image uploads
    pub posted: usize,
    pub failed: usize,
    pub images_matched: usize,
    pub images_unmatched: usize,
    pub images_ambiguous: usize,
    /// Rejection and failure reasons
    pub errors: Vec<String>,
}

impl SyncStats {
    pub fn record(&mut self, outcome: RowOutcome) {
        self.rows_read += 1;

        match outcome {
            RowOutcome::Unmodified => self.unmodified += 1,
            RowOutcome::Rejected(reason) => {
                self.rejected += 1;
                self.errors.push(reason);
            }
            RowOutcome::Posted => self.posted += 1,
            RowOutcome::Failed(reason) => {
                self.failed += 1;
                self.errors.push(reason);
            }
            RowOutcome::ImageUploaded => {
                self.images_matched += 1;
                self.posted += 1;
            }
            RowOutcome::ImageUploadFailed(reason) => {
                self.images_matched += 1;
                self.failed += 1;
                self.errors.push(reason);
            }
            RowOutcome::ImageUnmatched => self.images_unmatched += 1,
            RowOutcome::ImageAmbiguous => self.images_ambiguous += 1,
        }
    }

    /// Rows that were due for sync
    pub fn attempted(&self) -> usize {
        self.rows_read - self.unmodified
    }

    pub fn has_failures(&self) -> bool {
        self.rejected + self.failed > 0
    }
}

/// One-line description of an API failure, with the response body when kept
pub fn describe_failure(error: &Error) -> String {
    match error {
        Error::ApiStatus {
            body: Some(body), ..
        } => format!("{} ({})", error, body),
        _ => error.to_string(),
    }
}
