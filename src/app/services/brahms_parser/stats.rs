//! Transformation statistics for BRAHMS exports
//!
//! Tracks how many rows of a file produced payloads and why the others were
//! rejected, for the offline validation report.

use serde::{Deserialize, Serialize};

/// Simple transformation statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered (header excluded)
    pub total_rows: usize,

    /// Number of rows that produced a payload
    pub payloads_built: usize,

    /// Number of rows rejected
    pub rows_rejected: usize,

    /// Rejection reasons for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            payloads_built: 0,
            rows_rejected: 0,
            errors: Vec::new(),
        }
    }

    /// Record a row that produced a payload
    pub fn record_success(&mut self) {
        self.total_rows += 1;
        self.payloads_built += 1;
    }

    /// Record a rejected row with its reason
    pub fn record_rejection(&mut self, reason: impl Into<String>) {
        self.total_rows += 1;
        self.rows_rejected += 1;
        self.errors.push(reason.into());
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.payloads_built as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check if the export was mostly usable (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
