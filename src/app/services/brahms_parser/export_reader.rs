//! Lazy row source for BRAHMS delimited exports
//!
//! The whole file is decoded up front with the requested encoding, so an
//! encoding mismatch is reported when the reader is opened rather than half
//! way through a sync. Rows are then yielded one at a time, header included;
//! callers skip the header themselves.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DEFAULT_DELIMITER, DEFAULT_ENCODING};
use crate::{Error, Result};

/// Reader for one BRAHMS export file
#[derive(Debug, Clone)]
pub struct BrahmsExportReader {
    file_path: PathBuf,
    encoding: String,
    delimiter: u8,
}

impl BrahmsExportReader {
    /// Create a reader with UTF-8 encoding and comma delimiter
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            encoding: DEFAULT_ENCODING.to_string(),
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    /// Use a different encoding label (e.g. "windows-1252", "latin1")
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Use a different field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Open the file and return a fresh iterator over its rows.
    ///
    /// Each call re-reads the file. Fails with [`Error::FileNotFound`],
    /// [`Error::Configuration`] for an unknown encoding label, or
    /// [`Error::Decoding`] when the bytes are not valid in that encoding.
    pub fn rows(&self) -> Result<ExportRows> {
        let file = self.file_path.display().to_string();

        let encoding = encoding_rs::Encoding::for_label(self.encoding.as_bytes())
            .ok_or_else(|| {
                Error::configuration(format!("Unknown encoding label '{}'", self.encoding))
            })?;

        let bytes = std::fs::read(&self.file_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(file.clone())
            } else {
                Error::io(format!("Failed to read export {}", file), e)
            }
        })?;

        let content = encoding
            .decode_without_bom_handling_and_without_replacement(&bytes)
            .ok_or_else(|| Error::decoding(file.clone(), encoding.name()))?
            .into_owned();

        debug!(
            "Decoded {} ({} bytes) as {}",
            file,
            bytes.len(),
            encoding.name()
        );

        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(Cursor::new(content.into_bytes()))
            .into_records();

        Ok(ExportRows {
            file,
            records,
            rows_read: 0,
        })
    }
}

/// Iterator over the rows of one export, header first
pub struct ExportRows {
    file: String,
    records: csv::StringRecordsIntoIter<Cursor<Vec<u8>>>,
    rows_read: usize,
}

impl ExportRows {
    /// Consume the next row as the header
    pub fn read_header(&mut self) -> Result<Option<Vec<String>>> {
        self.next().transpose()
    }

    /// Number of rows yielded so far, header included
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }
}

impl Iterator for ExportRows {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.rows_read += 1;

        Some(
            record
                .map(|record| record.iter().map(str::to_string).collect())
                .map_err(|e| {
                    Error::csv_parsing(
                        self.file.clone(),
                        format!("Malformed record at row {}", self.rows_read),
                        Some(e),
                    )
                }),
        )
    }
}

impl std::fmt::Debug for ExportRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportRows")
            .field("file", &self.file)
            .field("rows_read", &self.rows_read)
            .finish()
    }
}
