//! Opening exports with the configured dialect
//!
//! BRAHMS exports are usually UTF-8 but older ones come out as windows-1252.
//! When the configured encoding cannot decode a file, the fallback encoding
//! is tried exactly once before the file is given up on.

use std::path::Path;
use tracing::warn;

use crate::app::services::brahms_parser::{BrahmsExportReader, ExportRows};
use crate::config::InputConfig;
use crate::{Error, Result};

/// Open an export, retrying once with the fallback encoding on a decode error
pub fn open_export(path: &Path, input: &InputConfig) -> Result<ExportRows> {
    let reader = BrahmsExportReader::new(path)
        .with_delimiter(input.delimiter_byte()?)
        .with_encoding(input.encoding.as_str());

    match reader.rows() {
        Err(Error::Decoding { file, encoding }) => match input.fallback_encoding.as_deref() {
            Some(fallback) if !is_same_encoding(fallback, &encoding) => {
                warn!(
                    "{} could not be decoded as {}, retrying as {}",
                    file, encoding, fallback
                );
                reader.with_encoding(fallback).rows()
            }
            _ => Err(Error::decoding(file, encoding)),
        },
        result => result,
    }
}

fn is_same_encoding(label: &str, name: &str) -> bool {
    encoding_rs::Encoding::for_label(label.as_bytes()).map(|encoding| encoding.name()) == Some(name)
}
