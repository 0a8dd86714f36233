//! BRAHMS export parser and payload builder
//!
//! This module turns raw rows of BRAHMS collection and image exports into the
//! payloads accepted by the garden plant API. Every function here works on a
//! single row and holds no shared state, so rows may be processed
//! concurrently in any order.
//!
//! ## Architecture
//!
//! - [`export_reader`] - Lazy row source with explicit encoding and delimiter
//! - [`row_cleaner`] - Strips stray trailing commas from cells
//! - [`column_mapping`] - Declared column tables and named-field extraction
//! - [`field_parsers`] - Normalisers for bloom time, hardiness, dates, flags and coordinates
//! - [`record_parser`] - Collection payload and image query builders
//! - [`path_mapping`] - Injectable image directory remapping
//! - [`stats`] - Per-file transformation statistics
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brahms_sync::app::services::brahms_parser::{BrahmsExportReader, row_to_collection_payload};
//! use brahms_sync::config::ParserConfig;
//!
//! # fn example() -> brahms_sync::Result<()> {
//! let reader = BrahmsExportReader::new("living_collections.csv").with_encoding("windows-1252");
//! let config = ParserConfig::strict();
//!
//! for row in reader.rows()?.skip(1) {
//!     if let Some(payload) = row_to_collection_payload(&row?, &config) {
//!         println!("{}", serde_json::to_string(&payload).unwrap());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod export_reader;
pub mod field_parsers;
pub mod path_mapping;
pub mod record_parser;
pub mod row_cleaner;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{CollectionColumns, CollectionFields, ImageColumns, ImageFields};
pub use export_reader::{BrahmsExportReader, ExportRows};
pub use field_parsers::FieldError;
pub use path_mapping::{IdentityMapper, PathMapper, PrefixMapper};
pub use record_parser::{
    build_collection_payload, construct_image_path, extract_copyright, extract_species_query,
    row_to_collection_payload, row_to_image_query,
};
pub use row_cleaner::clean_row;
pub use stats::ParseStats;
