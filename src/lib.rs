//! BRAHMS Sync Library
//!
//! A Rust library for converting BRAHMS botanical database exports into the
//! nested JSON payloads expected by the Red Butte Garden plant API, and for
//! pushing those payloads to the API.
//!
//! This library provides tools for:
//! - Reading delimited BRAHMS exports with explicit encoding and delimiter
//! - Mapping positional columns onto named fields for collection and image rows
//! - Normalising bloom times, hardiness zones, plant dates and trait flags
//! - Building collection payloads and species image queries per row
//! - Synchronising rows to the remote API with a bounded worker pool

pub mod config;
pub mod constants;
pub mod state;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod brahms_parser;
        pub mod garden_api;
        pub mod sync_runner;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CollectionPayload, ImageQuery, ImageRecord};
pub use config::{FieldPolicy, ParserConfig, SyncConfig};

/// Result type alias for BRAHMS sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for BRAHMS sync operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Export could not be decoded with the requested encoding
    #[error("Failed to decode '{file}' as {encoding}")]
    Decoding { file: String, encoding: String },

    /// Export header does not cover the declared column table
    #[error("Schema mismatch in {schema} export: expected at least {expected} columns, found {found}")]
    SchemaMismatch {
        schema: String,
        expected: usize,
        found: usize,
    },

    /// Row is structurally broken and was abandoned
    #[error("Malformed row '{row_id}': expected at least {expected} columns, found {found}")]
    MalformedRow {
        row_id: String,
        expected: usize,
        found: usize,
    },

    /// Row was rejected because a field could not be normalised
    #[error("Row '{row_id}' rejected: {field}: {message}")]
    RowRejected {
        row_id: String,
        field: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Authentication against the remote API failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// HTTP transport error
    #[error("API request error: {message}")]
    Api {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote API answered with an error status
    #[error("API returned {status} for {url}")]
    ApiStatus {
        url: String,
        status: u16,
        body: Option<String>,
    },

    /// State file could not be read or written
    #[error("State file error: {message}")]
    State { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a decoding error
    pub fn decoding(file: impl Into<String>, encoding: impl Into<String>) -> Self {
        Self::Decoding {
            file: file.into(),
            encoding: encoding.into(),
        }
    }

    /// Create a schema mismatch error
    pub fn schema_mismatch(schema: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::SchemaMismatch {
            schema: schema.into(),
            expected,
            found,
        }
    }

    /// Create a malformed row error
    pub fn malformed_row(row_id: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::MalformedRow {
            row_id: row_id.into(),
            expected,
            found,
        }
    }

    /// Create a row rejection error
    pub fn row_rejected(
        row_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::RowRejected {
            row_id: row_id.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an API transport error with context
    pub fn api(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Api {
            message: message.into(),
            source,
        }
    }

    /// Create an API status error
    pub fn api_status(url: impl Into<String>, status: u16, body: Option<String>) -> Self {
        Self::ApiStatus {
            url: url.into(),
            status,
            body,
        }
    }

    /// Create a state file error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Api {
            message: "HTTP request failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::State {
            message: format!("JSON (de)serialisation failed: {}", error),
        }
    }
}
