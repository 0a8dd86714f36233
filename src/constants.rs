//! Application constants for BRAHMS sync
//!
//! This module contains configuration defaults, API routes and lookup
//! tables used throughout the application.

// =============================================================================
// Remote API
// =============================================================================

/// Default host of the garden website
pub const DEFAULT_TARGET: &str = "redbuttegarden.org";

/// Token endpoint (form-encoded username/password)
pub const TOKEN_PATH: &str = "/plants/api/token/";

/// Species search endpoint
pub const SPECIES_PATH: &str = "/plants/api/species/";

/// Collection creation endpoint
pub const COLLECTIONS_PATH: &str = "/plants/api/collections/";

/// Accept header sent with every authenticated request
pub const ACCEPT_HEADER: &str = "application/json; q=1.0, */*";

/// Name of the CSRF cookie returned by the token endpoint
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Response bodies shorter than this are copied into error logs
pub const MAX_LOGGED_BODY_BYTES: usize = 1000;

/// Environment variable holding the API username
pub const USERNAME_ENV_VAR: &str = "RBG_API_USERNAME";

/// Environment variable holding the API password
pub const PASSWORD_ENV_VAR: &str = "RBG_API_PASSWORD";

// =============================================================================
// Input defaults
// =============================================================================

pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Encoding tried when the configured one fails to decode an export
pub const DEFAULT_FALLBACK_ENCODING: &str = "windows-1252";

/// Default number of concurrent row workers
pub const DEFAULT_PARALLEL_WORKERS: usize = 4;

/// Upper bound for the worker pool
pub const MAX_PARALLEL_WORKERS: usize = 64;

// =============================================================================
// State persistence
// =============================================================================

/// Directory created under the user config dir
pub const STATE_DIR_NAME: &str = "brahms-sync";

/// File name of the last-run state file
pub const STATE_FILE_NAME: &str = "state.json";

/// Year used for the initial "last run" when no state exists yet
pub const EPOCH_YEAR: i32 = 1900;

// =============================================================================
// Normalisation tables
// =============================================================================

/// Placeholder BRAHMS writes for absent image-row values
pub const NULL_PLACEHOLDER: &str = "NULL";

/// Byte-order mark that leaks into the first cell of some exports
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Cell values (case-insensitive) that mark a trait as present
pub const TRUTHY_VALUES: &[&str] = &["yes", "x"];

/// Extra truthy value accepted only by the utah-native column
pub const UTAH_NATIVE_VALUE: &str = "utah native";

/// Month abbreviations found in BRAHMS bloom-time cells.
///
/// Includes the known export variants: "Arp" (misspelling), "MAy"
/// (miscapitalisation) and "Sept".
pub const MONTH_ALIASES: &[(&str, &str)] = &[
    ("Jan", "January"),
    ("Feb", "February"),
    ("Mar", "March"),
    ("Apr", "April"),
    ("Arp", "April"),
    ("May", "May"),
    ("MAy", "May"),
    ("Jun", "June"),
    ("Jul", "July"),
    ("Aug", "August"),
    ("Sep", "September"),
    ("Sept", "September"),
    ("Oct", "October"),
    ("Nov", "November"),
    ("Dec", "December"),
];

/// Formats accepted for last-modified cells without a UTC offset
pub const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Formats accepted for last-modified cells carrying a UTC offset
pub const OFFSET_TIMESTAMP_FORMATS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];
