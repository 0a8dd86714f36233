//! Configuration management and validation.
//!
//! Provides the configuration structures passed explicitly through the sync
//! pipeline: API target, input dialect, field-failure policy, path remapping
//! and worker pool sizing.

use crate::app::services::brahms_parser::column_mapping::{CollectionColumns, ImageColumns};
use crate::app::services::brahms_parser::path_mapping::{IdentityMapper, PathMapper, PrefixMapper};
use crate::constants::{
    DEFAULT_DELIMITER, DEFAULT_ENCODING, DEFAULT_FALLBACK_ENCODING, DEFAULT_PARALLEL_WORKERS,
    DEFAULT_TARGET, MAX_PARALLEL_WORKERS, STATE_DIR_NAME, STATE_FILE_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// How the payload builder treats a field that fails to normalise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Reject the whole row on any unparseable hardiness zone, bloom month or date part
    #[default]
    Strict,
    /// Log the failure, drop or blank the offending field and keep the row
    Lenient,
}

impl FieldPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, FieldPolicy::Strict)
    }
}

/// Directory remapping applied when locating image files
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathRemap {
    /// Use the directory column as-is
    #[default]
    Identity,
    /// Replace a leading prefix (e.g. a mapped network drive) with a local mirror
    Prefix { from: String, to: PathBuf },
}

impl PathRemap {
    /// Build the path mapper for this remap strategy
    pub fn mapper(&self) -> Box<dyn PathMapper> {
        match self {
            PathRemap::Identity => Box::new(IdentityMapper),
            PathRemap::Prefix { from, to } => Box::new(PrefixMapper::new(from.clone(), to.clone())),
        }
    }
}

/// Settings consumed by the row-to-payload core
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Field-failure policy
    pub field_policy: FieldPolicy,

    /// Image directory remapping strategy
    pub path_remap: PathRemap,

    /// Column table of the collection export
    #[serde(default)]
    pub collection_columns: CollectionColumns,

    /// Column table of the image export
    #[serde(default)]
    pub image_columns: ImageColumns,
}

impl ParserConfig {
    pub fn strict() -> Self {
        Self {
            field_policy: FieldPolicy::Strict,
            ..Self::default()
        }
    }

    pub fn lenient() -> Self {
        Self {
            field_policy: FieldPolicy::Lenient,
            ..Self::default()
        }
    }
}

/// Remote API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host (and optional port) of the garden website
    pub target: String,

    /// Use https instead of http
    pub ssl: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            ssl: true,
        }
    }
}

impl ApiConfig {
    /// URL scheme matching the ssl setting
    pub fn scheme(&self) -> &'static str {
        if self.ssl { "https" } else { "http" }
    }

    /// Base URL of the website, e.g. `https://redbuttegarden.org/`
    pub fn base_url(&self) -> String {
        format!("{}://{}/", self.scheme(), self.target)
    }
}

/// Export dialect settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Collection export path
    pub plant_data_path: Option<PathBuf>,

    /// Image export path
    pub image_data_path: Option<PathBuf>,

    /// Field delimiter (single ASCII character)
    pub delimiter: char,

    /// Encoding label (WHATWG name, e.g. "utf-8", "windows-1252")
    pub encoding: String,

    /// Encoding retried once when `encoding` fails to decode a file
    pub fallback_encoding: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            plant_data_path: None,
            image_data_path: None,
            delimiter: DEFAULT_DELIMITER,
            encoding: DEFAULT_ENCODING.to_string(),
            fallback_encoding: Some(DEFAULT_FALLBACK_ENCODING.to_string()),
        }
    }
}

impl InputConfig {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(Error::configuration(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}

/// Worker pool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Number of rows processed concurrently
    pub workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_PARALLEL_WORKERS,
        }
    }
}

/// Complete configuration for one sync run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub api: ApiConfig,
    pub input: InputConfig,
    pub parsing: ParserConfig,
    pub performance: PerformanceConfig,

    /// Location of the last-run state file
    pub state_file: PathBuf,

    /// Ignore the last-modified filter and sync every row
    pub full_sync: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            input: InputConfig::default(),
            parsing: ParserConfig::default(),
            performance: PerformanceConfig::default(),
            state_file: Self::default_state_path(),
            full_sync: false,
        }
    }
}

impl SyncConfig {
    /// Default state file location under the user config directory
    pub fn default_state_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join(STATE_DIR_NAME).join(STATE_FILE_NAME),
            None => PathBuf::from(STATE_FILE_NAME),
        }
    }

    /// Set the API target host
    pub fn with_target(mut self, target: impl Into<String>, ssl: bool) -> Self {
        self.api.target = target.into();
        self.api.ssl = ssl;
        self
    }

    /// Set the collection export path
    pub fn with_plant_data_path(mut self, path: PathBuf) -> Self {
        self.input.plant_data_path = Some(path);
        self
    }

    /// Set the image export path
    pub fn with_image_data_path(mut self, path: PathBuf) -> Self {
        self.input.image_data_path = Some(path);
        self
    }

    /// Set delimiter and encoding
    pub fn with_dialect(mut self, delimiter: char, encoding: impl Into<String>) -> Self {
        self.input.delimiter = delimiter;
        self.input.encoding = encoding.into();
        self
    }

    /// Set the field-failure policy
    pub fn with_field_policy(mut self, policy: FieldPolicy) -> Self {
        self.parsing.field_policy = policy;
        self
    }

    /// Set the image directory remap strategy
    pub fn with_path_remap(mut self, remap: PathRemap) -> Self {
        self.parsing.path_remap = remap;
        self
    }

    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.performance.workers = workers;
        self
    }

    /// Set the state file path
    pub fn with_state_file(mut self, path: PathBuf) -> Self {
        self.state_file = path;
        self
    }

    /// Disable the last-modified filter
    pub fn with_full_sync(mut self) -> Self {
        self.full_sync = true;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.api.target.trim().is_empty() {
            return Err(Error::configuration("API target cannot be empty"));
        }

        if self.performance.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.performance.workers > MAX_PARALLEL_WORKERS {
            return Err(Error::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_PARALLEL_WORKERS
            )));
        }

        self.input.delimiter_byte()?;

        for label in std::iter::once(&self.input.encoding).chain(&self.input.fallback_encoding) {
            if encoding_rs::Encoding::for_label(label.as_bytes()).is_none() {
                return Err(Error::configuration(format!(
                    "Unknown encoding label '{}'",
                    label
                )));
            }
        }

        for path in [&self.input.plant_data_path, &self.input.image_data_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(Error::file_not_found(path.display().to_string()));
            }
        }

        if let PathRemap::Prefix { from, .. } = &self.parsing.path_remap {
            if from.is_empty() {
                return Err(Error::configuration("Remap prefix cannot be empty"));
            }
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}
