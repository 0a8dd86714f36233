//! Payload models for the garden plant API
//!
//! These structs mirror the JSON shapes the remote API accepts. A collection
//! payload is built fresh from one export row and sent once; an image query
//! is a search filter for the species endpoint, not a stored record.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Plant family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub name: String,
    pub vernacular_name: String,
}

/// Plant genus with its family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genus {
    pub family: Family,
    pub name: String,
}

/// Species with cultivation facts and trait flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub genus: Genus,
    pub name: String,
    pub cultivar: String,
    pub vernacular_name: String,
    pub habit: String,
    /// Hardiness zones; always a list, possibly empty
    pub hardiness: Vec<i32>,
    pub water_regime: String,
    pub exposure: String,
    /// Full month names in export order; always a list, possibly empty
    pub bloom_time: Vec<String>,
    pub plant_size: String,
    pub flower_color: String,
    pub utah_native: bool,
    pub plant_select: bool,
    pub deer_resist: bool,
    pub rabbit_resist: bool,
    pub bee_friend: bool,
}

/// Garden area the specimen is planted in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garden {
    pub area: String,
    pub name: String,
    pub code: String,
}

/// Coordinates rounded to six decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Payload POSTed to the collections endpoint for one specimen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPayload {
    pub species: Species,
    pub garden: Garden,
    pub location: Location,
    /// `day-month-year`, or null when the export has no usable date
    pub plant_date: Option<String>,
    pub plant_id: String,
    pub commemoration_category: String,
    pub commemoration_person: String,
}

/// Species search filter built from an image row
///
/// Absent fields are left out of the query string entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultivar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vernacular_name: Option<String>,
    pub genus: String,
}

/// Everything the orchestrator needs to attach one image to a species
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub query: ImageQuery,
    pub file_path: PathBuf,
    pub copyright: String,
}

impl ImageRecord {
    /// File name used in logs and multipart uploads
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }
}
