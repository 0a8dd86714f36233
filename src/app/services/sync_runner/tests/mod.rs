//! Test utilities for sync runner testing
//!
//! Provides an in-memory [`GardenApi`] and helpers that write sample exports
//! to temporary files.

use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::NamedTempFile;

use crate::app::models::{CollectionPayload, ImageQuery, ImageRecord};
use crate::app::services::brahms_parser::tests::create_temp_file;
use crate::app::services::garden_api::{GardenApi, SpeciesSearch, SpeciesSummary};
use crate::{Error, Result};

mod runner_tests;

/// In-memory stand-in for the plant API
#[derive(Debug, Default)]
pub struct MockApi {
    /// Species ids returned for each genus
    pub species: HashMap<String, Vec<u64>>,
    /// Search counts that disagree with the returned page, per genus
    pub reported_counts: HashMap<String, u64>,
    /// Plant ids the collections endpoint refuses
    pub refused_plant_ids: Vec<String>,
    pub posted: Mutex<Vec<CollectionPayload>>,
    pub queries: Mutex<Vec<ImageQuery>>,
    pub uploads: Mutex<Vec<(u64, ImageRecord)>>,
}

impl MockApi {
    pub fn with_species(mut self, genus: &str, ids: &[u64]) -> Self {
        self.species.insert(genus.to_string(), ids.to_vec());
        self
    }

    pub fn reporting_count(mut self, genus: &str, count: u64) -> Self {
        self.reported_counts.insert(genus.to_string(), count);
        self
    }

    pub fn refusing(mut self, plant_id: &str) -> Self {
        self.refused_plant_ids.push(plant_id.to_string());
        self
    }

    pub fn posted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .posted
            .lock()
            .unwrap()
            .iter()
            .map(|payload| payload.plant_id.clone())
            .collect();
        ids.sort();
        ids
    }
}

impl GardenApi for MockApi {
    async fn find_species(&self, query: &ImageQuery) -> Result<SpeciesSearch> {
        self.queries.lock().unwrap().push(query.clone());

        let ids = self.species.get(&query.genus).cloned().unwrap_or_default();
        let count = self
            .reported_counts
            .get(&query.genus)
            .copied()
            .unwrap_or(ids.len() as u64);
        Ok(SpeciesSearch {
            count,
            results: ids.into_iter().map(|id| SpeciesSummary { id }).collect(),
        })
    }

    async fn post_collection(&self, payload: &CollectionPayload) -> Result<()> {
        if self.refused_plant_ids.contains(&payload.plant_id) {
            return Err(Error::api_status(
                "http://garden.test/plants/api/collections/",
                400,
                Some(r#"{"plant_id": ["already exists"]}"#.to_string()),
            ));
        }

        self.posted.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn set_species_image(&self, species_id: u64, record: &ImageRecord) -> Result<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((species_id, record.clone()));
        Ok(())
    }
}

/// Header row with one name per column
pub fn header(columns: usize) -> Vec<String> {
    (0..columns).map(|i| format!("column_{i}")).collect()
}

/// Write rows as a comma-separated UTF-8 export
pub fn write_export(rows: &[Vec<String>]) -> NamedTempFile {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row).unwrap();
    }
    create_temp_file(&writer.into_inner().unwrap())
}

/// Collection row with a given plant id and last-modified value
pub fn collection_row(plant_id: &str, last_modified: &str) -> Vec<String> {
    let mut row = crate::app::services::brahms_parser::tests::sample_collection_row();
    row[16] = plant_id.to_string();
    row[31] = last_modified.to_string();
    row
}

/// Image row for a genus with a last-modified column appended
pub fn image_row(file_name: &str, genus: &str, last_modified: &str) -> Vec<String> {
    let mut row = crate::app::services::brahms_parser::tests::sample_image_row();
    row[0] = file_name.to_string();
    row[3] = genus.to_string();
    row.resize(11, String::new());
    row.push(last_modified.to_string());
    row
}
