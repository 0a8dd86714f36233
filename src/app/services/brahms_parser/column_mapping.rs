//! Declared column tables for BRAHMS exports
//!
//! BRAHMS exports carry no usable header names, so each schema is a fixed
//! table of column positions. The tables are checked against the header row
//! once per file and against each row before extraction, and all other code
//! works with the named fields they produce.

use crate::constants::BYTE_ORDER_MARK;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Column positions of the living-collections export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionColumns {
    pub family_name: usize,
    pub family_vernacular_name: usize,
    pub genus_name: usize,
    pub species_name: usize,
    pub cultivar: usize,
    pub vernacular_name: usize,
    pub habit: usize,
    pub hardiness: usize,
    pub water_regime: usize,
    pub exposure: usize,
    pub bloom_time: usize,
    pub plant_size: usize,
    pub flower_color: usize,
    pub garden_area: usize,
    pub garden_name: usize,
    pub garden_code: usize,
    pub plant_id: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub commemoration_category: usize,
    pub commemoration_person: usize,
    pub plant_day: usize,
    pub plant_month: usize,
    pub plant_year: usize,
    pub utah_native: usize,
    pub plant_select: usize,
    pub deer_resist: usize,
    pub rabbit_resist: usize,
    pub bee_friend: usize,
    /// Optional trailing column; rows may end before it
    pub last_modified: Option<usize>,
}

impl Default for CollectionColumns {
    fn default() -> Self {
        Self {
            family_name: 0,
            family_vernacular_name: 1,
            genus_name: 2,
            species_name: 3,
            cultivar: 4,
            vernacular_name: 5,
            habit: 6,
            hardiness: 7,
            water_regime: 8,
            exposure: 9,
            bloom_time: 10,
            plant_size: 11,
            flower_color: 12,
            garden_area: 13,
            garden_name: 14,
            garden_code: 15,
            plant_id: 16,
            latitude: 17,
            longitude: 18,
            commemoration_category: 19,
            commemoration_person: 20,
            plant_day: 21,
            plant_month: 22,
            plant_year: 23,
            utah_native: 26,
            plant_select: 27,
            deer_resist: 28,
            rabbit_resist: 29,
            bee_friend: 30,
            last_modified: Some(31),
        }
    }
}

/// Named view over one collection row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionFields<'a> {
    pub family_name: &'a str,
    pub family_vernacular_name: &'a str,
    pub genus_name: &'a str,
    pub species_name: &'a str,
    pub cultivar: &'a str,
    pub vernacular_name: &'a str,
    pub habit: &'a str,
    pub hardiness: &'a str,
    pub water_regime: &'a str,
    pub exposure: &'a str,
    pub bloom_time: &'a str,
    pub plant_size: &'a str,
    pub flower_color: &'a str,
    pub garden_area: &'a str,
    pub garden_name: &'a str,
    pub garden_code: &'a str,
    pub plant_id: &'a str,
    pub latitude: &'a str,
    pub longitude: &'a str,
    pub commemoration_category: &'a str,
    pub commemoration_person: &'a str,
    pub plant_day: &'a str,
    pub plant_month: &'a str,
    pub plant_year: &'a str,
    pub utah_native: &'a str,
    pub plant_select: &'a str,
    pub deer_resist: &'a str,
    pub rabbit_resist: &'a str,
    pub bee_friend: &'a str,
    pub last_modified: Option<&'a str>,
}

impl CollectionColumns {
    const SCHEMA: &'static str = "collection";

    fn required_indices(&self) -> [usize; 29] {
        [
            self.family_name,
            self.family_vernacular_name,
            self.genus_name,
            self.species_name,
            self.cultivar,
            self.vernacular_name,
            self.habit,
            self.hardiness,
            self.water_regime,
            self.exposure,
            self.bloom_time,
            self.plant_size,
            self.flower_color,
            self.garden_area,
            self.garden_name,
            self.garden_code,
            self.plant_id,
            self.latitude,
            self.longitude,
            self.commemoration_category,
            self.commemoration_person,
            self.plant_day,
            self.plant_month,
            self.plant_year,
            self.utah_native,
            self.plant_select,
            self.deer_resist,
            self.rabbit_resist,
            self.bee_friend,
        ]
    }

    /// Minimum number of cells a row needs for extraction
    pub fn required_len(&self) -> usize {
        self.required_indices().iter().max().map_or(0, |max| max + 1)
    }

    /// Check the header row of an export against this table
    pub fn validate_header<S: AsRef<str>>(&self, header: &[S]) -> Result<()> {
        validate_len(Self::SCHEMA, self.required_len(), header.len())
    }

    /// Plant identifier of a row, for diagnostics on rows of any length
    pub fn row_id<'a, S: AsRef<str>>(&self, row: &'a [S]) -> &'a str {
        row.get(self.plant_id)
            .or_else(|| row.first())
            .map(|cell| cell.as_ref().trim())
            .unwrap_or("<empty row>")
    }

    /// Non-empty last-modified cell, if the table declares one and the row has it
    pub fn last_modified<'a, S: AsRef<str>>(&self, row: &'a [S]) -> Option<&'a str> {
        non_empty_cell(row, self.last_modified)
    }

    /// Map a row onto named fields
    pub fn extract<'a, S: AsRef<str>>(&self, row: &'a [S]) -> Result<CollectionFields<'a>> {
        let required = self.required_len();
        if row.len() < required {
            return Err(Error::malformed_row(self.row_id(row), required, row.len()));
        }

        let cell = |index: usize| row[index].as_ref();

        Ok(CollectionFields {
            family_name: cell(self.family_name),
            family_vernacular_name: cell(self.family_vernacular_name),
            genus_name: cell(self.genus_name),
            species_name: cell(self.species_name),
            cultivar: cell(self.cultivar),
            vernacular_name: cell(self.vernacular_name),
            habit: cell(self.habit),
            hardiness: cell(self.hardiness),
            water_regime: cell(self.water_regime),
            exposure: cell(self.exposure),
            bloom_time: cell(self.bloom_time),
            plant_size: cell(self.plant_size),
            flower_color: cell(self.flower_color),
            garden_area: cell(self.garden_area),
            garden_name: cell(self.garden_name),
            garden_code: cell(self.garden_code),
            plant_id: cell(self.plant_id),
            latitude: cell(self.latitude),
            longitude: cell(self.longitude),
            commemoration_category: cell(self.commemoration_category),
            commemoration_person: cell(self.commemoration_person),
            plant_day: cell(self.plant_day),
            plant_month: cell(self.plant_month),
            plant_year: cell(self.plant_year),
            utah_native: cell(self.utah_native),
            plant_select: cell(self.plant_select),
            deer_resist: cell(self.deer_resist),
            rabbit_resist: cell(self.rabbit_resist),
            bee_friend: cell(self.bee_friend),
            last_modified: self.last_modified(row),
        })
    }
}

/// Column positions of the species image export
///
/// Row layout: imagefile | copyright | directoryname | genusname |
/// speciesname | cultivar | vernacularname
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageColumns {
    pub file_name: usize,
    pub copyright: usize,
    pub directory: usize,
    pub genus: usize,
    pub species: usize,
    pub cultivar: usize,
    pub vernacular_name: usize,
    /// Optional trailing column; rows may end before it
    pub last_modified: Option<usize>,
}

impl Default for ImageColumns {
    fn default() -> Self {
        Self {
            file_name: 0,
            copyright: 1,
            directory: 2,
            genus: 3,
            species: 4,
            cultivar: 5,
            vernacular_name: 6,
            last_modified: Some(11),
        }
    }
}

/// Named view over one image row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFields<'a> {
    pub file_name: &'a str,
    pub copyright: &'a str,
    pub directory: &'a str,
    pub genus: &'a str,
    pub species: &'a str,
    pub cultivar: &'a str,
    pub vernacular_name: &'a str,
    pub last_modified: Option<&'a str>,
}

impl ImageColumns {
    const SCHEMA: &'static str = "image";

    fn required_indices(&self) -> [usize; 7] {
        [
            self.file_name,
            self.copyright,
            self.directory,
            self.genus,
            self.species,
            self.cultivar,
            self.vernacular_name,
        ]
    }

    /// Minimum number of cells a row needs for extraction
    pub fn required_len(&self) -> usize {
        self.required_indices().iter().max().map_or(0, |max| max + 1)
    }

    /// Check the header row of an export against this table
    pub fn validate_header<S: AsRef<str>>(&self, header: &[S]) -> Result<()> {
        validate_len(Self::SCHEMA, self.required_len(), header.len())
    }

    /// Image file name of a row, for diagnostics on rows of any length
    pub fn row_id<'a, S: AsRef<str>>(&self, row: &'a [S]) -> &'a str {
        row.get(self.file_name)
            .map(|cell| cell.as_ref().trim().trim_start_matches(BYTE_ORDER_MARK))
            .unwrap_or("<empty row>")
    }

    /// Non-empty last-modified cell, if the table declares one and the row has it
    pub fn last_modified<'a, S: AsRef<str>>(&self, row: &'a [S]) -> Option<&'a str> {
        non_empty_cell(row, self.last_modified)
    }

    /// Map a row onto named fields
    pub fn extract<'a, S: AsRef<str>>(&self, row: &'a [S]) -> Result<ImageFields<'a>> {
        let required = self.required_len();
        if row.len() < required {
            return Err(Error::malformed_row(self.row_id(row), required, row.len()));
        }

        let cell = |index: usize| row[index].as_ref();

        Ok(ImageFields {
            file_name: cell(self.file_name),
            copyright: cell(self.copyright),
            directory: cell(self.directory),
            genus: cell(self.genus),
            species: cell(self.species),
            cultivar: cell(self.cultivar),
            vernacular_name: cell(self.vernacular_name),
            last_modified: self.last_modified(row),
        })
    }
}

fn validate_len(schema: &str, expected: usize, found: usize) -> Result<()> {
    if found < expected {
        Err(Error::schema_mismatch(schema, expected, found))
    } else {
        Ok(())
    }
}

fn non_empty_cell<S: AsRef<str>>(row: &[S], index: Option<usize>) -> Option<&str> {
    index
        .and_then(|index| row.get(index))
        .map(|cell| cell.as_ref().trim())
        .filter(|cell| !cell.is_empty())
}
