//! Row-to-payload builders for BRAHMS exports
//!
//! This module assembles normalised fields into the payloads the garden API
//! accepts: one collection payload per living-collection row, and one species
//! query plus file locator per image row.

use std::path::PathBuf;
use tracing::warn;

use super::column_mapping::ImageColumns;
use super::field_parsers::{
    FieldError, null_to_none, parse_bloom_time, parse_coordinate, parse_hardiness,
    parse_plant_date, parse_trait_flag, parse_utah_native,
};
use super::path_mapping::PathMapper;
use super::row_cleaner::clean_row;
use crate::app::models::{
    CollectionPayload, Family, Garden, Genus, ImageQuery, ImageRecord, Location, Species,
};
use crate::config::ParserConfig;
use crate::constants::BYTE_ORDER_MARK;
use crate::{Error, Result};

/// Build the collection payload for one living-collection row.
///
/// The row is cleaned before extraction. Returns a
/// [`Error::MalformedRow`] for rows shorter than the column table and a
/// [`Error::RowRejected`] naming the plant id and field when a field fails
/// under the configured policy. Coordinates must be numeric under any policy.
pub fn build_collection_payload<S: AsRef<str>>(
    row: &[S],
    config: &ParserConfig,
) -> Result<CollectionPayload> {
    let row = clean_row(row);
    let fields = config.collection_columns.extract(&row)?;
    let plant_id = fields.plant_id.trim();
    let policy = config.field_policy;

    let reject =
        |error: FieldError| Error::row_rejected(plant_id, error.field(), error.to_string());

    let hardiness = parse_hardiness(fields.hardiness, policy).map_err(reject)?;

    let bloom_time = match parse_bloom_time(fields.bloom_time) {
        Ok(months) => months,
        Err(error) if policy.is_strict() => return Err(reject(error)),
        Err(error) => {
            warn!(plant_id, "Clearing bloom_time: {}", error);
            Vec::new()
        }
    };

    let date_parts = [fields.plant_day, fields.plant_month, fields.plant_year];
    let plant_date = if date_parts.iter().all(|part| !part.trim().is_empty()) {
        match parse_plant_date(fields.plant_day, fields.plant_month, fields.plant_year) {
            Ok(date) => date,
            Err(error) if policy.is_strict() => return Err(reject(error)),
            Err(error) => {
                warn!(plant_id, "Clearing plant_date: {}", error);
                None
            }
        }
    } else {
        None
    };

    let location = Location {
        latitude: parse_coordinate(fields.latitude, "latitude").map_err(reject)?,
        longitude: parse_coordinate(fields.longitude, "longitude").map_err(reject)?,
    };

    Ok(CollectionPayload {
        species: Species {
            genus: Genus {
                family: Family {
                    name: fields.family_name.to_string(),
                    vernacular_name: fields.family_vernacular_name.to_string(),
                },
                name: fields.genus_name.to_string(),
            },
            name: fields.species_name.to_string(),
            cultivar: fields.cultivar.to_string(),
            vernacular_name: fields.vernacular_name.to_string(),
            habit: fields.habit.to_string(),
            hardiness,
            water_regime: fields.water_regime.to_string(),
            exposure: fields.exposure.to_string(),
            bloom_time,
            plant_size: fields.plant_size.to_string(),
            flower_color: fields.flower_color.to_string(),
            utah_native: parse_utah_native(fields.utah_native),
            plant_select: parse_trait_flag(fields.plant_select),
            deer_resist: parse_trait_flag(fields.deer_resist),
            rabbit_resist: parse_trait_flag(fields.rabbit_resist),
            bee_friend: parse_trait_flag(fields.bee_friend),
        },
        garden: Garden {
            area: fields.garden_area.to_string(),
            name: fields.garden_name.to_string(),
            code: fields.garden_code.to_string(),
        },
        location,
        plant_date,
        plant_id: fields.plant_id.to_string(),
        commemoration_category: fields.commemoration_category.to_string(),
        commemoration_person: fields.commemoration_person.to_string(),
    })
}

/// Build the collection payload for one row, logging and dropping rejected rows
pub fn row_to_collection_payload<S: AsRef<str>>(
    row: &[S],
    config: &ParserConfig,
) -> Option<CollectionPayload> {
    match build_collection_payload(row, config) {
        Ok(payload) => Some(payload),
        Err(error) => {
            warn!(
                plant_id = config.collection_columns.row_id(row),
                "Skipping collection row: {}", error
            );
            None
        }
    }
}

/// Species search filter for an image row; `NULL` name, cultivar and
/// vernacular name become absent
pub fn extract_species_query<S: AsRef<str>>(
    row: &[S],
    columns: &ImageColumns,
) -> Result<ImageQuery> {
    let fields = columns.extract(row)?;

    Ok(ImageQuery {
        name: null_to_none(fields.species),
        cultivar: null_to_none(fields.cultivar),
        vernacular_name: null_to_none(fields.vernacular_name),
        genus: fields.genus.to_string(),
    })
}

/// Copyright text of an image row
pub fn extract_copyright<S: AsRef<str>>(row: &[S], columns: &ImageColumns) -> Result<String> {
    let fields = columns.extract(row)?;
    Ok(fields.copyright.to_string())
}

/// Local path of the image file: mapped directory joined with the
/// BOM-stripped file name
pub fn construct_image_path<S: AsRef<str>>(
    row: &[S],
    columns: &ImageColumns,
    mapper: &dyn PathMapper,
) -> Result<PathBuf> {
    let fields = columns.extract(row)?;
    let file_name = fields.file_name.replace(BYTE_ORDER_MARK, "");

    Ok(mapper.map_directory(fields.directory).join(file_name))
}

/// Species query, file locator and copyright for one image row.
///
/// Rows shorter than the image column table are a [`Error::MalformedRow`]
/// carrying the file name; they are never turned into an empty query.
pub fn row_to_image_query<S: AsRef<str>>(
    row: &[S],
    config: &ParserConfig,
    mapper: &dyn PathMapper,
) -> Result<ImageRecord> {
    let columns = &config.image_columns;

    Ok(ImageRecord {
        query: extract_species_query(row, columns)?,
        file_path: construct_image_path(row, columns, mapper)?,
        copyright: extract_copyright(row, columns)?,
    })
}
