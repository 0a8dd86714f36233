//! Test utilities for BRAHMS parser testing
//!
//! Provides sample export rows and temporary export files shared by the
//! parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

// Test modules
mod column_mapping_tests;
mod export_reader_tests;
mod field_parser_tests;

/// A complete living-collection row as BRAHMS exports it
pub fn sample_collection_row() -> Vec<String> {
    [
        "Aceraceae,",                 // 0 family
        "Maple Family",               // 1 family vernacular
        "Acer",                       // 2 genus
        "grandidentatum",             // 3 species
        "",                           // 4 cultivar
        "Bigtooth Maple",             // 5 vernacular
        "Tree",                       // 6 habit
        "4, 5, 6",                    // 7 hardiness
        "Low",                        // 8 water regime
        "Full Sun",                   // 9 exposure
        "Apr, May",                   // 10 bloom time
        "Large",                      // 11 plant size
        "Yellow",                     // 12 flower colour
        "Natural Area",               // 13 garden area
        "Red Butte Garden",           // 14 garden name
        "RBG",                        // 15 garden code
        "2019-0042*1",                // 16 plant id
        "40.7608123456",              // 17 latitude
        "-111.8238499999",            // 18 longitude
        "Memorial",                   // 19 commemoration category
        "J. Doe",                     // 20 commemoration person
        "15",                         // 21 plant day
        "6",                          // 22 plant month
        "2020",                       // 23 plant year
        "",                           // 24
        "",                           // 25
        "Utah Native",                // 26 utah native
        "x",                          // 27 plant select
        "Yes",                        // 28 deer resistant
        "no",                         // 29 rabbit resistant
        "",                           // 30 bee friendly
        "2021-03-01T13:07:38+00:00", // 31 last modified
    ]
    .iter()
    .map(|cell| cell.to_string())
    .collect()
}

/// Sample collection row with one cell replaced
pub fn collection_row_with(index: usize, value: &str) -> Vec<String> {
    let mut row = sample_collection_row();
    row[index] = value.to_string();
    row
}

/// A complete image row with a byte-order mark on the file name
pub fn sample_image_row() -> Vec<String> {
    [
        "\u{feff}acer_grandidentatum_01.jpg",
        "© Red Butte Garden",
        "B:\\Acer\\",
        "Acer",
        "grandidentatum",
        "NULL",
        "Bigtooth Maple",
    ]
    .iter()
    .map(|cell| cell.to_string())
    .collect()
}

/// Helper to create a temporary file with given bytes
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
