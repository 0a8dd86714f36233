//! Tests for the declared column tables

use super::*;
use crate::Error;
use crate::app::services::brahms_parser::column_mapping::{CollectionColumns, ImageColumns};

#[test]
fn test_default_table_lengths() {
    assert_eq!(CollectionColumns::default().required_len(), 31);
    assert_eq!(ImageColumns::default().required_len(), 7);
}

#[test]
fn test_collection_header_validation() {
    let columns = CollectionColumns::default();

    let header: Vec<String> = (0..32).map(|i| format!("col{i}")).collect();
    assert!(columns.validate_header(&header).is_ok());

    // Extra trailing columns are allowed
    let wide: Vec<String> = (0..40).map(|i| format!("col{i}")).collect();
    assert!(columns.validate_header(&wide).is_ok());

    let narrow: Vec<String> = (0..24).map(|i| format!("col{i}")).collect();
    match columns.validate_header(&narrow).unwrap_err() {
        Error::SchemaMismatch {
            schema,
            expected,
            found,
        } => {
            assert_eq!(schema, "collection");
            assert_eq!(expected, 31);
            assert_eq!(found, 24);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_image_header_validation() {
    let columns = ImageColumns::default();

    assert!(columns.validate_header(&sample_image_row()).is_ok());
    assert!(matches!(
        columns.validate_header(&["imagefile", "copyright"]),
        Err(Error::SchemaMismatch { found: 2, .. })
    ));
}

#[test]
fn test_collection_extract_named_fields() {
    let row = sample_collection_row();
    let fields = CollectionColumns::default().extract(&row).unwrap();

    assert_eq!(fields.genus_name, "Acer");
    assert_eq!(fields.plant_id, "2019-0042*1");
    assert_eq!(fields.utah_native, "Utah Native");
    assert_eq!(fields.bee_friend, "");
    assert_eq!(fields.last_modified, Some("2021-03-01T13:07:38+00:00"));
}

#[test]
fn test_last_modified_is_optional() {
    let columns = CollectionColumns::default();

    let mut row = sample_collection_row();
    row.truncate(31);
    assert_eq!(columns.extract(&row).unwrap().last_modified, None);

    let row = collection_row_with(31, "   ");
    assert_eq!(columns.last_modified(&row), None);

    let no_column = CollectionColumns {
        last_modified: None,
        ..Default::default()
    };
    assert_eq!(no_column.last_modified(&sample_collection_row()), None);
}

#[test]
fn test_custom_table_positions() {
    let columns = ImageColumns {
        file_name: 6,
        vernacular_name: 0,
        ..Default::default()
    };
    let row = sample_image_row();
    let fields = columns.extract(&row).unwrap();

    assert_eq!(fields.file_name, "Bigtooth Maple");
    assert_eq!(fields.vernacular_name, "\u{feff}acer_grandidentatum_01.jpg");
}

#[test]
fn test_row_ids_for_diagnostics() {
    let collection = CollectionColumns::default();
    assert_eq!(collection.row_id(&sample_collection_row()), "2019-0042*1");
    assert_eq!(collection.row_id(&["Aceraceae", "Maple Family"]), "Aceraceae");
    assert_eq!(collection.row_id::<String>(&[]), "<empty row>");

    let image = ImageColumns::default();
    assert_eq!(
        image.row_id(&sample_image_row()),
        "acer_grandidentatum_01.jpg"
    );
}
