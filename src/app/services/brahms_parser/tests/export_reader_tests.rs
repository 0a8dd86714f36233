//! Tests for the export row source

use super::*;
use crate::Error;
use crate::app::services::brahms_parser::export_reader::BrahmsExportReader;

#[test]
fn test_reads_header_and_rows() {
    let temp_file = create_temp_file(
        b"imagefile,copyright,directoryname\nacer.jpg,RBG,B:\\Acer\\\nabies.jpg,RBG,B:\\Abies\\\n",
    );
    let reader = BrahmsExportReader::new(temp_file.path());

    let mut rows = reader.rows().unwrap();
    let header = rows.read_header().unwrap().unwrap();
    assert_eq!(header, vec!["imagefile", "copyright", "directoryname"]);

    let data: Vec<Vec<String>> = rows.by_ref().map(|row| row.unwrap()).collect();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0], vec!["acer.jpg", "RBG", "B:\\Acer\\"]);
    assert_eq!(rows.rows_read(), 3);
}

#[test]
fn test_rows_restart_from_the_beginning() {
    let temp_file = create_temp_file(b"h1,h2\na,b\n");
    let reader = BrahmsExportReader::new(temp_file.path());

    assert_eq!(reader.rows().unwrap().count(), 2);
    assert_eq!(reader.rows().unwrap().count(), 2);
}

#[test]
fn test_quoted_cells_and_ragged_rows() {
    let temp_file = create_temp_file(b"family,hardiness\n\"Aceraceae\",\"4, 5, 6\"\nshort\n");
    let rows: Vec<Vec<String>> = BrahmsExportReader::new(temp_file.path())
        .rows()
        .unwrap()
        .skip(1)
        .map(|row| row.unwrap())
        .collect();

    assert_eq!(rows[0], vec!["Aceraceae", "4, 5, 6"]);
    assert_eq!(rows[1], vec!["short"]);
}

#[test]
fn test_custom_delimiter() {
    let temp_file = create_temp_file(b"a|b|c\n1|2,3|4\n");
    let rows: Vec<Vec<String>> = BrahmsExportReader::new(temp_file.path())
        .with_delimiter(b'|')
        .rows()
        .unwrap()
        .map(|row| row.unwrap())
        .collect();

    assert_eq!(rows[1], vec!["1", "2,3", "4"]);
}

#[test]
fn test_windows_1252_export() {
    // "Peña" and "©" in windows-1252
    let bytes = b"name,copyright\nPe\xf1a,\xa9 RBG\n";
    let temp_file = create_temp_file(bytes);

    let utf8 = BrahmsExportReader::new(temp_file.path());
    assert!(matches!(utf8.rows(), Err(Error::Decoding { .. })));

    let cp1252 = BrahmsExportReader::new(temp_file.path()).with_encoding("windows-1252");
    assert_eq!(cp1252.encoding(), "windows-1252");
    let rows: Vec<Vec<String>> = cp1252.rows().unwrap().map(|row| row.unwrap()).collect();
    assert_eq!(rows[1], vec!["Peña", "© RBG"]);
}

#[test]
fn test_missing_file() {
    let reader = BrahmsExportReader::new("/nonexistent/brahms/export.csv");
    assert!(matches!(reader.rows(), Err(Error::FileNotFound { .. })));
}

#[test]
fn test_unknown_encoding_label() {
    let temp_file = create_temp_file(b"a,b\n");
    let reader = BrahmsExportReader::new(temp_file.path()).with_encoding("klingon");
    assert!(matches!(reader.rows(), Err(Error::Configuration { .. })));
}

#[test]
fn test_empty_file_has_no_header() {
    let temp_file = create_temp_file(b"");
    let mut rows = BrahmsExportReader::new(temp_file.path()).rows().unwrap();
    assert!(rows.read_header().unwrap().is_none());
}
