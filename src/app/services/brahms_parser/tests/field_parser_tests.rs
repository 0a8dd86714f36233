//! Tests for the field normalisers

use crate::app::services::brahms_parser::field_parsers::*;
use crate::config::FieldPolicy;
use crate::constants::MONTH_ALIASES;
use chrono::{NaiveDate, NaiveDateTime};

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

#[test]
fn test_every_alias_maps_to_its_month() {
    for (alias, month) in MONTH_ALIASES {
        assert_eq!(parse_bloom_time(alias).unwrap(), vec![month.to_string()]);
    }
}

#[test]
fn test_canonical_abbreviations() {
    let canonical = [
        ("Jan", "January"),
        ("Feb", "February"),
        ("Mar", "March"),
        ("Apr", "April"),
        ("May", "May"),
        ("Jun", "June"),
        ("Jul", "July"),
        ("Aug", "August"),
        ("Sep", "September"),
        ("Oct", "October"),
        ("Nov", "November"),
        ("Dec", "December"),
    ];

    for (abbreviation, month) in canonical {
        assert_eq!(month_name(abbreviation), Some(month));
    }
}

#[test]
fn test_known_variants() {
    assert_eq!(parse_bloom_time("Arp").unwrap(), vec!["April"]);
    assert_eq!(parse_bloom_time("MAy").unwrap(), vec!["May"]);
    assert_eq!(parse_bloom_time("Sept").unwrap(), vec!["September"]);
}

#[test]
fn test_bloom_time_lists() {
    assert_eq!(
        parse_bloom_time("Jan, Feb").unwrap(),
        vec!["January", "February"]
    );
    assert_eq!(
        parse_bloom_time("Jan,Feb").unwrap(),
        vec!["January", "February"]
    );
    assert_eq!(
        parse_bloom_time("Jun, Jul,Aug, Jun").unwrap(),
        vec!["June", "July", "August", "June"]
    );
    assert_eq!(parse_bloom_time(" Oct ").unwrap(), vec!["October"]);
}

#[test]
fn test_bloom_time_empty_cell() {
    assert!(parse_bloom_time("").unwrap().is_empty());
}

#[test]
fn test_bloom_time_unknown_token_fails_field() {
    let error = parse_bloom_time("Jan, Spring").unwrap_err();
    assert_eq!(
        error,
        FieldError::UnknownMonth {
            token: "Spring".to_string(),
            raw: "Jan, Spring".to_string(),
        }
    );
    assert_eq!(error.field(), "bloom_time");

    // Lower-case variants are not guessed
    assert!(parse_bloom_time("jan").is_err());
    assert!(parse_bloom_time("Jan,Febr").is_err());
}

#[test]
fn test_plant_date_valid() {
    assert_eq!(
        parse_plant_date("15", "6", "2020").unwrap(),
        Some("15-6-2020".to_string())
    );
    assert_eq!(
        parse_plant_date(" 1", "12 ", "1999").unwrap(),
        Some("1-12-1999".to_string())
    );
}

#[test]
fn test_plant_date_bounds_are_inclusive() {
    assert!(parse_plant_date("31", "12", "2020").unwrap().is_some());
    assert!(parse_plant_date("1", "1", "2020").unwrap().is_some());
}

#[test]
fn test_plant_date_out_of_range_is_absent() {
    assert_eq!(parse_plant_date("32", "6", "2020").unwrap(), None);
    assert_eq!(parse_plant_date("0", "6", "2020").unwrap(), None);
    assert_eq!(parse_plant_date("15", "13", "2020").unwrap(), None);
    assert_eq!(parse_plant_date("15", "0", "2020").unwrap(), None);
    assert_eq!(parse_plant_date("15", "6", "20").unwrap(), None);
    assert_eq!(parse_plant_date("15", "6", "02020").unwrap(), None);
}

#[test]
fn test_plant_date_not_checked_against_calendar() {
    assert_eq!(
        parse_plant_date("31", "4", "2021").unwrap(),
        Some("31-4-2021".to_string())
    );
}

#[test]
fn test_plant_date_non_numeric_is_error() {
    assert!(matches!(
        parse_plant_date("fifteen", "6", "2020"),
        Err(FieldError::InvalidPlantDate { .. })
    ));
    assert!(parse_plant_date("15", "June", "2020").is_err());
}

#[test]
fn test_plant_date_year_taken_as_written() {
    assert_eq!(
        parse_plant_date("15", "6", "c.90").unwrap(),
        Some("15-6-c.90".to_string())
    );
    assert_eq!(
        parse_plant_date("1", "1", "19??").unwrap(),
        Some("1-1-19??".to_string())
    );
    assert_eq!(parse_plant_date("1", "1", "c.1990").unwrap(), None);
}

#[test]
fn test_hardiness_valid() {
    assert_eq!(
        parse_hardiness("4, 5, 6", FieldPolicy::Strict).unwrap(),
        vec![4, 5, 6]
    );
    assert_eq!(
        parse_hardiness(" 7,8 ", FieldPolicy::Strict).unwrap(),
        vec![7, 8]
    );
    assert!(parse_hardiness("", FieldPolicy::Strict).unwrap().is_empty());
}

#[test]
fn test_hardiness_bad_element_by_policy() {
    let error = parse_hardiness("4, x, 6", FieldPolicy::Strict).unwrap_err();
    assert_eq!(
        error,
        FieldError::InvalidHardiness {
            element: "x".to_string(),
            raw: "4, x, 6".to_string(),
        }
    );

    assert_eq!(
        parse_hardiness("4, x, 6", FieldPolicy::Lenient).unwrap(),
        vec![4, 6]
    );
}

#[test]
fn test_trait_flags() {
    for truthy in ["Yes", "yes", "YES", "x", "X", " x "] {
        assert!(parse_trait_flag(truthy), "{truthy:?} should be true");
    }
    for falsy in ["", "No", "maybe", "Utah Native", "y"] {
        assert!(!parse_trait_flag(falsy), "{falsy:?} should be false");
    }
}

#[test]
fn test_utah_native_accepts_phrase() {
    assert!(parse_utah_native("Utah Native"));
    assert!(parse_utah_native("utah native"));
    assert!(parse_utah_native("Yes"));
    assert!(!parse_utah_native("Native"));
}

#[test]
fn test_coordinates_rounded() {
    assert_eq!(parse_coordinate("40.7608123456", "latitude").unwrap(), 40.760812);
    assert_eq!(parse_coordinate(" -111.8 ", "longitude").unwrap(), -111.8);
    assert_eq!(round_coordinate(12.5), 12.5);
}

#[test]
fn test_huge_coordinates_stay_finite() {
    let value = parse_coordinate("1e303", "latitude").unwrap();
    assert!(value.is_finite());
    assert_eq!(value, 1e303);
    assert_eq!(round_coordinate(-1e15), -1e15);
    assert_eq!(serde_json::to_string(&value).unwrap(), "1e303");
}

#[test]
fn test_invalid_coordinates() {
    for raw in ["", "north", "NaN", "inf"] {
        let error = parse_coordinate(raw, "latitude").unwrap_err();
        assert_eq!(error.field(), "latitude");
    }
}

#[test]
fn test_null_placeholder() {
    assert_eq!(null_to_none("NULL"), None);
    assert_eq!(null_to_none("null"), Some("null".to_string()));
    assert_eq!(null_to_none(""), Some(String::new()));
}

#[test]
fn test_last_modified_formats() {
    let expected = datetime(2021, 3, 1, 13, 7, 38);

    assert_eq!(parse_last_modified("2021-03-01T13:07:38+00:00"), Some(expected));
    assert_eq!(parse_last_modified("2021-03-01 13:07:38-07:00"), Some(expected));
    assert_eq!(parse_last_modified("2021-03-01T13:07:38"), Some(expected));
    assert_eq!(parse_last_modified("3/1/2021  1:07:38 PM"), Some(expected));
    assert!(parse_last_modified("2021-03-01T13:07:38.250+00:00").is_some());
}

#[test]
fn test_last_modified_unparseable() {
    assert_eq!(parse_last_modified("yesterday"), None);
    assert_eq!(parse_last_modified(""), None);
}
