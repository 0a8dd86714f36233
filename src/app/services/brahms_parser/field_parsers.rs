//! Field normalisers for BRAHMS export cells
//!
//! Pure functions converting raw cell strings into the typed values the
//! garden API expects. Failures are returned as [`FieldError`] values so the
//! payload builder can decide, per the configured [`FieldPolicy`], whether a
//! failed field rejects the row or is blanked.

use crate::config::FieldPolicy;
use crate::constants::{
    MONTH_ALIASES, NAIVE_TIMESTAMP_FORMATS, NULL_PLACEHOLDER, OFFSET_TIMESTAMP_FORMATS,
    TRUTHY_VALUES, UTAH_NATIVE_VALUE,
};
use chrono::{DateTime, NaiveDateTime};
use tracing::{debug, warn};

/// A single field that could not be normalised
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown month abbreviation '{token}' in '{raw}'")]
    UnknownMonth { token: String, raw: String },

    #[error("unparseable hardiness zone '{element}' in '{raw}'")]
    InvalidHardiness { element: String, raw: String },

    #[error("non-numeric plant date (day '{day}', month '{month}', year '{year}')")]
    InvalidPlantDate {
        day: String,
        month: String,
        year: String,
    },

    #[error("invalid {field} '{value}'")]
    InvalidCoordinate { field: &'static str, value: String },
}

impl FieldError {
    /// Payload field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::UnknownMonth { .. } => "bloom_time",
            FieldError::InvalidHardiness { .. } => "hardiness",
            FieldError::InvalidPlantDate { .. } => "plant_date",
            FieldError::InvalidCoordinate { field, .. } => *field,
        }
    }
}

/// Look up the full month name for a bloom-time abbreviation
pub fn month_name(abbreviation: &str) -> Option<&'static str> {
    MONTH_ALIASES
        .iter()
        .find(|(alias, _)| *alias == abbreviation)
        .map(|(_, month)| *month)
}

/// Convert a bloom-time cell such as `"Apr, May, Jun"` into full month names.
///
/// Tokens are separated by `", "`. A token that is not a known abbreviation
/// is assumed to be missing the space after a comma and is split again on
/// `,`; a fragment that still does not match fails the field.
pub fn parse_bloom_time(raw: &str) -> Result<Vec<String>, FieldError> {
    let mut months = Vec::new();

    for token in raw.split(", ") {
        if let Some(month) = month_name(token.trim()) {
            months.push(month.to_string());
            continue;
        }

        for fragment in token.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            match month_name(fragment) {
                Some(month) => months.push(month.to_string()),
                None => {
                    return Err(FieldError::UnknownMonth {
                        token: fragment.to_string(),
                        raw: raw.to_string(),
                    });
                }
            }
        }
    }

    Ok(months)
}

/// Build a `day-month-year` plant date.
///
/// Returns `Ok(None)` when day or month fall outside 1..=31 and 1..=12, or
/// the year is not exactly four characters. The year is taken as written, so
/// `c.90` passes. Dates are not checked against the calendar, so 31 April is
/// accepted. A non-numeric day or month is an error.
pub fn parse_plant_date(day: &str, month: &str, year: &str) -> Result<Option<String>, FieldError> {
    let (day, month, year) = (day.trim(), month.trim(), year.trim());

    let invalid = || FieldError::InvalidPlantDate {
        day: day.to_string(),
        month: month.to_string(),
        year: year.to_string(),
    };

    let day_number = day.parse::<i64>().map_err(|_| invalid())?;
    let month_number = month.parse::<i64>().map_err(|_| invalid())?;

    if (1..=31).contains(&day_number)
        && (1..=12).contains(&month_number)
        && year.chars().count() == 4
    {
        Ok(Some(format!("{}-{}-{}", day, month, year)))
    } else {
        debug!(
            "Plant date out of range: day={}, month={}, year={}",
            day, month, year
        );
        Ok(None)
    }
}

/// Parse a comma-separated list of hardiness zones.
///
/// Empty elements are ignored. Under [`FieldPolicy::Strict`] an element that
/// is not an integer fails the field; under [`FieldPolicy::Lenient`] it is
/// logged and skipped.
pub fn parse_hardiness(raw: &str, policy: FieldPolicy) -> Result<Vec<i32>, FieldError> {
    let mut zones = Vec::new();

    for element in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match element.parse::<i32>() {
            Ok(zone) => zones.push(zone),
            Err(_) if policy.is_strict() => {
                return Err(FieldError::InvalidHardiness {
                    element: element.to_string(),
                    raw: raw.to_string(),
                });
            }
            Err(_) => {
                warn!("Skipping unparseable hardiness zone '{}' in '{}'", element, raw);
            }
        }
    }

    Ok(zones)
}

/// True when a trait cell reads "yes" or "x" (any case)
pub fn parse_trait_flag(raw: &str) -> bool {
    let value = raw.trim();
    TRUTHY_VALUES
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}

/// Trait flag for the utah-native column, which also accepts "Utah Native"
pub fn parse_utah_native(raw: &str) -> bool {
    parse_trait_flag(raw) || raw.trim().eq_ignore_ascii_case(UTAH_NATIVE_VALUE)
}

/// Round a coordinate to six decimal places.
///
/// Magnitudes of 1e15 and above have no fractional digits left to round
/// and are returned unchanged.
pub fn round_coordinate(value: f64) -> f64 {
    if value.abs() >= 1e15 {
        return value;
    }
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Parse a latitude or longitude cell and round it to six decimal places
pub fn parse_coordinate(raw: &str, field: &'static str) -> Result<f64, FieldError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FieldError::InvalidCoordinate {
            field,
            value: raw.to_string(),
        })?;

    Ok(round_coordinate(value))
}

/// Map the `NULL` placeholder to an absent value
pub fn null_to_none(raw: &str) -> Option<String> {
    if raw == NULL_PLACEHOLDER {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Parse a last-modified cell into local wall-clock time.
///
/// Accepts ISO-8601 timestamps (any UTC offset is discarded, keeping the
/// wall-clock reading) and the `3/1/2021  1:07:38 PM` style BRAHMS writes
/// for some records.
pub fn parse_last_modified(raw: &str) -> Option<NaiveDateTime> {
    let normalised = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    OFFSET_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&normalised, format).ok())
        .map(|timestamp| timestamp.naive_local())
        .or_else(|| {
            NAIVE_TIMESTAMP_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(&normalised, format).ok())
        })
}
