//! Centralized edition-date handling.
//!
//! Every surface of pressroom (catalog keys, CLI arguments, image paths,
//! display labels) speaks the same `DD-MM-YYYY` form. This module provides
//! the single type that parses, formats, and orders those dates so no other
//! code touches the wire format directly.
//!
//! Ordering is by calendar value, never by string comparison:
//! `05-01-2026` sorts after `28-12-2025` even though the strings would
//! sort the other way.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wire format shared by config keys, paths, and labels.
const FORMAT: &str = "%d-%m-%Y";

#[derive(Error, Debug, PartialEq)]
pub enum DateError {
    #[error("invalid edition date '{0}': expected DD-MM-YYYY")]
    Invalid(String),
}

/// A calendar date identifying one edition. No time component.
///
/// `Ord` follows calendar order (year, then month, then day), which is
/// what the edition selector and the startup policy rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EditionDate(NaiveDate);

impl EditionDate {
    pub fn new(day: u32, month: u32, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(EditionDate)
    }

    /// Today according to the local clock. Kept out of the navigator so
    /// the startup policy stays a pure function of its inputs.
    pub fn today() -> Self {
        EditionDate(chrono::Local::now().date_naive())
    }
}

impl From<NaiveDate> for EditionDate {
    fn from(date: NaiveDate) -> Self {
        EditionDate(date)
    }
}

impl fmt::Display for EditionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for EditionDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, FORMAT)
            .map(EditionDate)
            .map_err(|_| DateError::Invalid(s.to_string()))
    }
}

impl Serialize for EditionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EditionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_wire_format() {
        let date: EditionDate = "30-01-2026".parse().unwrap();
        assert_eq!(date.to_string(), "30-01-2026");
    }

    #[test]
    fn display_zero_pads_components() {
        let date = EditionDate::new(5, 1, 2026).unwrap();
        assert_eq!(date.to_string(), "05-01-2026");
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert!("32-01-2026".parse::<EditionDate>().is_err());
        assert!("05-13-2026".parse::<EditionDate>().is_err());
        assert!("29-02-2025".parse::<EditionDate>().is_err());
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(
            "2026-01-05".parse::<EditionDate>(),
            Err(DateError::Invalid("2026-01-05".into()))
        );
        assert!("not-a-date".parse::<EditionDate>().is_err());
        assert!("".parse::<EditionDate>().is_err());
    }

    #[test]
    fn orders_by_calendar_value_not_string_order() {
        // As strings, "05-..." < "28-..."; as dates, January 2026 is later.
        let jan: EditionDate = "05-01-2026".parse().unwrap();
        let dec: EditionDate = "28-12-2025".parse().unwrap();
        assert!(jan > dec);
    }

    #[test]
    fn orders_within_a_month_by_day() {
        let early: EditionDate = "27-01-2026".parse().unwrap();
        let late: EditionDate = "30-01-2026".parse().unwrap();
        assert!(late > early);
    }

    #[test]
    fn serde_round_trips_as_string() {
        let date: EditionDate = "27-01-2026".parse().unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"27-01-2026\"");
        let back: EditionDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
