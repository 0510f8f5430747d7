//! Calendar date value type used for daily rotation.
//!
//! # Invariants
//! - Dates compare by `(year, month, day)` only; no time zone or time of day.
//! - The persisted form is ISO-8601 `YYYY-MM-DD`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from components; `None` when the day does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the persisted `YYYY-MM-DD` form.
    pub fn parse(value: &str) -> Option<Self> {
        NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)
            .ok()
            .map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The following calendar day, saturating at the maximum date.
    pub fn next_day(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// The preceding calendar day, saturating at the minimum date.
    pub fn previous_day(&self) -> Self {
        Self(self.0.pred_opt().unwrap_or(self.0))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid calendar date `{raw}`, expected YYYY-MM-DD"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CalendarDate;

    #[test]
    fn parse_and_display_use_iso_form() {
        let date = CalendarDate::parse("2024-02-29").expect("leap day should parse");
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));
        assert_eq!(date.to_string(), "2024-02-29");
    }

    #[test]
    fn parse_rejects_locale_strings() {
        assert!(CalendarDate::parse("Thu Feb 29 2024").is_none());
        assert!(CalendarDate::parse("2023-02-29").is_none());
    }

    #[test]
    fn next_day_crosses_month_and_year_boundaries() {
        let new_years_eve = CalendarDate::from_ymd(2025, 12, 31).expect("valid date");
        let next = new_years_eve.next_day();
        assert_eq!(next, CalendarDate::from_ymd(2026, 1, 1).expect("valid date"));
        assert_eq!(next.previous_day(), new_years_eve);
        assert!(new_years_eve < next);
    }

    #[test]
    fn json_form_is_a_plain_string() {
        let date = CalendarDate::from_ymd(2026, 10, 18).expect("valid date");
        let json = serde_json::to_string(&date).expect("serialize date");
        assert_eq!(json, "\"2026-10-18\"");

        let parsed: CalendarDate = serde_json::from_str(&json).expect("parse date");
        assert_eq!(parsed, date);
        assert!(serde_json::from_str::<CalendarDate>("\"yesterday\"").is_err());
    }
}
