//! Date and time normalization for query parameters.
//!
//! Harvest takes `updated_since` as an ISO 8601 timestamp with offset and
//! `from`/`to` as calendar dates. Callers may pass either a pre-formatted
//! string, which is sent as is, or a chrono value, which is formatted here.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

const ATOM: &str = "%Y-%m-%dT%H:%M:%S%:z";
const YMD: &str = "%Y-%m-%d";

/// A date-like filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParam {
    /// Already in wire format; passed through unchanged.
    Raw(String),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl From<&str> for DateParam {
    fn from(value: &str) -> Self {
        DateParam::Raw(value.to_string())
    }
}

impl From<String> for DateParam {
    fn from(value: String) -> Self {
        DateParam::Raw(value)
    }
}

impl From<NaiveDate> for DateParam {
    fn from(value: NaiveDate) -> Self {
        DateParam::Date(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateParam {
    fn from(value: DateTime<Tz>) -> Self {
        DateParam::DateTime(value.fixed_offset())
    }
}

/// Formats as an ATOM timestamp, e.g. `2024-03-01T09:30:00+01:00`.
/// A bare date is taken as midnight UTC.
pub fn to_timestamp(param: &DateParam) -> String {
    match param {
        DateParam::Raw(s) => s.clone(),
        DateParam::Date(date) => date.and_time(chrono::NaiveTime::MIN).and_utc().format(ATOM).to_string(),
        DateParam::DateTime(dt) => dt.format(ATOM).to_string(),
    }
}

/// Formats as `YYYY-MM-DD`. A date-time keeps its own local calendar date.
pub fn to_date(param: &DateParam) -> String {
    match param {
        DateParam::Raw(s) => s.clone(),
        DateParam::Date(date) => date.format(YMD).to_string(),
        DateParam::DateTime(dt) => dt.format(YMD).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timestamp_from_offset_datetime() {
        let dt = DateTime::parse_from_rfc3339("2024-03-01T09:30:05+01:00").unwrap();
        assert_eq!(to_timestamp(&dt.into()), "2024-03-01T09:30:05+01:00");
    }

    #[test]
    fn timestamp_from_utc_uses_zero_offset() {
        let dt = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(to_timestamp(&dt.into()), "2023-12-31T23:59:59+00:00");
    }

    #[test]
    fn timestamp_from_date_is_midnight_utc() {
        assert_eq!(to_timestamp(&date(2024, 2, 29).into()), "2024-02-29T00:00:00+00:00");
    }

    #[test]
    fn date_from_naive_date() {
        assert_eq!(to_date(&date(2024, 1, 5).into()), "2024-01-05");
    }

    #[test]
    fn date_from_datetime_keeps_local_day() {
        let dt = DateTime::parse_from_rfc3339("2024-06-30T23:30:00-05:00").unwrap();
        assert_eq!(to_date(&dt.into()), "2024-06-30");
    }

    #[test]
    fn raw_strings_pass_through() {
        let raw = DateParam::from("last tuesday");
        assert_eq!(to_timestamp(&raw), "last tuesday");
        assert_eq!(to_date(&raw), "last tuesday");
    }
}
