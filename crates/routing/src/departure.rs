use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// Time of day the trip starts, at minute resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepartureTime(NaiveTime);

impl DepartureTime {
    /// Accepts `HH:MM` (what a time input produces) or `HH:MM:SS`; seconds are dropped.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let s = raw.trim();
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .map(|t| DepartureTime(t.with_second(0).unwrap_or(t)))
            .map_err(|_| RouteError::InvalidDepartureTime(raw.to_string()))
    }

    pub fn hhmm(&self) -> String {
        self.0.format("%H:%M").to_string()
    }

    /// `2017-09-19T08:30`: the time of day attached to `date`.
    pub fn on(&self, date: NaiveDate) -> String {
        format!("{}T{}", date.format("%Y-%m-%d"), self.hhmm())
    }
}

impl Default for DepartureTime {
    fn default() -> Self {
        DepartureTime(NaiveTime::from_hms_opt(8, 30, 0).unwrap_or_default())
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hhmm())
    }
}

impl TryFrom<String> for DepartureTime {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DepartureTime::parse(&value)
    }
}

impl From<DepartureTime> for String {
    fn from(value: DepartureTime) -> Self {
        value.hhmm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_time_input_values() {
        assert_eq!(DepartureTime::parse("08:30").unwrap().hhmm(), "08:30");
        assert_eq!(DepartureTime::parse(" 17:05 ").unwrap().hhmm(), "17:05");
        assert_eq!(DepartureTime::parse("23:59:42").unwrap().hhmm(), "23:59");
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "8.30", "25:00", "12:60", "noon"] {
            assert!(
                matches!(DepartureTime::parse(bad), Err(RouteError::InvalidDepartureTime(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn attaches_to_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2017, 9, 19).unwrap();
        assert_eq!(DepartureTime::parse("08:30").unwrap().on(date), "2017-09-19T08:30");
    }

    #[test]
    fn default_is_half_past_eight() {
        assert_eq!(DepartureTime::default().to_string(), "08:30");
    }

    #[test]
    fn serde_uses_hhmm_text() {
        let t: DepartureTime = serde_json::from_str("\"06:15\"").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"06:15\"");
        assert!(serde_json::from_str::<DepartureTime>("\"6pm\"").is_err());
    }
}
