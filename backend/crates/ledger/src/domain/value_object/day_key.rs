//! Idempotency date key
//!
//! A UTC calendar date rendered as `YYYY-MM-DD`. Once-per-day actions
//! compare the stored key against today's key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's key (UTC)
    pub fn today() -> Self {
        Self(platform::clock::today_utc())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_parse() {
        let key: DayKey = "2026-01-09".parse().unwrap();
        assert_eq!(key.to_string(), "2026-01-09");
        assert_eq!(key.next().to_string(), "2026-01-10");
        assert!("2026-13-01".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_serializes_as_date_string() {
        let key: DayKey = "2026-02-28".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""2026-02-28""#);
    }
}
