//! UTC calendar helpers
//!
//! All day boundaries in the system are UTC midnight.

use chrono::{DateTime, Days, NaiveDate, Utc};
use std::time::Duration;

/// Current UTC calendar date
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// First UTC midnight strictly after `now`
pub fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX);
    tomorrow.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Time left until the next UTC midnight
pub fn until_next_utc_midnight(now: DateTime<Utc>) -> Duration {
    (next_utc_midnight(now) - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_midnight_mid_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        let next = next_utc_midnight(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(
            until_next_utc_midnight(now),
            Duration::from_secs(8 * 3600 + 50 * 60 + 34)
        );
    }

    #[test]
    fn test_next_midnight_exactly_at_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(
            next_utc_midnight(now),
            Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(until_next_utc_midnight(now), Duration::from_secs(86_400));
    }
}
