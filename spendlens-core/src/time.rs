//! Time utilities: timestamp parsing and timezone-aware "now".

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Format of the timestamp accepted by the page builders.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Format of the reference date accepted by the reports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a page timestamp like "2021-12-31 16:44:00".
/// A bare date is taken as midnight.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDate::parse_from_str(s, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|e| Error::InvalidInput(format!("invalid timestamp '{s}': {e}")))
}

/// Parse a report reference date "YYYY-MM-DD" (midnight).
pub fn parse_report_date(s: &str) -> Result<NaiveDateTime> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|e| Error::InvalidInput(format!("invalid date '{s}': {e}")))
}

/// Current wall-clock time in an IANA tz like "Europe/Moscow".
pub fn now_in(tz: &str) -> Result<NaiveDateTime> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| Error::InvalidInput(format!("invalid timezone: {tz}")))?;
    Ok(Utc::now().with_timezone(&tz).naive_local())
}

/// Parse "YYYY-MM" into (year, month).
pub fn parse_year_month(s: &str) -> Result<(i32, u32)> {
    let invalid = || Error::InvalidInput(format!("invalid month '{s}', expected YYYY-MM"));
    let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2021-12-31 16:44:00").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour(), ts.minute()), (2021, 12, 31, 16, 44));

        let midnight = parse_timestamp("2021-12-31").unwrap();
        assert_eq!(midnight.hour(), 0);

        assert!(matches!(parse_timestamp("31/12/2021"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_parse_report_date() {
        let d = parse_report_date("2021-12-31").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2021, 12, 31).unwrap().and_time(NaiveTime::MIN));
        assert!(parse_report_date("2021-13-01").is_err());
    }

    #[test]
    fn test_now_in_timezone() {
        assert!(now_in("Europe/Moscow").is_ok());
        assert!(matches!(now_in("Mars/Olympus"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_year_month("2021-12").unwrap(), (2021, 12));
        assert!(parse_year_month("2021-13").is_err());
        assert!(parse_year_month("202112").is_err());
        assert!(parse_year_month("abcd-01").is_err());
    }
}
