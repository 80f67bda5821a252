//! Calendar-date and week-boundary helpers
//!
//! "Today" is resolved in server-local time, while stored timestamps and
//! week boundaries are midnight UTC. Near local midnight in a non-UTC
//! deployment an entry can land on the neighboring UTC day; existing data
//! was written under that behavior, so it is kept.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const YMD_FORMAT: &str = "%Y-%m-%d";

/// Stored datetime format: ISO-8601 with millisecond precision, e.g.
/// "2026-01-05T00:00:00.000Z"
const STORED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// PocketBase list responses render datetimes with a space separator,
/// e.g. "2026-01-05 00:00:00.000Z"
const LIST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.fZ";

/// ---------------------------------------------------------------------------
/// Calendar Dates
/// ---------------------------------------------------------------------------

/// Current calendar date as `YYYY-MM-DD`, in the server's local time.
pub fn today_ymd() -> String {
  Local::now().format(YMD_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_ymd(ymd: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(ymd, YMD_FORMAT).ok()
}

/// Map a `YYYY-MM-DD` string to the midnight-UTC instant on that date.
pub fn ymd_to_timestamp(ymd: &str) -> Option<DateTime<Utc>> {
  let date = parse_ymd(ymd)?;
  Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// The canonical stored form of a day: its midnight-UTC instant as an
/// ISO-8601 string.
pub fn ymd_to_stored_date(ymd: &str) -> Option<String> {
  ymd_to_timestamp(ymd).map(|ts| ts.format(STORED_DATE_FORMAT).to_string())
}

/// Parse a stored datetime back into an instant. Accepts both the ISO form
/// we write and the space-separated form PocketBase returns.
pub fn parse_stored_date(raw: &str) -> Option<DateTime<Utc>> {
  if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
    return Some(ts.with_timezone(&Utc));
  }

  NaiveDateTime::parse_from_str(raw, LIST_DATE_FORMAT)
    .ok()
    .map(|naive| Utc.from_utc_datetime(&naive))
}

/// ---------------------------------------------------------------------------
/// Week Boundaries
/// ---------------------------------------------------------------------------

/// Midnight UTC of the Monday on/before `now`'s UTC calendar date.
pub fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
  let date = now.date_naive();
  let days_from_monday = date.weekday().num_days_from_monday() as i64;
  let monday = date - Duration::days(days_from_monday);
  Utc.from_utc_datetime(&monday.and_time(NaiveTime::MIN))
}

/// Exclusive upper bound of the week containing `now`.
pub fn end_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
  start_of_week(now) + Duration::days(7)
}

/// Half-open `[start, end)` UTC interval of a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

impl WeekWindow {
  /// The Monday-aligned week containing `now`.
  pub fn containing(now: DateTime<Utc>) -> Self {
    let start = start_of_week(now);
    Self {
      start,
      end: start + Duration::days(7),
    }
  }

  pub fn contains(&self, ts: DateTime<Utc>) -> bool {
    self.start <= ts && ts < self.end
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
  }

  #[test]
  fn test_today_ymd_shape() {
    let ymd = today_ymd();
    assert_eq!(ymd.len(), 10);
    assert!(parse_ymd(&ymd).is_some());
  }

  #[test]
  fn test_ymd_to_timestamp_is_midnight_utc() {
    let ts = ymd_to_timestamp("2026-01-05").unwrap();
    assert_eq!(ts, utc(2026, 1, 5, 0, 0, 0));
  }

  #[test]
  fn test_ymd_to_timestamp_rejects_invalid_dates() {
    assert!(ymd_to_timestamp("2026-13-40").is_none());
    assert!(ymd_to_timestamp("not-a-date").is_none());
    assert!(ymd_to_timestamp("").is_none());
  }

  #[test]
  fn test_stored_date_format() {
    assert_eq!(
      ymd_to_stored_date("2026-01-05").unwrap(),
      "2026-01-05T00:00:00.000Z"
    );
  }

  #[test]
  fn test_parse_stored_date_accepts_both_forms() {
    let expected = utc(2026, 1, 5, 0, 0, 0);
    assert_eq!(parse_stored_date("2026-01-05T00:00:00.000Z"), Some(expected));
    assert_eq!(parse_stored_date("2026-01-05 00:00:00.000Z"), Some(expected));
    assert_eq!(parse_stored_date("garbage"), None);
  }

  #[test]
  fn test_start_of_week_midweek() {
    // 2026-01-07 is a Wednesday; the preceding Monday is 2026-01-05
    let start = start_of_week(utc(2026, 1, 7, 15, 30, 0));
    assert_eq!(start, utc(2026, 1, 5, 0, 0, 0));
  }

  #[test]
  fn test_start_of_week_on_sunday_goes_back_six_days() {
    // 2026-01-11 is a Sunday
    let start = start_of_week(utc(2026, 1, 11, 23, 59, 59));
    assert_eq!(start, utc(2026, 1, 5, 0, 0, 0));
  }

  #[test]
  fn test_start_of_week_crosses_year_boundary() {
    // 2026-01-04 is a Sunday; its week started Monday 2025-12-29
    let start = start_of_week(utc(2026, 1, 4, 12, 0, 0));
    assert_eq!(start, utc(2025, 12, 29, 0, 0, 0));
  }

  #[test]
  fn test_start_of_week_is_idempotent() {
    let now = utc(2026, 1, 7, 15, 30, 0);
    let start = start_of_week(now);
    assert_eq!(start_of_week(start), start);
  }

  #[test]
  fn test_window_brackets_now_and_spans_seven_days() {
    let now = utc(2026, 1, 7, 15, 30, 0);
    let window = WeekWindow::containing(now);

    assert!(window.contains(now));
    assert_eq!(window.end - window.start, Duration::days(7));
    assert_eq!(window.end, end_of_week(now));
  }

  #[test]
  fn test_window_boundaries_are_half_open() {
    let window = WeekWindow::containing(utc(2026, 1, 7, 0, 0, 0));

    assert!(window.contains(window.start));
    assert!(!window.contains(window.end));
    assert!(!window.contains(window.start - Duration::seconds(1)));
  }
}
